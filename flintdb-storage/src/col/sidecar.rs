//! Sidecar file naming and buffered IO.
//!
//! A stored column is a pair of text files next to each other:
//! `<base>_values` holds one `"<refs> <value>"` line per dictionary
//! entry, `<base>_position` one values-file line number per row.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

pub(crate) const VALUES_SUFFIX: &str = "_values";
pub(crate) const POSITION_SUFFIX: &str = "_position";

#[inline]
pub(crate) fn values_path(base: &Path) -> PathBuf {
    suffixed(base, VALUES_SUFFIX)
}

#[inline]
pub(crate) fn position_path(base: &Path) -> PathBuf {
    suffixed(base, POSITION_SUFFIX)
}

// appends to the file name instead of replacing the extension.
fn suffixed(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

#[inline]
pub(crate) fn create(path: &Path) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

#[inline]
pub(crate) fn open(path: &Path) -> io::Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_paths() {
        let base = Path::new("/tmp/data/orders.price");
        assert_eq!(
            values_path(base),
            PathBuf::from("/tmp/data/orders.price_values")
        );
        assert_eq!(
            position_path(base),
            PathBuf::from("/tmp/data/orders.price_position")
        );
    }
}
