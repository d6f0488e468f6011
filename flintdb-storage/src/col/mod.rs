//! Column implementations.
//!
//! A column stores the values of a single attribute for all rows of a
//! table. Rows are addressed by TID, the dense index into the column.
//! Currently dictionary compression is the only encoding.
pub mod dict;
mod sidecar;

pub use dict::DictionaryColumn;

use crate::error::Result;
use crate::value::Val;
use flintdb_datatype::konst::{ValidF32, ValidF64};
use flintdb_datatype::AttrType;
use std::path::Path;

/// Tuple identifier: a row's index into the column.
/// TIDs are dense and renumbered by deletes, so they are only
/// stable between mutations.
pub type Tid = u64;

/// An ordered sequence of TIDs, as produced by selections.
pub type PositionList = Vec<Tid>;

/// The polymorphic column contract consumed by the table layer.
/// Values cross the boundary as dynamic [`Val`] holders; each
/// implementation unwraps them against its own element type.
pub trait Column {
    fn name(&self) -> &str;

    fn attr_type(&self) -> AttrType;

    /// Append one row. The new row's TID equals the prior row count.
    fn insert(&mut self, val: Val) -> Result<()>;

    /// Append rows in order, stopping on the first failing append.
    /// Appends that preceded the failure remain committed.
    fn insert_many(&mut self, vals: Vec<Val>) -> Result<()> {
        for val in vals {
            self.insert(val)?;
        }
        Ok(())
    }

    /// Random read of one row.
    fn get(&self, tid: Tid) -> Result<Val>;

    /// In-place rewrite of one row. Never changes the row count.
    fn update(&mut self, tid: Tid, val: Val) -> Result<()>;

    /// Apply `update` to each TID in list order, stopping on the
    /// first failure. Earlier updates remain committed.
    fn update_many(&mut self, tids: &[Tid], val: Val) -> Result<()> {
        for &tid in tids {
            self.update(tid, val.clone())?;
        }
        Ok(())
    }

    /// Delete one row. All TIDs greater than `tid` shift down by one.
    fn remove(&mut self, tid: Tid) -> Result<()>;

    /// Apply `remove` to each TID in list order, stopping on the
    /// first failure. The list must be sorted ascending. Each removal
    /// renumbers later rows and the list is NOT adjusted for that:
    /// after removing TID k, the row originally at k+j lives at
    /// k+j-1. Callers supply a list that already accounts for this.
    fn remove_many(&mut self, tids: &[Tid]) -> Result<()> {
        for &tid in tids {
            self.remove(tid)?;
        }
        Ok(())
    }

    /// Drop all rows and dictionary state.
    fn clear(&mut self);

    /// Logical row count.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lower-bound estimate of the heap footprint in bytes.
    /// Container overhead is not modeled.
    fn mem_usage(&self) -> usize;

    /// Write the column to its sidecar files at `path`.
    fn store(&self, path: &Path) -> Result<()>;

    /// Replace the column content with the sidecar files at `path`.
    /// On failure the column is left unchanged.
    fn load(&mut self, path: &Path) -> Result<()>;

    /// Deep, independent copy.
    fn copy(&self) -> Box<dyn Column>;
}

/// Create an empty dictionary column for a runtime attribute type.
pub fn dictionary_column(name: &str, attr_type: AttrType) -> Box<dyn Column> {
    match attr_type {
        AttrType::Bool => Box::new(DictionaryColumn::<bool>::new(name)),
        AttrType::Int => Box::new(DictionaryColumn::<i32>::new(name)),
        AttrType::BigInt => Box::new(DictionaryColumn::<i64>::new(name)),
        AttrType::Float => Box::new(DictionaryColumn::<ValidF32>::new(name)),
        AttrType::Double => Box::new(DictionaryColumn::<ValidF64>::new(name)),
        AttrType::Varchar => Box::new(DictionaryColumn::<String>::new(name)),
    }
}
