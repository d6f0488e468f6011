pub mod error;
pub mod konst;

use serde::{Deserialize, Serialize};
use std::fmt;

/// AttrType describes the runtime type of a single attribute.
/// Columns are monomorphic: every value in one column shares
/// the same AttrType.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AttrType {
    Bool = 1,
    Int = 2,
    BigInt = 3,
    Float = 4,
    Double = 5,
    Varchar = 6,
}

impl AttrType {
    /// Returns true if values of this type occupy a fixed number
    /// of bytes in memory.
    #[inline]
    pub fn is_fixed(self) -> bool {
        !matches!(self, AttrType::Varchar)
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttrType::Bool => "bool",
            AttrType::Int => "int",
            AttrType::BigInt => "bigint",
            AttrType::Float => "float",
            AttrType::Double => "double",
            AttrType::Varchar => "varchar",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_type_display() {
        assert_eq!(format!("{}", AttrType::Int), "int");
        assert_eq!(format!("{}", AttrType::Varchar), "varchar");
    }

    #[test]
    fn test_attr_type_fixed() {
        assert!(AttrType::Bool.is_fixed());
        assert!(AttrType::Double.is_fixed());
        assert!(!AttrType::Varchar.is_fixed());
    }
}
