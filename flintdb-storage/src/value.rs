use crate::error::{Error, Result};
use flintdb_datatype::konst::{ValidF32, ValidF64};
use flintdb_datatype::AttrType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Val is the dynamic value representation at the column boundary.
/// A typed column unwraps it through [`ColType::from_val`]; `Null`
/// is the empty holder and never matches any column type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Val {
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    BigInt(i64),
    Float(ValidF32),
    Double(ValidF64),
    Varchar(String),
}

impl Val {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Val::Null)
    }

    /// Runtime type of the payload. None for the empty holder.
    #[inline]
    pub fn attr_type(&self) -> Option<AttrType> {
        match self {
            Val::Null => None,
            Val::Bool(_) => Some(AttrType::Bool),
            Val::Int(_) => Some(AttrType::Int),
            Val::BigInt(_) => Some(AttrType::BigInt),
            Val::Float(_) => Some(AttrType::Float),
            Val::Double(_) => Some(AttrType::Double),
            Val::Varchar(_) => Some(AttrType::Varchar),
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Val::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Val::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Val::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Val::Float(v) => Some(v.value()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Val::Double(v) => Some(v.value()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Val::Varchar(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Val::Null => f.write_str("NULL"),
            Val::Bool(v) => fmt::Display::fmt(v, f),
            Val::Int(v) => fmt::Display::fmt(v, f),
            Val::BigInt(v) => fmt::Display::fmt(v, f),
            Val::Float(v) => fmt::Display::fmt(v, f),
            Val::Double(v) => fmt::Display::fmt(v, f),
            Val::Varchar(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<bool> for Val {
    #[inline]
    fn from(value: bool) -> Self {
        Val::Bool(value)
    }
}

impl From<i32> for Val {
    #[inline]
    fn from(value: i32) -> Self {
        Val::Int(value)
    }
}

impl From<i64> for Val {
    #[inline]
    fn from(value: i64) -> Self {
        Val::BigInt(value)
    }
}

impl From<ValidF32> for Val {
    #[inline]
    fn from(value: ValidF32) -> Self {
        Val::Float(value)
    }
}

impl From<ValidF64> for Val {
    #[inline]
    fn from(value: ValidF64) -> Self {
        Val::Double(value)
    }
}

impl From<String> for Val {
    #[inline]
    fn from(value: String) -> Self {
        Val::Varchar(value)
    }
}

impl From<&str> for Val {
    #[inline]
    fn from(value: &str) -> Self {
        Val::Varchar(String::from(value))
    }
}

/// Element types storable in a typed column.
///
/// The dictionary keys values in an ordered map, so a strict total
/// order is required. Display/parse_text define the sidecar text
/// form of one value.
pub trait ColType: Ord + Clone + fmt::Display + Sized + 'static {
    const ATTR_TYPE: AttrType;

    /// Checked cast from the dynamic holder. None on variant
    /// mismatch, including the empty holder.
    fn from_val(val: Val) -> Option<Self>;

    fn into_val(self) -> Val;

    /// Parse one value from its sidecar text form.
    fn parse_text(s: &str) -> Result<Self>;
}

macro_rules! impl_col_type {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl ColType for $t {
                const ATTR_TYPE: AttrType = AttrType::$variant;

                #[inline]
                fn from_val(val: Val) -> Option<Self> {
                    match val {
                        Val::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                #[inline]
                fn into_val(self) -> Val {
                    Val::$variant(self)
                }

                #[inline]
                fn parse_text(s: &str) -> Result<Self> {
                    s.parse::<$t>().map_err(Error::from)
                }
            }
        )*
    }
}

impl_col_type!(
    bool => Bool,
    i32 => Int,
    i64 => BigInt,
    ValidF32 => Float,
    ValidF64 => Double,
    String => Varchar,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_val_checked_cast() {
        assert_eq!(i32::from_val(Val::from(42)), Some(42));
        assert_eq!(i32::from_val(Val::from(42i64)), None);
        assert_eq!(i32::from_val(Val::Null), None);
        assert_eq!(
            String::from_val(Val::from("apple")),
            Some(String::from("apple"))
        );
        assert_eq!(bool::from_val(Val::from("apple")), None);
    }

    #[test]
    fn test_val_attr_type() {
        assert_eq!(Val::Null.attr_type(), None);
        assert_eq!(Val::from(1i32).attr_type(), Some(AttrType::Int));
        assert_eq!(Val::from("x").attr_type(), Some(AttrType::Varchar));
    }

    #[test]
    fn test_val_accessors() {
        assert_eq!(Val::from(7i32).as_i32(), Some(7));
        assert_eq!(Val::from(7i32).as_i64(), None);
        assert_eq!(Val::from("s").as_str(), Some("s"));
        assert!(Val::Null.is_null());
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(i32::parse_text("123").unwrap(), 123);
        assert!(i32::parse_text("12x").is_err());
        assert_eq!(String::parse_text("hello world").unwrap(), "hello world");
        assert_eq!(ValidF64::parse_text("2.5").unwrap().value(), 2.5);
        assert!(ValidF64::parse_text("inf").is_err());
        assert_eq!(bool::parse_text("true").unwrap(), true);
    }
}
