use flintdb_datatype::error::Error as DataTypeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("value type mismatch")]
    TypeMismatch,
    #[error("empty value")]
    EmptyValue,
    #[error("Index out of bound")]
    IndexOutOfBound,
    #[error("IO Error")]
    IOError,
    #[error("Invalid format")]
    InvalidFormat,
}

impl From<DataTypeError> for Error {
    #[inline]
    fn from(src: DataTypeError) -> Self {
        match src {
            DataTypeError::InvalidFormat => Error::InvalidFormat,
            DataTypeError::IOError => Error::IOError,
        }
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(_src: std::io::Error) -> Self {
        Error::IOError
    }
}

impl From<std::num::ParseIntError> for Error {
    #[inline]
    fn from(_src: std::num::ParseIntError) -> Error {
        Error::InvalidFormat
    }
}

impl From<std::num::ParseFloatError> for Error {
    #[inline]
    fn from(_src: std::num::ParseFloatError) -> Error {
        Error::InvalidFormat
    }
}

impl From<std::str::ParseBoolError> for Error {
    #[inline]
    fn from(_src: std::str::ParseBoolError) -> Error {
        Error::InvalidFormat
    }
}

impl From<std::convert::Infallible> for Error {
    #[inline]
    fn from(src: std::convert::Infallible) -> Error {
        match src {}
    }
}
