use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Invalid format")]
    InvalidFormat,
    #[error("IO Error")]
    IOError,
}

impl From<std::num::ParseFloatError> for Error {
    #[inline]
    fn from(_src: std::num::ParseFloatError) -> Error {
        Error::InvalidFormat
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(_src: std::io::Error) -> Error {
        Error::IOError
    }
}
