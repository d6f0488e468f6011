pub mod col;
pub mod error;
pub mod value;

pub mod prelude {
    pub use crate::col::*;
    pub use crate::error::*;
    pub use crate::value::*;
}
