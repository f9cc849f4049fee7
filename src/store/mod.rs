pub mod error;
pub mod json_file;
pub mod traits;

pub use error::*;
pub use json_file::*;
pub use traits::*;
