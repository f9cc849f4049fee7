pub mod collection;
pub mod vehicle;

pub use collection::*;
pub use vehicle::*;
