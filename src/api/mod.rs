pub mod docs_handlers;
pub mod handlers;
pub mod routes;

pub use docs_handlers::*;
pub use handlers::*;
pub use routes::*;
