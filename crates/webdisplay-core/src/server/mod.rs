pub mod errors;
pub mod operations;
pub mod traits;
pub mod types;

pub use errors::ServerError;
pub use operations::{bind_engine, compose_engine_spec};
pub use traits::{ConnectionHandler, HttpServer, ServerFactory};
pub use types::{EngineSpec, ListenAccess, REGISTRATION_ROOT, Scheme};
