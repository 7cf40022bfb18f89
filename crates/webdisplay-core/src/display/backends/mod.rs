pub mod registry;
pub mod traits;

pub use registry::BackendRegistry;
pub use traits::{EmbeddedBackend, EmbeddedLaunch};
