pub mod errors;
pub mod system;
pub mod traits;
pub mod types;

pub use errors::PlatformError;
pub use system::SystemPlatform;
pub use traits::Platform;
pub use types::HostOs;
