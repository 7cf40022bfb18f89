pub mod errors;
pub mod operations;
pub mod types;

pub use errors::ProcessError;
pub use operations::{halt_client, kill_process};
pub use types::{PID_PREFIX, ProcessRecord};
