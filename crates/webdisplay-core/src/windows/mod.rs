pub mod errors;
pub mod keys;
pub mod types;
pub mod url;

pub use errors::WindowError;
pub use keys::{KEY_SPACE, MAX_KEY_ATTEMPTS, issue_key, issue_key_with};
pub use types::{Window, WindowId};
pub use url::{BATCH_MARKER, append_key, qualify, window_path};
