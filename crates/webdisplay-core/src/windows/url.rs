//! Window address composition.

use crate::server::REGISTRATION_ROOT;
use crate::windows::types::Window;

/// Query marker appended to batch-mode window paths.
pub const BATCH_MARKER: &str = "?batch_mode";

/// Server-relative path of a window: `/web7gui/<name>/`, plus the batch marker.
pub fn window_path(window: &Window) -> String {
    let mut path = format!("{}/{}/", REGISTRATION_ROOT, window.connection_name());
    if window.is_batch_mode() {
        path.push_str(BATCH_MARKER);
    }
    path
}

/// Prefix a window path with the network address of the listener.
pub fn qualify(address: &str, path: &str) -> String {
    format!("{}{}", address, path)
}

/// Append the authorization key as a query parameter.
pub fn append_key(url: &str, key: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}key={}", url, separator, key)
}
