//! One-time authorization keys for window connections.

use rand::Rng;
use tracing::error;

use crate::windows::errors::WindowError;
use crate::windows::types::Window;

/// Keys are drawn from `[0, KEY_SPACE)`.
pub const KEY_SPACE: u32 = 0x100000;

/// Maximum number of candidates drawn before giving up.
pub const MAX_KEY_ATTEMPTS: u32 = 1000;

/// Issue a key absent from the window's key set.
///
/// The window is not modified; the caller records the key once the display
/// has actually been launched.
pub fn issue_key<R: Rng + ?Sized>(window: &Window, rng: &mut R) -> Result<String, WindowError> {
    issue_key_with(window, || rng.random_range(0..KEY_SPACE))
}

/// Issue a key using the given candidate source.
pub fn issue_key_with<F>(window: &Window, mut draw: F) -> Result<String, WindowError>
where
    F: FnMut() -> u32,
{
    for _ in 0..MAX_KEY_ATTEMPTS {
        let key = draw().to_string();
        if !window.has_key(&key) {
            return Ok(key);
        }
    }

    error!(
        event = "core.window.key_exhausted",
        window_id = window.id().as_u32(),
        attempts = MAX_KEY_ATTEMPTS
    );
    Err(WindowError::KeyExhausted {
        window_id: window.id().as_u32(),
        attempts: MAX_KEY_ATTEMPTS,
    })
}
