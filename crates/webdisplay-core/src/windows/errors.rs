use crate::errors::WebDisplayError;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to create unique key for window {window_id} after {attempts} attempts")]
    KeyExhausted { window_id: u32, attempts: u32 },
}

impl WebDisplayError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::KeyExhausted { .. } => "WINDOW_KEY_EXHAUSTED",
        }
    }
}
