use crate::errors::WebDisplayError;
use crate::platform::PlatformError;
use crate::server::ServerError;
use crate::windows::WindowError;

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Server instance does not exist, cannot display window")]
    NoListener,

    #[error("Display target '{target}' cannot show a batch-mode window")]
    BatchNotSupported { target: String },

    #[error("DISPLAY environment variable is not set, required for batch mode")]
    DisplayVariableMissing,

    #[error("Browser '{browser}' not found. Set browsers.{browser}.binary in config")]
    BrowserNotFound { browser: String },

    #[error("Invalid command template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl WebDisplayError for DisplayError {
    fn error_code(&self) -> &'static str {
        match self {
            DisplayError::NoListener => "DISPLAY_NO_LISTENER",
            DisplayError::BatchNotSupported { .. } => "DISPLAY_BATCH_NOT_SUPPORTED",
            DisplayError::DisplayVariableMissing => "DISPLAY_VARIABLE_MISSING",
            DisplayError::BrowserNotFound { .. } => "DISPLAY_BROWSER_NOT_FOUND",
            DisplayError::InvalidTemplate { .. } => "DISPLAY_INVALID_TEMPLATE",
            DisplayError::Window(e) => e.error_code(),
            DisplayError::Server(e) => e.error_code(),
            DisplayError::Platform(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            DisplayError::BatchNotSupported { .. }
            | DisplayError::DisplayVariableMissing
            | DisplayError::BrowserNotFound { .. }
            | DisplayError::InvalidTemplate { .. } => true,
            DisplayError::Server(e) => e.is_user_error(),
            _ => false,
        }
    }
}
