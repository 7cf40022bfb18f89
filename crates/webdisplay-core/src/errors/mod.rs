use std::error::Error;

/// Base trait for all webdisplay errors
pub trait WebDisplayError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid browser '{browser}'. Supported browsers: chrome, chromium, firefox")]
    InvalidBrowser { browser: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// True when the error only means a config file is absent.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::IoError { source } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

impl WebDisplayError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidBrowser { .. } => "INVALID_BROWSER",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. }
                | ConfigError::InvalidBrowser { .. }
                | ConfigError::InvalidConfiguration { .. }
        )
    }
}
