use crate::errors::WebDisplayError;
use crate::process::ProcessError;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("{operation} not yet implemented on {platform}")]
    Unsupported {
        operation: &'static str,
        platform: String,
    },

    #[error("Failed to launch '{program}': {message}")]
    SpawnFailed { program: String, message: String },

    #[error("Shell command failed: {message}")]
    ExecFailed { command: String, message: String },

    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl WebDisplayError for PlatformError {
    fn error_code(&self) -> &'static str {
        match self {
            PlatformError::Unsupported { .. } => "PLATFORM_UNSUPPORTED",
            PlatformError::SpawnFailed { .. } => "PLATFORM_SPAWN_FAILED",
            PlatformError::ExecFailed { .. } => "PLATFORM_EXEC_FAILED",
            PlatformError::Process(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            PlatformError::Process(e) => e.is_user_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let error = PlatformError::Unsupported {
            operation: "kill process",
            platform: "windows".to_string(),
        };
        assert_eq!(error.to_string(), "kill process not yet implemented on windows");
        assert_eq!(error.error_code(), "PLATFORM_UNSUPPORTED");
    }

    #[test]
    fn test_process_error_code_passthrough() {
        let error = PlatformError::from(ProcessError::NotFound { pid: 5 });
        assert_eq!(error.error_code(), "PROCESS_NOT_FOUND");
        assert!(error.is_user_error());
    }
}
