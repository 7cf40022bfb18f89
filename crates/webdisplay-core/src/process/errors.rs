use crate::errors::WebDisplayError;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Process '{pid}' not found")]
    NotFound { pid: u32 },

    #[error("Failed to kill process '{pid}': {message}")]
    KillFailed { pid: u32, message: String },

    #[error("Invalid PID: {pid}")]
    InvalidPid { pid: u32 },
}

impl WebDisplayError for ProcessError {
    fn error_code(&self) -> &'static str {
        match self {
            ProcessError::NotFound { .. } => "PROCESS_NOT_FOUND",
            ProcessError::KillFailed { .. } => "PROCESS_KILL_FAILED",
            ProcessError::InvalidPid { .. } => "PROCESS_INVALID_PID",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ProcessError::NotFound { .. } | ProcessError::InvalidPid { .. }
        )
    }
}
