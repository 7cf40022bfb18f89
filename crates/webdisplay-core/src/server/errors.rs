use crate::errors::WebDisplayError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Server instance does not exist")]
    NoListener,

    #[error("Not allowed to create real HTTP server, check http.port ({port})")]
    ListenerRefused { port: i32 },

    #[error("Wrong HTTP port range [{min}, {max}), check http.port_min/port_max")]
    InvalidPortRange { min: i32, max: i32 },

    #[error("Failed to bind HTTP listener after {attempts} attempts")]
    BindRetriesExhausted { attempts: u32 },

    #[error("Failed to register connection handler '{name}'")]
    RegisterFailed { name: String },
}

impl WebDisplayError for ServerError {
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::NoListener => "SERVER_NO_LISTENER",
            ServerError::ListenerRefused { .. } => "SERVER_LISTENER_REFUSED",
            ServerError::InvalidPortRange { .. } => "SERVER_INVALID_PORT_RANGE",
            ServerError::BindRetriesExhausted { .. } => "SERVER_BIND_RETRIES_EXHAUSTED",
            ServerError::RegisterFailed { .. } => "SERVER_REGISTER_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ServerError::ListenerRefused { .. } | ServerError::InvalidPortRange { .. }
        )
    }
}
