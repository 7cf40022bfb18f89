//! Lifecycle events emitted once per front-end command.

use tracing::{error, info, warn};

use crate::errors::WebDisplayError;

pub fn log_command_started(command: &str) {
    info!(
        event = "core.webdisplay.command_started",
        command,
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_command_finished(command: &str, succeeded: bool) {
    info!(event = "core.webdisplay.command_finished", command, succeeded);
}

/// Log a failed operation. User errors (bad targets, refused ports) are
/// warnings; everything else is an error.
pub fn log_command_error(error: &dyn WebDisplayError) {
    if error.is_user_error() {
        warn!(
            event = "core.webdisplay.command_rejected",
            error = %error,
            error_code = error.error_code()
        );
    } else {
        error!(
            event = "core.webdisplay.command_failed",
            error = %error,
            error_code = error.error_code()
        );
    }
}
