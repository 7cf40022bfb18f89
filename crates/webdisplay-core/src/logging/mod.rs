use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding extra log filter directives.
pub const LOG_ENV: &str = "WEBDISPLAY_LOG";

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted.
pub fn init_logging(quiet: bool) {
    let directive = if quiet {
        "webdisplay=error"
    } else {
        "webdisplay=info"
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(""));
    let filter = match directive.parse() {
        Ok(d) => filter.add_directive(d),
        Err(_) => filter,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init()
        .ok();
}
