//! Configuration validation logic.

use crate::config::types::WebDisplayConfig;
use crate::errors::ConfigError;

/// Browser names accepted in `[browsers.<name>]` sections.
pub const VALID_BROWSERS: [&str; 3] = ["chrome", "chromium", "firefox"];

/// Validate a WebDisplayConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - With an automatic port (`port = 0`) the range must satisfy `0 < port_min < port_max`
/// - `port_max` must fit in a TCP port
/// - Browser sections must name a known browser
/// - Configured command templates must not be blank
/// - The default wait timeout must not be negative
pub fn validate_config(config: &WebDisplayConfig) -> Result<(), ConfigError> {
    let http = &config.http;

    if http.port == 0 && (http.port_min <= 0 || http.port_max <= http.port_min) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "Invalid HTTP port range [{}, {}), check http.port_min/port_max",
                http.port_min, http.port_max
            ),
        });
    }

    if http.port > i32::from(u16::MAX) || http.port_max > i32::from(u16::MAX) + 1 {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "HTTP port settings out of range (port = {}, port_max = {})",
                http.port, http.port_max
            ),
        });
    }

    for (name, settings) in &config.browsers {
        if !VALID_BROWSERS.contains(&name.as_str()) {
            return Err(ConfigError::InvalidBrowser {
                browser: name.clone(),
            });
        }

        let templates = [&settings.batch_command, &settings.interactive_command];
        if templates
            .iter()
            .any(|t| t.as_deref().is_some_and(|cmd| cmd.trim().is_empty()))
        {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("Empty command template for browser '{}'", name),
            });
        }
    }

    if config.display.wait_timeout_secs < 0.0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "display.wait_timeout_secs must not be negative".to_string(),
        });
    }

    Ok(())
}
