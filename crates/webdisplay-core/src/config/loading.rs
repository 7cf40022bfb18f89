//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.webdisplay/config.toml` (global user preferences)
//! 3. **Project config** - `./.webdisplay/config.toml` (project-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)

use crate::config::types::{DisplayConfig, HttpConfig, WebDisplayConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR: &str = ".webdisplay";
const CONFIG_FILE: &str = "config.toml";

/// Path of the user configuration file, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Path of the project configuration file relative to the current directory.
pub fn project_config_path() -> Result<PathBuf, ConfigError> {
    Ok(std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file cannot be parsed or validation fails.
/// Missing config files are not errors.
pub fn load_hierarchy() -> Result<WebDisplayConfig, ConfigError> {
    let user = user_config_path();
    let project = project_config_path()?;
    load_from_paths(user.as_deref(), &project)
}

/// Load and merge a user file and a project file, then validate.
pub fn load_from_paths(
    user: Option<&Path>,
    project: &Path,
) -> Result<WebDisplayConfig, ConfigError> {
    let mut config = WebDisplayConfig::default();

    if let Some(user_path) = user
        && let Some(user_config) = load_optional(user_path)?
    {
        config = merge_configs(config, user_config);
    }

    if let Some(project_config) = load_optional(project)? {
        config = merge_configs(config, project_config);
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load a config file, mapping "file not found" to `None`.
fn load_optional(path: &Path) -> Result<Option<WebDisplayConfig>, ConfigError> {
    match load_config_file(path) {
        Ok(config) => {
            debug!(event = "core.config.file_loaded", path = %path.display());
            Ok(Some(config))
        }
        Err(e) if e.is_not_found() => {
            debug!(event = "core.config.file_missing", path = %path.display());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<WebDisplayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Take the override value unless it is still the built-in default.
fn pick<T: PartialEq>(base: T, over: T, default: T) -> T {
    if over != default { over } else { base }
}

/// Merge two configurations, with override_config taking precedence.
///
/// Optional fields are replaced only when present in the override. Scalar
/// fields are replaced only when the override differs from the built-in
/// default, so a project file without an `[http]` section keeps the user's
/// port range. Browser entries merge per name, override first.
pub fn merge_configs(
    base: WebDisplayConfig,
    override_config: WebDisplayConfig,
) -> WebDisplayConfig {
    let http_default = HttpConfig::default();
    let display_default = DisplayConfig::default();
    let (b, o) = (base.http, override_config.http);

    WebDisplayConfig {
        http: HttpConfig {
            port: pick(b.port, o.port, http_default.port),
            port_min: pick(b.port_min, o.port_min, http_default.port_min),
            port_max: pick(b.port_max, o.port_max, http_default.port_max),
            ws_timeout_ms: pick(b.ws_timeout_ms, o.ws_timeout_ms, http_default.ws_timeout_ms),
            loopback: o.loopback || b.loopback,
            bind: o.bind.or(b.bind),
            use_tls: o.use_tls || b.use_tls,
            cert: pick(b.cert, o.cert, http_default.cert),
        },
        browsers: {
            let mut merged = base.browsers;
            for (name, settings) in override_config.browsers {
                let entry = merged.entry(name).or_default();
                entry.binary = settings.binary.or(entry.binary.take());
                entry.batch_command = settings.batch_command.or(entry.batch_command.take());
                entry.interactive_command = settings
                    .interactive_command
                    .or(entry.interactive_command.take());
            }
            merged
        },
        display: DisplayConfig {
            default_target: override_config
                .display
                .default_target
                .or(base.display.default_target),
            batch: override_config.display.batch || base.display.batch,
            wait_timeout_secs: pick(
                base.display.wait_timeout_secs,
                override_config.display.wait_timeout_secs,
                display_default.wait_timeout_secs,
            ),
        },
    }
}
