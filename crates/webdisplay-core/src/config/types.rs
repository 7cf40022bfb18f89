//! Configuration type definitions for webdisplay.
//!
//! These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [http]
//! port_min = 8800
//! port_max = 9800
//! loopback = true
//!
//! [browsers.chrome]
//! binary = "/opt/google/chrome/chrome"
//! interactive_command = "$prog --app='$url' &"
//!
//! [display]
//! default_target = "chrome"
//! wait_timeout_secs = 30.0
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.webdisplay/config.toml`
/// 2. Project config: `./.webdisplay/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WebDisplayConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Per-browser binary and command template overrides
    #[serde(default)]
    pub browsers: HashMap<String, BrowserSettings>,

    /// Display selection and wait behavior
    #[serde(default)]
    pub display: DisplayConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    /// Explicit port. 0 picks a random port in `[port_min, port_max)`,
    /// a negative value forbids creating a network listener.
    #[serde(default)]
    pub port: i32,

    /// Lower bound of the random port range (inclusive).
    #[serde(default = "super::defaults::default_port_min")]
    pub port_min: i32,

    /// Upper bound of the random port range (exclusive).
    #[serde(default = "super::defaults::default_port_max")]
    pub port_max: i32,

    /// Websocket idle timeout in milliseconds.
    #[serde(default = "super::defaults::default_ws_timeout_ms")]
    pub ws_timeout_ms: u32,

    /// Accept connections from localhost only.
    #[serde(default)]
    pub loopback: bool,

    /// Address to bind the listener to. Ignored when `loopback` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    /// Serve over https.
    #[serde(default)]
    pub use_tls: bool,

    /// Certificate file used when `use_tls` is set.
    #[serde(default = "super::defaults::default_cert")]
    pub cert: String,
}

/// Per-browser settings used in `[browsers.<name>]` sections.
///
/// # Example
///
/// ```toml
/// [browsers.firefox]
/// batch_command = "fork:-headless -no-remote -P batch_profile $url"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BrowserSettings {
    /// Browser executable, overrides the well-known install locations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,

    /// Command template used for batch (headless) windows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_command: Option<String>,

    /// Command template used for interactive windows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive_command: Option<String>,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Display target used when `show` is called with an empty target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target: Option<String>,

    /// Force every new window into batch mode.
    #[serde(default)]
    pub batch: bool,

    /// Default time limit for `wait_for` when a negative limit is passed.
    #[serde(default = "super::defaults::default_wait_timeout_secs")]
    pub wait_timeout_secs: f64,
}
