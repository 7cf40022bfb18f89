//! Default implementations for configuration types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use crate::config::types::{DisplayConfig, HttpConfig};

/// Returns the default lower bound of the random port range (8800).
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_port_min() -> i32 {
    8800
}

/// Returns the default upper bound of the random port range (9800).
pub fn default_port_max() -> i32 {
    9800
}

/// Returns the default websocket idle timeout in milliseconds (10000ms).
pub fn default_ws_timeout_ms() -> u32 {
    10_000
}

/// Returns the default TLS certificate file name.
pub fn default_cert() -> String {
    "rootserver.pem".to_string()
}

/// Returns the default `wait_for` time limit in seconds (100s).
pub fn default_wait_timeout_secs() -> f64 {
    100.0
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 0,
            port_min: default_port_min(),
            port_max: default_port_max(),
            ws_timeout_ms: default_ws_timeout_ms(),
            loopback: false,
            bind: None,
            use_tls: false,
            cert: default_cert(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_target: None,
            batch: false,
            wait_timeout_secs: default_wait_timeout_secs(),
        }
    }
}

impl HttpConfig {
    /// Bind address, treating an empty string as unset.
    pub fn bind_address(&self) -> Option<&str> {
        self.bind.as_deref().filter(|addr| !addr.is_empty())
    }
}
