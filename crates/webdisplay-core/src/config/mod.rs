//! # Configuration System
//!
//! Hierarchical TOML configuration for webdisplay.
//!
//! ## Configuration Hierarchy
//!
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.webdisplay/config.toml`
//! 3. **Project config** - `./.webdisplay/config.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use webdisplay_core::config::WebDisplayConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WebDisplayConfig::load_hierarchy()?;
//!     println!("ports {}..{}", config.http.port_min, config.http.port_max);
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{BrowserSettings, DisplayConfig, HttpConfig, WebDisplayConfig};
pub use validation::{VALID_BROWSERS, validate_config};

impl WebDisplayConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }

    /// Settings for a browser, if configured.
    pub fn browser(&self, name: &str) -> Option<&BrowserSettings> {
        self.browsers.get(name)
    }
}
