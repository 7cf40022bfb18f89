//! webdisplay-core: Core library for showing web windows in browsers and
//! embedded engines
//!
//! A [`Manager`] owns the HTTP/WebSocket listener, assigns window ids and
//! one-time keys, launches the display client for a window and terminates
//! the clients it spawned. The server itself is supplied by the caller
//! through the [`server::HttpServer`] trait.
//!
//! # Main Entry Points
//!
//! - [`manager`] - Create windows, show them, wait for clients
//! - [`display`] - Target resolution, browsers, command templates
//! - [`server`] - Port binding and engine configuration
//! - [`config`] - Configuration management
//! - [`process`] - Terminating spawned clients

pub mod config;
pub mod display;
pub mod errors;
pub mod events;
pub mod logging;
pub mod manager;
pub mod platform;
pub mod process;
pub mod server;
pub mod wait;
pub mod windows;

// Re-export commonly used types at crate root for convenience
pub use config::WebDisplayConfig;
pub use display::{
    DisplayError, DisplayTarget, EmbeddedBackend, EmbeddedKind, LaunchMethod, LaunchOutcome,
};
pub use errors::WebDisplayError;
pub use manager::{Manager, ManagerBuilder};
pub use platform::{Platform, PlatformError, SystemPlatform};
pub use server::{ConnectionHandler, EngineSpec, HttpServer, ServerError};
pub use wait::{HostEvents, NoopHost};
pub use windows::{Window, WindowId};

// Re-export logging initialization
pub use logging::init_logging;
