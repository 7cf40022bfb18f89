//! Embedded display backend trait definition.

use crate::display::types::EmbeddedKind;
use crate::server::HttpServer;

/// Everything an in-process engine needs to open a window.
pub struct EmbeddedLaunch<'a> {
    /// Server-relative window URL including the key.
    pub url: &'a str,
    /// The manager's server, for engines that serve requests in-process.
    pub server: &'a mut dyn HttpServer,
    pub batch_mode: bool,
    pub width: u32,
    pub height: u32,
    /// Engine resource directory (`CEF_PATH` for cef).
    pub resource_path: Option<&'a str>,
    /// Installation root (`WEBDISPLAY_SYS`).
    pub install_root: Option<&'a str>,
}

/// Trait implemented by in-process display engines.
///
/// Engines are registered with the manager at runtime; a missing engine is
/// simply skipped during target resolution.
pub trait EmbeddedBackend {
    /// Which engine this backend provides.
    fn kind(&self) -> EmbeddedKind;

    /// Open the window. Returns false if the engine could not display it.
    fn launch(&self, request: EmbeddedLaunch<'_>) -> bool;
}
