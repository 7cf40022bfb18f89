use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::process::ProcessRecord;
use crate::server::ConnectionHandler;

/// Unique window identifier assigned by the manager. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u32);

impl WindowId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logical display surface rendered by an external client.
///
/// Keys issued for this window map to the launch method that consumed them:
/// `"cef"`, `"qt5"`, `"pid:<n>"` or the display target string.
pub struct Window {
    id: WindowId,
    width: u32,
    height: u32,
    batch_mode: bool,
    handler: Arc<dyn ConnectionHandler>,
    keys: BTreeMap<String, String>,
    registered: bool,
}

impl Window {
    pub(crate) fn new(id: WindowId, batch_mode: bool, handler: Arc<dyn ConnectionHandler>) -> Self {
        Self {
            id,
            width: 0,
            height: 0,
            batch_mode,
            handler,
            keys: BTreeMap::new(),
            registered: false,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Requested width in pixels, 0 if unspecified.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Requested height in pixels, 0 if unspecified.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_geometry(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn is_batch_mode(&self) -> bool {
        self.batch_mode
    }

    /// Name of the connection handler, used as the window's path segment.
    pub fn connection_name(&self) -> &str {
        self.handler.name()
    }

    pub fn handler(&self) -> &Arc<dyn ConnectionHandler> {
        &self.handler
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Launch method recorded for a key.
    pub fn launch_method(&self, key: &str) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Processes spawned for this window, parsed from `pid:` records.
    pub fn process_records(&self) -> Vec<ProcessRecord> {
        self.keys
            .values()
            .filter_map(|method| ProcessRecord::parse(method))
            .collect()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub(crate) fn add_key(&mut self, key: String, method: String) {
        self.keys.insert(key, method);
    }

    pub(crate) fn set_registered(&mut self, registered: bool) {
        self.registered = registered;
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("connection", &self.connection_name())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("batch_mode", &self.batch_mode)
            .field("keys", &self.keys)
            .field("registered", &self.registered)
            .finish()
    }
}
