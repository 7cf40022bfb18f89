//! Registry of in-process display engines available to a manager.

use std::collections::HashMap;

use tracing::debug;

use super::traits::EmbeddedBackend;
use crate::display::types::EmbeddedKind;

/// Backends keyed by engine kind. Registering a kind twice replaces the
/// earlier backend.
#[derive(Default)]
pub struct BackendRegistry {
    backends: HashMap<EmbeddedKind, Box<dyn EmbeddedBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, backend: Box<dyn EmbeddedBackend>) {
        let kind = backend.kind();
        debug!(event = "core.display.backend_registered", kind = %kind);
        self.backends.insert(kind, backend);
    }

    pub fn get(&self, kind: EmbeddedKind) -> Option<&dyn EmbeddedBackend> {
        self.backends.get(&kind).map(|b| b.as_ref())
    }

    pub fn contains(&self, kind: EmbeddedKind) -> bool {
        self.backends.contains_key(&kind)
    }
}
