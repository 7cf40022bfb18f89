//! Interfaces of the HTTP/WebSocket server and its connection handlers.
//!
//! The server itself lives outside this crate; the manager only drives it
//! through these traits.

use std::sync::Arc;

use crate::server::types::EngineSpec;

/// Per-window websocket handler owned by the window's content logic.
pub trait ConnectionHandler {
    /// Name under which the handler is registered, unique per server.
    fn name(&self) -> &str;
}

/// The HTTP/WebSocket server a manager owns.
pub trait HttpServer {
    /// Try to start a network engine. Returns false if the port could not be bound.
    fn create_engine(&mut self, spec: &EngineSpec) -> bool;

    /// Register a window's connection handler below `root`.
    fn register(&mut self, root: &str, handler: Arc<dyn ConnectionHandler>) -> bool;

    /// Remove a previously registered handler.
    fn unregister(&mut self, handler: &dyn ConnectionHandler);

    /// Ask the server to stop serving.
    fn set_terminate(&mut self);
}

/// Builds the server instance the first time the manager needs one.
pub type ServerFactory = Box<dyn FnMut() -> Box<dyn HttpServer>>;
