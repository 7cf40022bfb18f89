//! Minimal listener for the command line: it reserves the port and notices
//! the first client connection, but serves no content.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, warn};
use webdisplay_core::server::{
    ConnectionHandler, EngineSpec, HttpServer, ListenAccess, ServerFactory,
};

#[derive(Default)]
struct ListenerState {
    listeners: Vec<TcpListener>,
    handlers: BTreeSet<String>,
    connected: bool,
}

/// Handle shared between the manager's server and the command.
#[derive(Clone, Default)]
pub struct ReservingServer {
    state: Rc<RefCell<ListenerState>>,
}

impl ReservingServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factory(&self) -> ServerFactory {
        let server = self.clone();
        Box::new(move || Box::new(server.clone()) as Box<dyn HttpServer>)
    }

    /// Accept pending connections. True once any client has connected.
    pub fn poll_connection(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.connected {
            return true;
        }
        let accepted = state
            .listeners
            .iter()
            .any(|listener| listener.accept().is_ok());
        if accepted {
            debug!(event = "cli.server.client_connected");
            state.connected = true;
        }
        accepted
    }

    #[cfg(test)]
    pub fn handler_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }
}

fn bind_host(spec: &EngineSpec) -> &str {
    match &spec.access {
        ListenAccess::Default => "0.0.0.0",
        ListenAccess::Loopback => "127.0.0.1",
        ListenAccess::Bind(addr) => addr,
    }
}

impl HttpServer for ReservingServer {
    fn create_engine(&mut self, spec: &EngineSpec) -> bool {
        let listener = match TcpListener::bind((bind_host(spec), spec.port)) {
            Ok(listener) => listener,
            Err(e) => {
                debug!(event = "cli.server.bind_refused", engine = %spec, error = %e);
                return false;
            }
        };
        if let Err(e) = listener.set_nonblocking(true) {
            warn!(event = "cli.server.nonblocking_failed", error = %e);
            return false;
        }
        self.state.borrow_mut().listeners.push(listener);
        true
    }

    fn register(&mut self, _root: &str, handler: Arc<dyn ConnectionHandler>) -> bool {
        self.state
            .borrow_mut()
            .handlers
            .insert(handler.name().to_string())
    }

    fn unregister(&mut self, handler: &dyn ConnectionHandler) {
        self.state.borrow_mut().handlers.remove(handler.name());
    }

    fn set_terminate(&mut self) {
        self.state.borrow_mut().listeners.clear();
    }
}

/// Connection handler with a fixed name.
pub struct NamedHandler(pub String);

impl ConnectionHandler for NamedHandler {
    fn name(&self) -> &str {
        &self.0
    }
}
