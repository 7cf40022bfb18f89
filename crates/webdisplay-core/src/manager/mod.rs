//! The window manager: owns the listener, hands out window ids and keys,
//! launches display clients and reaps the ones it spawned.
//!
//! One manager per process is the convention. It is driven from the
//! thread running the host event loop and is not shared across threads.

mod show;

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use crate::config::WebDisplayConfig;
use crate::display::{BackendRegistry, EmbeddedBackend};
use crate::platform::{Platform, PlatformError, SystemPlatform};
use crate::process;
use crate::server::{
    ConnectionHandler, HttpServer, REGISTRATION_ROOT, ServerError, ServerFactory, bind_engine,
};
use crate::wait::{self, HostEvents, NoopHost};
use crate::windows::{self, Window, WindowId};

pub struct Manager {
    config: WebDisplayConfig,
    server_factory: ServerFactory,
    server: Option<Box<dyn HttpServer>>,
    address: Option<String>,
    next_id: u32,
    rng: StdRng,
    platform: Box<dyn Platform>,
    host: Box<dyn HostEvents>,
    backends: BackendRegistry,
}

/// Builder for [`Manager`]. Platform and host default to the real OS and
/// a host without an event queue.
pub struct ManagerBuilder {
    config: WebDisplayConfig,
    server_factory: ServerFactory,
    platform: Option<Box<dyn Platform>>,
    host: Option<Box<dyn HostEvents>>,
    backends: BackendRegistry,
    rng_seed: Option<u64>,
}

impl ManagerBuilder {
    pub fn platform(mut self, platform: impl Platform + 'static) -> Self {
        self.platform = Some(Box::new(platform));
        self
    }

    pub fn host(mut self, host: impl HostEvents + 'static) -> Self {
        self.host = Some(Box::new(host));
        self
    }

    pub fn backend(mut self, backend: impl EmbeddedBackend + 'static) -> Self {
        self.backends.register(Box::new(backend));
        self
    }

    /// Seed key and port draws, for reproducible runs.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn build(self) -> Manager {
        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Manager {
            config: self.config,
            server_factory: self.server_factory,
            server: None,
            address: None,
            next_id: 0,
            rng,
            platform: self
                .platform
                .unwrap_or_else(|| Box::new(SystemPlatform::new())),
            host: self.host.unwrap_or_else(|| Box::new(NoopHost)),
            backends: self.backends,
        }
    }
}

impl Manager {
    pub fn builder(config: WebDisplayConfig, server_factory: ServerFactory) -> ManagerBuilder {
        ManagerBuilder {
            config,
            server_factory,
            platform: None,
            host: None,
            backends: BackendRegistry::new(),
            rng_seed: None,
        }
    }

    pub fn config(&self) -> &WebDisplayConfig {
        &self.config
    }

    /// Whether the listener instance has been created.
    pub fn has_server(&self) -> bool {
        self.server.is_some()
    }

    /// Network address `scheme://host:port`, once a network engine is bound.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    /// Make sure the listener exists and, if requested, is bound to the network.
    ///
    /// Creating the listener never touches the network. Once bound, the
    /// address is fixed for the manager's lifetime.
    pub fn ensure_server(&mut self, require_network: bool) -> Result<(), ServerError> {
        if self.server.is_none() {
            debug!(event = "core.server.create_started");
            self.server = Some((self.server_factory)());
        }

        if !require_network || self.address.is_some() {
            return Ok(());
        }

        let Some(server) = self.server.as_deref_mut() else {
            return Err(ServerError::NoListener);
        };

        info!(event = "core.server.bind_started", port = self.config.http.port);

        match bind_engine(&self.config.http, server, &mut self.rng) {
            Ok(spec) => {
                let address = spec.address();
                info!(
                    event = "core.server.bind_completed",
                    engine = %spec,
                    address = address.as_str()
                );
                self.address = Some(address);
                Ok(())
            }
            Err(e) => {
                error!(event = "core.server.bind_failed", error = %e);
                Err(e)
            }
        }
    }

    /// Create a window and register its connection handler.
    ///
    /// `display.batch` in the config forces batch mode for every window.
    pub fn create_window(
        &mut self,
        batch_mode: bool,
        handler: Arc<dyn ConnectionHandler>,
    ) -> Result<Window, ServerError> {
        self.ensure_server(false)?;

        let Some(server) = self.server.as_deref_mut() else {
            return Err(ServerError::NoListener);
        };

        self.next_id += 1;
        let id = WindowId::new(self.next_id);
        let batch_mode = batch_mode || self.config.display.batch;
        let mut window = Window::new(id, batch_mode, handler.clone());

        if !server.register(REGISTRATION_ROOT, handler) {
            error!(
                event = "core.window.register_failed",
                window_id = id.as_u32(),
                name = window.connection_name()
            );
            return Err(ServerError::RegisterFailed {
                name: window.connection_name().to_string(),
            });
        }
        window.set_registered(true);

        info!(
            event = "core.window.create_completed",
            window_id = id.as_u32(),
            name = window.connection_name(),
            batch_mode
        );
        Ok(window)
    }

    /// Unregister a window's handler and halt the clients spawned for it.
    ///
    /// Calling this again for the same window does nothing.
    pub fn unregister(&mut self, window: &mut Window) {
        if !window.is_registered() {
            debug!(
                event = "core.window.unregister_skipped",
                window_id = window.id().as_u32()
            );
            return;
        }

        if let Some(server) = self.server.as_deref_mut() {
            server.unregister(window.handler().as_ref());
        }
        window.set_registered(false);

        for record in window.process_records() {
            if let Err(e) = process::halt_client(&record.to_string(), self.platform.as_ref()) {
                warn!(
                    event = "core.window.halt_failed",
                    window_id = window.id().as_u32(),
                    pid = record.pid(),
                    error = %e
                );
            }
        }

        info!(
            event = "core.window.unregister_completed",
            window_id = window.id().as_u32()
        );
    }

    /// URL of a window, without key.
    ///
    /// With `remote`, a network engine is bound if needed and the URL is
    /// prefixed with its address.
    pub fn window_url(&mut self, window: &Window, remote: bool) -> Result<String, ServerError> {
        if self.server.is_none() {
            error!(
                event = "core.window.url_failed",
                window_id = window.id().as_u32(),
                reason = "no listener"
            );
            return Err(ServerError::NoListener);
        }

        let path = windows::window_path(window);
        if !remote {
            return Ok(path);
        }

        self.ensure_server(true)?;
        match self.address.as_deref() {
            Some(address) => Ok(windows::qualify(address, &path)),
            None => Err(ServerError::NoListener),
        }
    }

    /// Terminate a client from its launch record. Only `pid:` records act.
    pub fn halt_client(&self, record: &str) -> Result<(), PlatformError> {
        process::halt_client(record, self.platform.as_ref())
    }

    /// Poll `predicate` while driving the host event loop.
    ///
    /// A negative `time_limit` uses `display.wait_timeout_secs`.
    pub fn wait_for<F>(&mut self, predicate: F, time_limit: f64) -> i32
    where
        F: FnMut(f64) -> i32,
    {
        wait::wait_for(
            self.host.as_mut(),
            predicate,
            time_limit,
            self.config.display.wait_timeout_secs,
        )
    }

    /// Stop the server and ask the host to leave its event loop.
    pub fn terminate(&mut self) {
        info!(event = "core.manager.terminate_started");
        if let Some(server) = self.server.as_deref_mut() {
            server.set_terminate();
        }
        self.host.request_shutdown();
    }
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::test_support::MockServer;
    use super::*;
    use crate::platform::test_support::MockPlatform;
    use crate::windows::types::test_support::NamedHandler;

    fn handler(name: &str) -> Arc<dyn ConnectionHandler> {
        Arc::new(NamedHandler(name.to_string()))
    }

    fn manager(server: &MockServer, platform: &MockPlatform) -> Manager {
        Manager::builder(WebDisplayConfig::default(), server.factory())
            .platform(platform.clone())
            .rng_seed(7)
            .build()
    }

    #[test]
    fn test_listener_created_lazily_without_network() {
        let server = MockServer::default();
        let mut mgr = manager(&server, &MockPlatform::linux());
        assert!(!mgr.has_server());

        mgr.ensure_server(false).unwrap();
        mgr.ensure_server(false).unwrap();

        assert!(mgr.has_server());
        assert!(mgr.address().is_none());
        assert_eq!(server.state.borrow().created, 1);
        assert!(server.state.borrow().engines.is_empty());
    }

    #[test]
    fn test_address_fixed_after_first_bind() {
        let server = MockServer::refusing(3);
        let mut mgr = manager(&server, &MockPlatform::linux());

        mgr.ensure_server(true).unwrap();
        let address = mgr.address().unwrap().to_string();
        assert!(address.starts_with("http://localhost:"));

        mgr.ensure_server(true).unwrap();
        assert_eq!(mgr.address(), Some(address.as_str()));
        assert_eq!(server.state.borrow().engines.len(), 4);
    }

    #[test]
    fn test_negative_port_refused() {
        let server = MockServer::default();
        let mut config = WebDisplayConfig::default();
        config.http.port = -1;
        let mut mgr = Manager::builder(config, server.factory())
            .platform(MockPlatform::linux())
            .build();

        let result = mgr.ensure_server(true);
        assert!(matches!(result, Err(ServerError::ListenerRefused { port: -1 })));
        assert!(mgr.has_server());
        assert!(mgr.address().is_none());
        assert!(server.state.borrow().engines.is_empty());
    }

    #[test]
    fn test_window_ids_strictly_increase() {
        let server = MockServer::default();
        let mut mgr = manager(&server, &MockPlatform::linux());

        let first = mgr.create_window(false, handler("a")).unwrap();
        let second = mgr.create_window(false, handler("b")).unwrap();

        assert_eq!(first.id().as_u32(), 1);
        assert!(second.id() > first.id());
        assert_eq!(
            server.state.borrow().registered,
            vec!["/web7gui/a".to_string(), "/web7gui/b".to_string()]
        );
    }

    #[test]
    fn test_config_forces_batch_mode() {
        let server = MockServer::default();
        let mut config = WebDisplayConfig::default();
        config.display.batch = true;
        let mut mgr = Manager::builder(config, server.factory())
            .platform(MockPlatform::linux())
            .build();

        let window = mgr.create_window(false, handler("w")).unwrap();
        assert!(window.is_batch_mode());
    }

    #[test]
    fn test_unregister_once_and_reaps_pids() {
        let server = MockServer::default();
        let platform = MockPlatform::linux();
        let mut mgr = manager(&server, &platform);

        let mut window = mgr.create_window(false, handler("w")).unwrap();
        window.add_key("1".to_string(), "pid:4321".to_string());
        window.add_key("2".to_string(), "firefox".to_string());
        window.add_key("3".to_string(), "qt5".to_string());

        mgr.unregister(&mut window);
        mgr.unregister(&mut window);

        assert_eq!(server.state.borrow().unregistered, vec!["w".to_string()]);
        assert_eq!(platform.killed(), vec![4321]);
        assert!(!window.is_registered());
    }

    #[test]
    fn test_unregister_without_pids_reaps_nothing() {
        let server = MockServer::default();
        let platform = MockPlatform::linux();
        let mut mgr = manager(&server, &platform);

        let mut window = mgr.create_window(false, handler("w")).unwrap();
        window.add_key("1".to_string(), "browser".to_string());
        mgr.unregister(&mut window);

        assert!(platform.killed().is_empty());
    }

    #[test]
    fn test_unregister_logs_halt_failure() {
        let server = MockServer::default();
        let platform = MockPlatform::windows();
        let mut mgr = manager(&server, &platform);

        let mut window = mgr.create_window(false, handler("w")).unwrap();
        window.add_key("1".to_string(), "pid:55".to_string());
        mgr.unregister(&mut window);

        assert!(!window.is_registered());
        assert!(platform.killed().is_empty());
    }

    #[test]
    fn test_window_url_local_and_remote() {
        let server = MockServer::default();
        let mut mgr = manager(&server, &MockPlatform::linux());
        let window = mgr.create_window(true, handler("w")).unwrap();

        let local = mgr.window_url(&window, false).unwrap();
        assert_eq!(local, "/web7gui/w/?batch_mode");
        assert!(mgr.address().is_none());

        let remote = mgr.window_url(&window, true).unwrap();
        let address = mgr.address().unwrap();
        assert_eq!(remote, format!("{}{}", address, local));
    }

    #[test]
    fn test_window_url_requires_listener() {
        let server = MockServer::default();
        let mut mgr = manager(&server, &MockPlatform::linux());
        let window = crate::windows::types::test_support::window(1, false);

        assert!(matches!(
            mgr.window_url(&window, false),
            Err(ServerError::NoListener)
        ));
    }

    #[test]
    fn test_window_url_remote_bind_failure() {
        let server = MockServer::refusing(usize::MAX);
        let mut mgr = manager(&server, &MockPlatform::linux());
        let window = mgr.create_window(false, handler("w")).unwrap();

        assert!(matches!(
            mgr.window_url(&window, true),
            Err(ServerError::BindRetriesExhausted { attempts: 101 })
        ));
        assert!(mgr.address().is_none());
    }

    #[test]
    fn test_manager_halt_client() {
        let server = MockServer::default();
        let platform = MockPlatform::linux();
        let mgr = manager(&server, &platform);

        mgr.halt_client("notapid").unwrap();
        mgr.halt_client("pid:-1").unwrap();
        mgr.halt_client("pid:1234").unwrap();
        assert_eq!(platform.killed(), vec![1234]);
    }

    struct ShutdownHost {
        drained: Rc<Cell<u32>>,
        shutdown: Rc<Cell<bool>>,
    }

    impl HostEvents for ShutdownHost {
        fn process_events(&mut self) {
            self.drained.set(self.drained.get() + 1);
        }

        fn request_shutdown(&mut self) {
            self.shutdown.set(true);
        }
    }

    #[test]
    fn test_wait_drives_host_and_terminate_stops_everything() {
        let server = MockServer::default();
        let drained = Rc::new(Cell::new(0));
        let shutdown = Rc::new(Cell::new(false));
        let mut mgr = Manager::builder(WebDisplayConfig::default(), server.factory())
            .platform(MockPlatform::linux())
            .host(ShutdownHost {
                drained: drained.clone(),
                shutdown: shutdown.clone(),
            })
            .build();

        let mut polls = 0;
        let result = mgr.wait_for(
            |_| {
                polls += 1;
                if polls == 3 { 2 } else { 0 }
            },
            5.0,
        );
        assert_eq!(result, 2);
        assert_eq!(drained.get(), 2);

        mgr.ensure_server(false).unwrap();
        mgr.terminate();
        assert!(server.state.borrow().terminated);
        assert!(shutdown.get());
    }
}
