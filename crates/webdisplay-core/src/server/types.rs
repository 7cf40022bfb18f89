use std::fmt;

/// Fixed root path under which every window's connection handler is registered.
pub const REGISTRATION_ROOT: &str = "/web7gui";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which interfaces the listener accepts connections on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenAccess {
    /// Engine default, advertised as `localhost`.
    Default,
    /// Loopback interface only.
    Loopback,
    /// Explicit bind address, also used as the advertised host.
    Bind(String),
}

/// Listener configuration handed to
/// [`HttpServer::create_engine`](super::HttpServer::create_engine).
///
/// The `Display` form is the engine string understood by the server:
/// `http:8800?websocket_timeout=10000&loopback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSpec {
    pub scheme: Scheme,
    pub port: u16,
    pub websocket_timeout_ms: u32,
    pub access: ListenAccess,
    /// Certificate path, present only for https engines.
    pub cert: Option<String>,
}

impl EngineSpec {
    /// Host name clients should use to reach this engine.
    pub fn host(&self) -> &str {
        match &self.access {
            ListenAccess::Bind(addr) => addr,
            ListenAccess::Default | ListenAccess::Loopback => "localhost",
        }
    }

    /// Network address of the engine as `scheme://host:port`.
    pub fn address(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host(), self.port)
    }
}

impl fmt::Display for EngineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}?websocket_timeout={}",
            self.scheme, self.port, self.websocket_timeout_ms
        )?;
        match &self.access {
            ListenAccess::Default => {}
            ListenAccess::Loopback => f.write_str("&loopback")?,
            ListenAccess::Bind(addr) => write!(f, "&bind={}", addr)?,
        }
        if let Some(cert) = &self.cert {
            write!(f, "&ssl_cert={}", cert)?;
        }
        Ok(())
    }
}
