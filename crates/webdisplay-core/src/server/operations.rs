//! Port selection and engine composition for the HTTP listener.

use rand::Rng;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::server::errors::ServerError;
use crate::server::traits::HttpServer;
use crate::server::types::{EngineSpec, ListenAccess, Scheme};

/// Upper bound on random port retries, independent of the range size.
pub const MAX_BIND_RETRIES: i32 = 100;

/// Exclusive upper bound of TCP port numbers.
const PORT_LIMIT: i32 = 1 << 16;

/// Number of bind attempts for the configured range.
///
/// One initial attempt plus `min(100, max - min)` retries. An explicit port
/// always gets at least its own attempt.
pub fn bind_attempts(http: &HttpConfig) -> u32 {
    if http.port > 0 && !is_valid_range(http) {
        return 1;
    }
    let retries = MAX_BIND_RETRIES.min(http.port_max.saturating_sub(http.port_min));
    let attempts = u32::try_from(retries.saturating_add(1)).unwrap_or(0);
    if http.port > 0 { attempts.max(1) } else { attempts }
}

/// Whether the random port range holds at least one TCP port.
pub fn is_valid_range(http: &HttpConfig) -> bool {
    http.port_min > 0 && http.port_max > http.port_min && http.port_min < PORT_LIMIT
}

/// Draw a candidate port uniformly from `[port_min, port_max)`.
///
/// The part of the range above the last TCP port is never drawn.
pub fn draw_port<R: Rng + ?Sized>(http: &HttpConfig, rng: &mut R) -> Result<u16, ServerError> {
    let invalid = || ServerError::InvalidPortRange {
        min: http.port_min,
        max: http.port_max,
    };
    if !is_valid_range(http) {
        return Err(invalid());
    }
    let port = rng.random_range(http.port_min..http.port_max.min(PORT_LIMIT));
    u16::try_from(port).map_err(|_| invalid())
}

/// Compose the engine configuration for one bind attempt.
pub fn compose_engine_spec(http: &HttpConfig, port: u16) -> EngineSpec {
    let scheme = if http.use_tls {
        Scheme::Https
    } else {
        Scheme::Http
    };

    let access = if http.loopback {
        ListenAccess::Loopback
    } else if let Some(addr) = http.bind_address() {
        ListenAccess::Bind(addr.to_string())
    } else {
        ListenAccess::Default
    };

    EngineSpec {
        scheme,
        port,
        websocket_timeout_ms: http.ws_timeout_ms,
        access,
        cert: http.use_tls.then(|| http.cert.clone()),
    }
}

/// Bind a network engine on the server, retrying over the port range.
///
/// Each failed attempt draws a fresh candidate. Draws are independent, so a
/// port that already failed may be drawn again.
pub fn bind_engine<R: Rng + ?Sized>(
    http: &HttpConfig,
    server: &mut dyn HttpServer,
    rng: &mut R,
) -> Result<EngineSpec, ServerError> {
    if http.port < 0 {
        return Err(ServerError::ListenerRefused { port: http.port });
    }

    if http.port == 0 && !is_valid_range(http) {
        return Err(ServerError::InvalidPortRange {
            min: http.port_min,
            max: http.port_max,
        });
    }

    let attempts = bind_attempts(http);
    let mut explicit = if http.port > 0 {
        Some(
            u16::try_from(http.port)
                .map_err(|_| ServerError::ListenerRefused { port: http.port })?,
        )
    } else {
        None
    };

    for attempt in 1..=attempts {
        let port = match explicit.take() {
            Some(port) => port,
            None => draw_port(http, rng)?,
        };

        let spec = compose_engine_spec(http, port);
        debug!(
            event = "core.server.bind_attempt",
            attempt,
            attempts,
            engine = %spec
        );

        if server.create_engine(&spec) {
            return Ok(spec);
        }
    }

    warn!(event = "core.server.bind_exhausted", attempts);
    Err(ServerError::BindRetriesExhausted { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::traits::ConnectionHandler;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    /// Server that refuses the first `failures` engines and records every attempt.
    struct FlakyServer {
        failures: usize,
        attempts: Vec<EngineSpec>,
    }

    impl FlakyServer {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                attempts: Vec::new(),
            }
        }
    }

    impl HttpServer for FlakyServer {
        fn create_engine(&mut self, spec: &EngineSpec) -> bool {
            self.attempts.push(spec.clone());
            self.attempts.len() > self.failures
        }

        fn register(&mut self, _root: &str, _handler: Arc<dyn ConnectionHandler>) -> bool {
            true
        }

        fn unregister(&mut self, _handler: &dyn ConnectionHandler) {}

        fn set_terminate(&mut self) {}
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_bind_attempts() {
        let mut http = HttpConfig::default();
        assert_eq!(bind_attempts(&http), 101);

        http.port_min = 9000;
        http.port_max = 9010;
        assert_eq!(bind_attempts(&http), 11);

        http.port_max = 8000;
        assert_eq!(bind_attempts(&http), 0);

        http.port = 8088;
        assert_eq!(bind_attempts(&http), 1);
    }

    #[test]
    fn test_port_within_range_for_many_ranges() {
        let mut rng = rng();
        for (min, max) in [(8800, 9800), (1, 2), (40000, 40003), (65000, 65536)] {
            let http = HttpConfig {
                port_min: min,
                port_max: max,
                ..Default::default()
            };
            let mut server = FlakyServer::new(0);
            let spec = bind_engine(&http, &mut server, &mut rng).unwrap();
            let port = i32::from(spec.port);
            assert!(port >= min && port < max, "{} not in [{}, {})", port, min, max);
        }
    }

    #[test]
    fn test_range_past_last_port_draws_usable_ports() {
        let http = HttpConfig {
            port_min: 65000,
            port_max: 70000,
            ..Default::default()
        };
        for seed in 0..20 {
            let mut server = FlakyServer::new(0);
            let mut rng = StdRng::seed_from_u64(seed);
            let spec = bind_engine(&http, &mut server, &mut rng).unwrap();
            assert!(spec.port >= 65000);
            assert_eq!(server.attempts.len(), 1);
        }
    }

    #[test]
    fn test_range_entirely_past_last_port_is_invalid() {
        let http = HttpConfig {
            port_min: 70000,
            port_max: 70010,
            ..Default::default()
        };
        let mut server = FlakyServer::new(0);
        let result = bind_engine(&http, &mut server, &mut rng());
        assert!(matches!(result, Err(ServerError::InvalidPortRange { .. })));
        assert!(server.attempts.is_empty());
    }

    #[test]
    fn test_negative_port_never_binds() {
        let http = HttpConfig {
            port: -1,
            ..Default::default()
        };
        let mut server = FlakyServer::new(0);
        let result = bind_engine(&http, &mut server, &mut rng());
        assert!(matches!(result, Err(ServerError::ListenerRefused { port: -1 })));
        assert!(server.attempts.is_empty());
    }

    #[test]
    fn test_invalid_range_fails_without_bind() {
        let http = HttpConfig {
            port_min: 0,
            port_max: 100,
            ..Default::default()
        };
        let mut server = FlakyServer::new(0);
        let result = bind_engine(&http, &mut server, &mut rng());
        assert!(matches!(result, Err(ServerError::InvalidPortRange { .. })));
        assert!(server.attempts.is_empty());
    }

    #[test]
    fn test_retries_until_success() {
        let http = HttpConfig::default();
        let mut server = FlakyServer::new(3);
        let spec = bind_engine(&http, &mut server, &mut rng()).unwrap();
        assert_eq!(server.attempts.len(), 4);
        assert_eq!(server.attempts.last(), Some(&spec));
    }

    #[test]
    fn test_exhausted_retries() {
        let http = HttpConfig {
            port_min: 9000,
            port_max: 9005,
            ..Default::default()
        };
        let mut server = FlakyServer::new(usize::MAX);
        let result = bind_engine(&http, &mut server, &mut rng());
        assert!(matches!(
            result,
            Err(ServerError::BindRetriesExhausted { attempts: 6 })
        ));
        assert_eq!(server.attempts.len(), 6);
    }

    #[test]
    fn test_explicit_port_first_then_random() {
        let http = HttpConfig {
            port: 8088,
            ..Default::default()
        };
        let mut server = FlakyServer::new(1);
        let spec = bind_engine(&http, &mut server, &mut rng()).unwrap();
        assert_eq!(server.attempts[0].port, 8088);
        assert!((8800..9800).contains(&spec.port));
    }

    #[test]
    fn test_compose_loopback_wins_over_bind() {
        let http = HttpConfig {
            loopback: true,
            bind: Some("10.1.1.1".to_string()),
            ..Default::default()
        };
        let spec = compose_engine_spec(&http, 9001);
        assert_eq!(spec.access, ListenAccess::Loopback);
        assert_eq!(spec.address(), "http://localhost:9001");
    }

    #[test]
    fn test_compose_tls_carries_cert() {
        let http = HttpConfig {
            use_tls: true,
            ..Default::default()
        };
        let spec = compose_engine_spec(&http, 9443);
        assert_eq!(
            spec.to_string(),
            "https:9443?websocket_timeout=10000&ssl_cert=rootserver.pem"
        );
    }
}
