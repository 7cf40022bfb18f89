//! Cooperative polling while the host event loop keeps running.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Pause between two predicate checks.
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// The application event loop the manager is embedded in.
pub trait HostEvents {
    /// Process pending host events once without blocking.
    fn process_events(&mut self);

    /// Ask the host to leave its event loop.
    fn request_shutdown(&mut self) {}
}

/// Host without an event queue, e.g. a command-line process.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl HostEvents for NoopHost {
    fn process_events(&mut self) {}
}

/// Poll `predicate` with the elapsed seconds until it returns non-zero.
///
/// A negative `time_limit` is replaced by `default_limit`; zero waits
/// forever. Returns the predicate's value, or 0 once a positive limit has
/// passed.
pub fn wait_for<F>(
    host: &mut dyn HostEvents,
    mut predicate: F,
    time_limit: f64,
    default_limit: f64,
) -> i32
where
    F: FnMut(f64) -> i32,
{
    let limit = if time_limit < 0.0 {
        default_limit
    } else {
        time_limit
    };

    debug!(event = "core.wait.started", limit);
    let start = Instant::now();

    loop {
        let elapsed = start.elapsed().as_secs_f64();
        let result = predicate(elapsed);
        if result != 0 {
            debug!(event = "core.wait.completed", result, elapsed);
            return result;
        }

        host.process_events();
        thread::sleep(WAIT_POLL_INTERVAL);

        let elapsed = start.elapsed().as_secs_f64();
        if limit > 0.0 && elapsed > limit {
            info!(event = "core.wait.timed_out", limit, elapsed);
            return 0;
        }
    }
}
