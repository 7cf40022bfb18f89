use sysinfo::{Pid as SysinfoPid, ProcessesToUpdate, System};
use tracing::{debug, info, warn};

use crate::platform::{Platform, PlatformError};
use crate::process::errors::ProcessError;
use crate::process::types::ProcessRecord;

/// Forcefully kill the process with the given PID (SIGKILL on unix).
pub fn kill_process(pid: u32) -> Result<(), ProcessError> {
    if pid == 0 {
        return Err(ProcessError::InvalidPid { pid });
    }

    let mut system = System::new();
    let pid_obj = SysinfoPid::from_u32(pid);
    system.refresh_processes(ProcessesToUpdate::Some(&[pid_obj]), true);

    match system.process(pid_obj) {
        Some(process) => {
            if process.kill() {
                Ok(())
            } else {
                Err(ProcessError::KillFailed {
                    pid,
                    message: "Process kill signal failed".to_string(),
                })
            }
        }
        None => Err(ProcessError::NotFound { pid }),
    }
}

/// Terminate a display client previously launched by the manager.
///
/// Only `"pid:<n>"` records with a positive id are acted upon; anything else
/// is a no-op. Platforms without process termination report
/// [`PlatformError::Unsupported`].
pub fn halt_client(record: &str, platform: &dyn Platform) -> Result<(), PlatformError> {
    let Some(process) = ProcessRecord::parse(record) else {
        debug!(event = "core.process.halt_skipped", record);
        return Ok(());
    };

    info!(event = "core.process.halt_started", pid = process.pid());

    match platform.kill(process.pid()) {
        Ok(()) => {
            info!(event = "core.process.halt_completed", pid = process.pid());
            Ok(())
        }
        Err(e) => {
            warn!(
                event = "core.process.halt_failed",
                pid = process.pid(),
                error = %e
            );
            Err(e)
        }
    }
}
