//! Platform implementation backed by the running operating system.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::platform::errors::PlatformError;
use crate::platform::traits::Platform;
use crate::platform::types::HostOs;
use crate::process;

/// The real host: std process spawning, `which` lookup and sysinfo kill.
#[derive(Debug, Clone, Copy)]
pub struct SystemPlatform {
    os: HostOs,
}

impl SystemPlatform {
    pub fn new() -> Self {
        Self {
            os: HostOs::current(),
        }
    }

    fn unsupported(&self, operation: &'static str) -> PlatformError {
        PlatformError::Unsupported {
            operation,
            platform: self.os.to_string(),
        }
    }
}

impl Default for SystemPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for SystemPlatform {
    fn os(&self) -> HostOs {
        self.os
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn find_in_path(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }

    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<u32, PlatformError> {
        if !self.os.supports_process_control() {
            return Err(self.unsupported("fork launch"));
        }

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlatformError::SpawnFailed {
                program: program.to_string(),
                message: e.to_string(),
            })?;

        let pid = child.id();
        debug!(event = "core.platform.spawned", program, pid);
        Ok(pid)
    }

    fn shell_exec(&self, command: &str) -> Result<(), PlatformError> {
        let mut shell = if self.os == HostOs::Windows {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        };

        let status = shell.status().map_err(|e| PlatformError::ExecFailed {
            command: command.to_string(),
            message: e.to_string(),
        })?;

        if status.success() {
            Ok(())
        } else {
            warn!(event = "core.platform.exec_status", command, status = %status);
            Err(PlatformError::ExecFailed {
                command: command.to_string(),
                message: format!("exited with {}", status),
            })
        }
    }

    fn kill(&self, pid: u32) -> Result<(), PlatformError> {
        if !self.os.supports_process_control() {
            return Err(self.unsupported("kill process"));
        }
        process::kill_process(pid).map_err(PlatformError::from)
    }
}
