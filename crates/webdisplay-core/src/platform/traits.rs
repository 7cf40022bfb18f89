//! Platform abstraction trait definition.

use std::path::{Path, PathBuf};

use crate::platform::errors::PlatformError;
use crate::platform::types::HostOs;

/// OS services needed to launch and stop display clients.
///
/// Each host OS gets one implementation. Combinations the OS cannot provide
/// return [`PlatformError::Unsupported`] instead of being compiled out.
pub trait Platform {
    /// OS family, used to pick install paths and default commands.
    fn os(&self) -> HostOs;

    /// Check if a file exists (binary discovery).
    fn path_exists(&self, path: &Path) -> bool;

    /// Look a program name up in `PATH`.
    fn find_in_path(&self, program: &str) -> Option<PathBuf>;

    /// Read an environment variable, treating empty values as unset.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Start `program` with `args` as a detached child and return its PID.
    ///
    /// The child is never waited for.
    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<u32, PlatformError>;

    /// Run a command line through the platform shell and wait for the shell to exit.
    fn shell_exec(&self, command: &str) -> Result<(), PlatformError>;

    /// Forcefully terminate a process.
    fn kill(&self, pid: u32) -> Result<(), PlatformError>;
}
