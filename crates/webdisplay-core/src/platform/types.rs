use std::fmt;

/// Operating system family of the host, as far as launching clients is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl HostOs {
    /// The OS this binary was compiled for.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => HostOs::Linux,
            "macos" => HostOs::MacOs,
            "windows" => HostOs::Windows,
            _ => HostOs::Other,
        }
    }

    /// Whether detached child processes and kill signals are available.
    pub fn supports_process_control(&self) -> bool {
        !matches!(self, HostOs::Windows)
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOs::Linux => write!(f, "linux"),
            HostOs::MacOs => write!(f, "macos"),
            HostOs::Windows => write!(f, "windows"),
            HostOs::Other => write!(f, "other"),
        }
    }
}
