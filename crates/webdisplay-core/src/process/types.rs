use std::fmt;

/// Prefix of launch methods that name a spawned process.
pub const PID_PREFIX: &str = "pid:";

/// A display client process spawned by the manager, stored as `"pid:<n>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessRecord(u32);

impl ProcessRecord {
    pub fn new(pid: u32) -> Self {
        Self(pid)
    }

    /// Parse a launch method. Only `pid:` records with a positive id qualify.
    pub fn parse(record: &str) -> Option<Self> {
        let pid: i64 = record.strip_prefix(PID_PREFIX)?.trim().parse().ok()?;
        u32::try_from(pid).ok().filter(|&pid| pid > 0).map(Self)
    }

    pub fn pid(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PID_PREFIX, self.0)
    }
}
