use std::fmt;

use crate::display::browsers::BrowserKind;
use crate::display::template::FORK_PREFIX;
use crate::process::ProcessRecord;

/// In-process display engines that can be registered as backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbeddedKind {
    /// Chromium Embedded Framework
    Cef,
    /// Qt5 WebEngine
    Qt5,
}

impl EmbeddedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddedKind::Cef => "cef",
            EmbeddedKind::Qt5 => "qt5",
        }
    }
}

impl fmt::Display for EmbeddedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A display target as requested by the caller of `show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayTarget {
    /// Best local display: embedded engine if available, else the default browser.
    Native,
    /// A specific in-process engine.
    Embedded(EmbeddedKind),
    /// A well-known browser with install paths and headless support.
    Browser(BrowserKind),
    /// The OS default browser opener.
    DefaultBrowser,
    /// A literal command template: contains `$` placeholders or starts with `fork:`.
    Template(String),
    /// A program name launched as `$prog $url &`.
    Program(String),
}

impl DisplayTarget {
    pub fn parse(target: &str) -> Self {
        match target {
            "" | "native" => DisplayTarget::Native,
            "cef" => DisplayTarget::Embedded(EmbeddedKind::Cef),
            "qt5" => DisplayTarget::Embedded(EmbeddedKind::Qt5),
            "browser" => DisplayTarget::DefaultBrowser,
            other => match BrowserKind::parse(other) {
                Some(kind) => DisplayTarget::Browser(kind),
                None if other.contains('$') || other.starts_with(FORK_PREFIX) => {
                    DisplayTarget::Template(other.to_string())
                }
                None => DisplayTarget::Program(other.to_string()),
            },
        }
    }

    /// Embedded engines to try, in order, before falling back to an external client.
    ///
    /// `cef_available` is true when a cef backend is registered.
    pub fn embedded_candidates(&self, cef_available: bool) -> Vec<EmbeddedKind> {
        match self {
            DisplayTarget::Native if cef_available => vec![EmbeddedKind::Cef, EmbeddedKind::Qt5],
            DisplayTarget::Native => vec![EmbeddedKind::Qt5],
            DisplayTarget::Embedded(kind) => vec![*kind],
            _ => Vec::new(),
        }
    }

    /// Whether a batch-mode window may be shown with this target.
    pub fn supports_batch(&self, cef_available: bool) -> bool {
        match self {
            DisplayTarget::Native => cef_available,
            DisplayTarget::Embedded(kind) => *kind == EmbeddedKind::Cef,
            DisplayTarget::Browser(_) => true,
            _ => false,
        }
    }

    /// Whether a batch launch needs a display server (`DISPLAY`).
    pub fn requires_display_server(&self, cef_available: bool) -> bool {
        match self {
            DisplayTarget::Native => cef_available,
            DisplayTarget::Embedded(kind) => *kind == EmbeddedKind::Cef,
            _ => false,
        }
    }
}

/// How a window's client was started; stored against the key as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchMethod {
    /// In-process engine call.
    Embedded(EmbeddedKind),
    /// Detached child process started from a `fork:` template.
    Process(ProcessRecord),
    /// Shell command; holds the display target as given.
    Shell(String),
}

impl LaunchMethod {
    /// String recorded in the window's key map.
    pub fn record(&self) -> String {
        match self {
            LaunchMethod::Embedded(kind) => kind.as_str().to_string(),
            LaunchMethod::Process(record) => record.to_string(),
            LaunchMethod::Shell(target) => target.clone(),
        }
    }
}

/// Result of a successful `show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub key: String,
    pub url: String,
    pub method: LaunchMethod,
}
