//! Command templates with `$url`, `$width`, `$height` and `$prog` placeholders.
//!
//! A template prefixed with `fork:` lists the arguments of a directly
//! spawned child. Anything else is a shell command line.

use crate::display::errors::DisplayError;

/// Marks a template whose remainder is an argument list for a spawned child.
pub const FORK_PREFIX: &str = "fork:";

/// Geometry used when the window did not request one.
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    Fork,
    Shell,
}

/// Values substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitutions {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub prog: String,
}

impl Substitutions {
    /// Zero geometry falls back to 800x600.
    pub fn new(url: impl Into<String>, width: u32, height: u32, prog: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: if width > 0 { width } else { DEFAULT_WIDTH },
            height: if height > 0 { height } else { DEFAULT_HEIGHT },
            prog: prog.into(),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        text.replace("$url", &self.url)
            .replace("$width", &self.width.to_string())
            .replace("$height", &self.height.to_string())
            .replace("$prog", &self.prog)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    mode: LaunchMode,
    body: String,
}

impl CommandTemplate {
    pub fn parse(template: &str) -> Result<Self, DisplayError> {
        let (mode, body) = match template.strip_prefix(FORK_PREFIX) {
            Some(rest) => (LaunchMode::Fork, rest.trim()),
            None => (LaunchMode::Shell, template.trim()),
        };

        if body.is_empty() {
            return Err(DisplayError::InvalidTemplate {
                template: template.to_string(),
                message: match mode {
                    LaunchMode::Fork => "fork template has no arguments".to_string(),
                    LaunchMode::Shell => "command is empty".to_string(),
                },
            });
        }

        Ok(Self {
            mode,
            body: body.to_string(),
        })
    }

    pub fn mode(&self) -> LaunchMode {
        self.mode
    }

    /// Whitespace separated arguments with placeholders substituted per token.
    pub fn render_args(&self, subs: &Substitutions) -> Vec<String> {
        self.body
            .split_whitespace()
            .map(|token| subs.apply(token))
            .collect()
    }

    /// Full command line for the shell.
    pub fn render_command(&self, subs: &Substitutions) -> String {
        subs.apply(&self.body)
    }
}
