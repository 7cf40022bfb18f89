//! Well-known browsers: install locations and default command templates.

use std::fmt;

use crate::platform::HostOs;

/// Browsers with known install paths and headless support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserKind {
    Chrome,
    Chromium,
    Firefox,
}

impl BrowserKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "chrome" => Some(BrowserKind::Chrome),
            "chromium" => Some(BrowserKind::Chromium),
            "firefox" => Some(BrowserKind::Firefox),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
        }
    }

    /// Config sections consulted for overrides, most specific first.
    pub fn settings_keys(&self) -> &'static [&'static str] {
        match self {
            BrowserKind::Chrome => &["chrome"],
            BrowserKind::Chromium => &["chromium", "chrome"],
            BrowserKind::Firefox => &["firefox"],
        }
    }

    /// Install locations tried in order when no binary is configured.
    pub fn install_paths(&self, os: HostOs) -> &'static [&'static str] {
        match (self, os) {
            (BrowserKind::Chrome | BrowserKind::Chromium, HostOs::MacOs) => {
                &["/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"]
            }
            (BrowserKind::Chrome | BrowserKind::Chromium, HostOs::Linux) => &[
                "/usr/bin/chromium",
                "/usr/bin/chromium-browser",
                "/usr/bin/chrome-browser",
            ],
            (BrowserKind::Firefox, HostOs::MacOs) => {
                &["/Applications/Firefox.app/Contents/MacOS/firefox"]
            }
            (BrowserKind::Firefox, HostOs::Linux) => &["/usr/bin/firefox"],
            _ => &[],
        }
    }

    /// Program names looked up in `PATH` after the install paths.
    pub fn path_names(&self) -> &'static [&'static str] {
        match self {
            BrowserKind::Chrome => &["google-chrome", "chrome"],
            BrowserKind::Chromium => &["chromium", "chromium-browser"],
            BrowserKind::Firefox => &["firefox"],
        }
    }

    /// Built-in command template.
    ///
    /// Running firefox headless next to an interactive instance needs a
    /// separate profile (`firefox -no-remote -CreateProfile batch`), which
    /// can be added through `batch_command`.
    pub fn default_template(&self, batch: bool) -> &'static str {
        match (self, batch) {
            (BrowserKind::Chrome | BrowserKind::Chromium, true) => {
                "fork:--headless --disable-gpu --disable-webgl --remote-debugging-socket-fd=0 $url"
            }
            (BrowserKind::Chrome | BrowserKind::Chromium, false) => {
                "$prog --window-size=$width,$height --app='$url' &"
            }
            (BrowserKind::Firefox, true) => {
                "fork:-headless -no-remote -window-size=$width,$height $url"
            }
            (BrowserKind::Firefox, false) => "$prog '$url' &",
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command opening a URL in the OS default browser.
pub fn default_browser_template(os: HostOs) -> &'static str {
    match os {
        HostOs::MacOs => "open '$url'",
        HostOs::Windows => "start $url",
        HostOs::Linux | HostOs::Other => "xdg-open '$url' &",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for kind in [BrowserKind::Chrome, BrowserKind::Chromium, BrowserKind::Firefox] {
            assert_eq!(BrowserKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(BrowserKind::parse("opera"), None);
    }

    #[test]
    fn test_chromium_falls_back_to_chrome_settings() {
        assert_eq!(BrowserKind::Chromium.settings_keys(), &["chromium", "chrome"]);
    }

    #[test]
    fn test_install_paths_per_os() {
        assert_eq!(
            BrowserKind::Firefox.install_paths(HostOs::Linux),
            &["/usr/bin/firefox"]
        );
        assert_eq!(BrowserKind::Chrome.install_paths(HostOs::Linux).len(), 3);
        assert!(BrowserKind::Chrome.install_paths(HostOs::Windows).is_empty());
    }

    #[test]
    fn test_batch_templates_fork() {
        assert!(BrowserKind::Chrome.default_template(true).starts_with("fork:"));
        assert!(BrowserKind::Firefox.default_template(true).starts_with("fork:"));
        assert!(!BrowserKind::Firefox.default_template(false).starts_with("fork:"));
    }

    #[test]
    fn test_default_browser_template() {
        assert_eq!(default_browser_template(HostOs::Linux), "xdg-open '$url' &");
        assert_eq!(default_browser_template(HostOs::MacOs), "open '$url'");
        assert_eq!(default_browser_template(HostOs::Windows), "start $url");
    }
}
