use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::WebDisplayConfig;
use crate::display::browsers::{BrowserKind, default_browser_template};
use crate::display::errors::DisplayError;
use crate::display::template::{CommandTemplate, LaunchMode, Substitutions};
use crate::display::types::DisplayTarget;
use crate::platform::{HostOs, Platform};

/// Directory with the cef engine resources.
pub const CEF_PATH_ENV: &str = "CEF_PATH";
/// Installation root of the display runtime.
pub const INSTALL_ROOT_ENV: &str = "WEBDISPLAY_SYS";
/// X11 display server indicator.
pub const DISPLAY_ENV: &str = "DISPLAY";

/// Template for plain program targets.
const PROGRAM_TEMPLATE: &str = "$prog $url &";

/// Locations the cef engine needs at launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CefEnvironment {
    pub resource_path: String,
    pub install_root: String,
}

/// Detect a usable cef environment: `CEF_PATH` names an existing path and
/// `WEBDISPLAY_SYS` is set.
pub fn cef_environment(platform: &dyn Platform) -> Option<CefEnvironment> {
    let resource_path = platform.env_var(CEF_PATH_ENV)?;
    if !platform.path_exists(Path::new(&resource_path)) {
        debug!(
            event = "core.display.cef_path_missing",
            path = resource_path.as_str()
        );
        return None;
    }
    let install_root = platform.env_var(INSTALL_ROOT_ENV)?;
    Some(CefEnvironment {
        resource_path,
        install_root,
    })
}

/// Check the batch-mode rules for a target.
pub fn check_batch(
    target: &str,
    parsed: &DisplayTarget,
    cef_available: bool,
    platform: &dyn Platform,
) -> Result<(), DisplayError> {
    if !parsed.supports_batch(cef_available) {
        warn!(event = "core.display.batch_not_supported", target);
        return Err(DisplayError::BatchNotSupported {
            target: target.to_string(),
        });
    }
    if parsed.requires_display_server(cef_available) && platform.env_var(DISPLAY_ENV).is_none() {
        warn!(event = "core.display.display_variable_missing", target);
        return Err(DisplayError::DisplayVariableMissing);
    }
    Ok(())
}

/// Find the executable of a well-known browser.
///
/// A configured `binary` wins, then the install paths of the host OS, then
/// a `PATH` lookup.
pub fn resolve_browser_program(
    kind: BrowserKind,
    config: &WebDisplayConfig,
    platform: &dyn Platform,
) -> Result<String, DisplayError> {
    let configured = kind
        .settings_keys()
        .iter()
        .filter_map(|key| config.browser(key))
        .find_map(|settings| settings.binary.clone());
    if let Some(binary) = configured {
        debug!(
            event = "core.display.browser_configured",
            browser = %kind,
            binary = binary.as_str()
        );
        return Ok(binary);
    }

    let installed = kind
        .install_paths(platform.os())
        .iter()
        .find(|path| platform.path_exists(Path::new(path)));
    if let Some(path) = installed {
        return Ok(path.to_string());
    }

    let on_path = kind
        .path_names()
        .iter()
        .find_map(|name| platform.find_in_path(name));
    if let Some(path) = on_path {
        return Ok(path.display().to_string());
    }

    warn!(event = "core.display.browser_not_found", browser = %kind);
    Err(DisplayError::BrowserNotFound {
        browser: kind.to_string(),
    })
}

/// Command template for a well-known browser, honoring config overrides.
pub fn browser_template(kind: BrowserKind, batch_mode: bool, config: &WebDisplayConfig) -> String {
    let configured = kind
        .settings_keys()
        .iter()
        .filter_map(|key| config.browser(key))
        .find_map(|settings| {
            if batch_mode {
                settings.batch_command.clone()
            } else {
                settings.interactive_command.clone()
            }
        });
    configured.unwrap_or_else(|| kind.default_template(batch_mode).to_string())
}

/// Escape spaces in a program path for the macOS shell.
pub fn escape_program(prog: &str, os: HostOs) -> String {
    if os == HostOs::MacOs {
        prog.replace(' ', "\\ ")
    } else {
        prog.to_string()
    }
}

/// A fully rendered external client launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalLaunch {
    /// Spawn `program` directly and record its PID.
    Fork { program: String, args: Vec<String> },
    /// Run a command line through the platform shell.
    Shell { command: String },
}

/// Inputs of an external launch.
#[derive(Debug, Clone, Copy)]
pub struct ExternalRequest<'a> {
    /// Display target as given by the caller.
    pub target: &'a str,
    pub parsed: &'a DisplayTarget,
    /// Fully qualified URL including the key.
    pub url: &'a str,
    pub width: u32,
    pub height: u32,
    pub batch_mode: bool,
}

/// Resolve program and template for an external client and render the command.
pub fn plan_external(
    request: &ExternalRequest<'_>,
    config: &WebDisplayConfig,
    platform: &dyn Platform,
) -> Result<ExternalLaunch, DisplayError> {
    let os = platform.os();

    let (template, prog) = match request.parsed {
        DisplayTarget::Browser(kind) => (
            browser_template(*kind, request.batch_mode, config),
            resolve_browser_program(*kind, config, platform)?,
        ),
        DisplayTarget::Template(template) => (template.clone(), request.target.to_string()),
        DisplayTarget::Program(program) => (PROGRAM_TEMPLATE.to_string(), program.clone()),
        DisplayTarget::Native | DisplayTarget::Embedded(_) | DisplayTarget::DefaultBrowser => (
            default_browser_template(os).to_string(),
            request.target.to_string(),
        ),
    };

    let template = CommandTemplate::parse(&template)?;

    let launch = match template.mode() {
        LaunchMode::Fork => {
            let subs =
                Substitutions::new(request.url, request.width, request.height, prog.as_str());
            let mut args = template.render_args(&subs);
            let program = match request.parsed {
                DisplayTarget::Browser(_) => prog,
                // A literal fork template names its own program first.
                _ => args.remove(0),
            };
            ExternalLaunch::Fork { program, args }
        }
        LaunchMode::Shell => {
            let subs = Substitutions::new(
                request.url,
                request.width,
                request.height,
                escape_program(&prog, os),
            );
            ExternalLaunch::Shell {
                command: template.render_command(&subs),
            }
        }
    };

    info!(
        event = "core.display.launch_planned",
        target = request.target,
        fork = matches!(launch, ExternalLaunch::Fork { .. })
    );
    Ok(launch)
}
