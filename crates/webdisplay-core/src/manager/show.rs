use tracing::{debug, error, info, warn};

use super::Manager;
use crate::display::operations::check_batch;
use crate::display::{
    DisplayError, DisplayTarget, EmbeddedKind, EmbeddedLaunch, ExternalLaunch, ExternalRequest,
    LaunchMethod, LaunchOutcome, cef_environment, plan_external,
};
use crate::process::ProcessRecord;
use crate::windows::{self, Window};

impl Manager {
    /// Show a window with the display client named by `target`.
    ///
    /// A fresh key is issued per call and recorded against the launch method
    /// once the client is started. An empty target uses
    /// `display.default_target`. Shell commands are fire-and-forget: a
    /// failing command is logged and the launch still counts as shown.
    pub fn show(
        &mut self,
        window: &mut Window,
        target: &str,
    ) -> Result<LaunchOutcome, DisplayError> {
        info!(
            event = "core.display.show_started",
            window_id = window.id().as_u32(),
            target
        );

        if !self.has_server() {
            error!(
                event = "core.display.show_failed",
                window_id = window.id().as_u32(),
                reason = "no listener"
            );
            return Err(DisplayError::NoListener);
        }

        let key = windows::issue_key(window, &mut self.rng)?;
        let local_url = windows::append_key(&self.window_url(window, false)?, &key);

        let target = if target.is_empty() {
            self.config.display.default_target.clone().unwrap_or_default()
        } else {
            target.to_string()
        };
        let parsed = DisplayTarget::parse(&target);
        let cef_registered = self.backends.contains(EmbeddedKind::Cef);

        if window.is_batch_mode() {
            check_batch(&target, &parsed, cef_registered, self.platform.as_ref())?;
        }

        if let Some(kind) = self.launch_embedded(window, &parsed, &local_url) {
            let method = LaunchMethod::Embedded(kind);
            window.add_key(key.clone(), method.record());
            info!(
                event = "core.display.show_completed",
                window_id = window.id().as_u32(),
                method = kind.as_str()
            );
            return Ok(LaunchOutcome {
                key,
                url: local_url,
                method,
            });
        }

        self.ensure_server(true)?;
        let Some(address) = self.address.as_deref() else {
            return Err(DisplayError::NoListener);
        };
        let url = windows::qualify(address, &local_url);

        let request = ExternalRequest {
            target: &target,
            parsed: &parsed,
            url: &url,
            width: window.width(),
            height: window.height(),
            batch_mode: window.is_batch_mode(),
        };
        let launch = plan_external(&request, &self.config, self.platform.as_ref())?;

        let method = match launch {
            ExternalLaunch::Fork { program, args } => {
                let pid = self.platform.spawn_detached(&program, &args)?;
                let method = LaunchMethod::Process(ProcessRecord::new(pid));
                window.add_key(key.clone(), method.record());
                method
            }
            ExternalLaunch::Shell { command } => {
                let method = LaunchMethod::Shell(target.clone());
                window.add_key(key.clone(), method.record());
                debug!(event = "core.display.shell_exec", command = command.as_str());
                if let Err(e) = self.platform.shell_exec(&command) {
                    warn!(
                        event = "core.display.shell_exec_failed",
                        window_id = window.id().as_u32(),
                        error = %e
                    );
                }
                method
            }
        };

        info!(
            event = "core.display.show_completed",
            window_id = window.id().as_u32(),
            method = method.record().as_str()
        );
        Ok(LaunchOutcome { key, url, method })
    }

    /// Try the in-process engines the target allows. Returns the engine that
    /// accepted the window.
    fn launch_embedded(
        &mut self,
        window: &Window,
        parsed: &DisplayTarget,
        url: &str,
    ) -> Option<EmbeddedKind> {
        let cef_registered = self.backends.contains(EmbeddedKind::Cef);

        for kind in parsed.embedded_candidates(cef_registered) {
            let Some(backend) = self.backends.get(kind) else {
                debug!(event = "core.display.backend_unavailable", kind = %kind);
                continue;
            };

            let cef = if kind == EmbeddedKind::Cef {
                match cef_environment(self.platform.as_ref()) {
                    Some(env) => Some(env),
                    None => {
                        warn!(event = "core.display.cef_environment_missing");
                        continue;
                    }
                }
            } else {
                None
            };

            let server = self.server.as_deref_mut()?;
            let launched = backend.launch(EmbeddedLaunch {
                url,
                server,
                batch_mode: window.is_batch_mode(),
                width: window.width(),
                height: window.height(),
                resource_path: cef.as_ref().map(|env| env.resource_path.as_str()),
                install_root: cef.as_ref().map(|env| env.install_root.as_str()),
            });

            if launched {
                return Some(kind);
            }
            warn!(
                event = "core.display.embedded_launch_failed",
                window_id = window.id().as_u32(),
                kind = %kind
            );
        }

        None
    }
}
