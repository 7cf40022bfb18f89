//! Display client selection and launching.
//!
//! A display target string is resolved to an in-process engine, a
//! well-known browser, the OS default browser, a literal command template
//! or a plain program.

pub mod backends;
pub mod browsers;
pub mod errors;
pub mod operations;
pub mod template;
pub mod types;

pub use backends::{BackendRegistry, EmbeddedBackend, EmbeddedLaunch};
pub use browsers::BrowserKind;
pub use errors::DisplayError;
pub use operations::{
    CefEnvironment, ExternalLaunch, ExternalRequest, cef_environment, plan_external,
};
pub use template::{CommandTemplate, LaunchMode, Substitutions};
pub use types::{DisplayTarget, EmbeddedKind, LaunchMethod, LaunchOutcome};
