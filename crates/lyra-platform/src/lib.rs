//! Platform collaborators for lyra.
//!
//! Everything here touches the filesystem or the process environment so
//! that `lyra-core` never has to. Each collaborator degrades to a safe
//! default on I/O failure rather than surfacing an error to the hook caller.
//!
//! - [`env`] -- environment variable access behind a trait
//! - [`config_loader`] -- config discovery chain and JSON/TOML loading
//! - [`project`] -- managed-project detection and state snippet
//! - [`stack`] -- technology stack labels from manifest files

pub mod config_loader;
pub mod env;
pub mod project;
pub mod stack;

pub use env::{Environment, NativeEnvironment};
pub use project::ProjectState;
