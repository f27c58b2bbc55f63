//! `lyra route` -- the prompt routing hook.
//!
//! Reads the hook payload from stdin and prints at most one line,
//! `Lyra -> <route>`. Every failure (unreadable stdin, bad config, write
//! errors) degrades to printing nothing; the process always exits 0 so
//! the host never blocks on the router.
//!
//! # Examples
//!
//! ```text
//! echo '{"prompt":"build a dashboard for tracking expenses"}' | lyra route
//! Lyra -> /gsd:new-project
//! ```

use std::io::{self, Read};
use std::path::Path;

use clap::Args;

use lyra_core::LexicalClassifier;
use lyra_platform::{NativeEnvironment, ProjectState, config_loader};

/// Arguments for `lyra route`.
#[derive(Args)]
pub struct RouteArgs {
    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,

    /// Project directory checked for `.planning/STATE.md` (defaults to cwd).
    #[arg(long)]
    pub project_dir: Option<String>,

    /// Treat the project as managed without checking the filesystem.
    #[arg(long)]
    pub managed_project: bool,
}

/// Run the routing hook.
pub fn run(args: RouteArgs) {
    let mut payload = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut payload) {
        tracing::debug!(error = %e, "failed to read hook payload");
        return;
    }

    let loaded = config_loader::load_config(&NativeEnvironment, args.config.as_deref().map(Path::new));
    let classifier = match LexicalClassifier::load_or_default(loaded) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "built-in rule table failed to compile");
            return;
        }
    };

    let managed = args.managed_project
        || ProjectState::is_managed(&super::project_dir(args.project_dir.as_deref()));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = classifier.write_route(&payload, managed, &mut out) {
        tracing::debug!(error = %e, "failed to write route");
    }
}
