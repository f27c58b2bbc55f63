//! `lyra context` -- the project context hook.
//!
//! Prints the planning state snippet, open debug sessions and detected
//! stack labels for the project directory, joined by newlines. Prints
//! nothing when there is nothing to report. Like `route`, it never fails.

use std::path::Path;

use clap::Args;

use lyra_platform::ProjectState;
use lyra_platform::stack::detect_stack;

/// Arguments for `lyra context`.
#[derive(Args)]
pub struct ContextArgs {
    /// Project directory to inspect (defaults to cwd).
    #[arg(long)]
    pub project_dir: Option<String>,
}

/// Run the context hook.
pub fn run(args: ContextArgs) {
    let dir = super::project_dir(args.project_dir.as_deref());
    if let Some(text) = context_text(&dir) {
        print!("{text}");
    }
}

/// Context block for `dir`, or `None` when empty.
pub fn context_text(dir: &Path) -> Option<String> {
    let mut lines = ProjectState::read(dir).render();
    lines.extend(detect_stack(dir).render());
    tracing::debug!(dir = %dir.display(), lines = lines.len(), "context collected");

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
