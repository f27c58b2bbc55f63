//! CLI command implementations for `lyra`.
//!
//! Each subcommand is implemented in its own module:
//!
//! - [`route`] -- Prompt routing hook.
//! - [`context`] -- Project context hook.
//! - [`explain`] -- Classification trace for operators.
//! - [`categories`] -- Category table.
//! - [`config_cmd`] -- Resolved configuration dump.

pub mod categories;
pub mod config_cmd;
pub mod context;
pub mod explain;
pub mod route;

use std::path::{Path, PathBuf};

use lyra_core::LexicalClassifier;
use lyra_platform::NativeEnvironment;
use lyra_types::config::RouterConfig;

/// Load configuration from the given path override or via auto-discovery.
///
/// If `config_override` is provided, loads from that path. Otherwise the
/// discovery chain runs:
/// 1. `LYRA_CONFIG` env var
/// 2. `lyra-config.json` / `lyra-config.toml` beside the executable
/// 3. `~/.claude/hooks/lyra-config.json`
///
/// Returns the built-in config if no file is found.
pub fn load_config(config_override: Option<&str>) -> anyhow::Result<RouterConfig> {
    let env = NativeEnvironment;
    lyra_platform::config_loader::load_config(&env, config_override.map(Path::new))
        .map_err(|e| anyhow::anyhow!("failed to load config: {e}"))
}

/// Compile a classifier, failing loudly on an invalid rule table.
pub fn build_classifier(config: &RouterConfig) -> anyhow::Result<LexicalClassifier> {
    LexicalClassifier::from_config(config).map_err(|e| anyhow::anyhow!("invalid rule table: {e}"))
}

/// Resolve the project directory, defaulting to the current directory.
pub fn project_dir(raw: Option<&str>) -> PathBuf {
    match raw {
        Some(dir) => expand_home(dir),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}
