//! Configuration file discovery and loading.
//!
//! The discovery order is:
//! 1. `LYRA_CONFIG` environment variable.
//! 2. `lyra-config.json` / `lyra-config.toml` next to the running executable.
//! 3. `~/.claude/hooks/lyra-config.json`.
//! 4. If none found, the built-in [`RouterConfig::default`].
//!
//! JSON and TOML are both accepted (chosen by extension). Keys are
//! normalized from camelCase to snake_case before deserializing.

use std::path::{Path, PathBuf};

use serde_json::Value;

use lyra_types::config::RouterConfig;
use lyra_types::{LyraError, Result};

use crate::env::Environment;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "LYRA_CONFIG";

/// File stem looked up beside the executable and in the hooks directory.
pub const CONFIG_FILE_STEM: &str = "lyra-config";

/// Discover the config file path using the fallback chain.
///
/// The env var path is returned without an existence check; the loader
/// reports a missing file and falls back to defaults. The other candidates
/// are only returned when they exist.
pub fn discover_config_path(
    env: &dyn Environment,
    exe_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(env_path) = env.get_var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(env_path));
    }

    if let Some(dir) = exe_dir {
        for ext in ["json", "toml"] {
            let candidate = dir.join(format!("{CONFIG_FILE_STEM}.{ext}"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    if let Some(home) = home_dir {
        let hooks_path = home
            .join(".claude")
            .join("hooks")
            .join(format!("{CONFIG_FILE_STEM}.json"));
        if hooks_path.is_file() {
            return Some(hooks_path);
        }
    }

    None
}

/// Directory holding the running executable, if it can be resolved.
pub fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Load configuration.
///
/// An explicit `config_override` must exist. Without one, the discovery chain
/// runs and a missing file yields the defaults.
pub fn load_config(env: &dyn Environment, config_override: Option<&Path>) -> Result<RouterConfig> {
    if let Some(path) = config_override {
        if !path.exists() {
            return Err(LyraError::ConfigInvalid {
                reason: format!("config file not found: {}", path.display()),
            });
        }
        return load_config_file(path);
    }

    let Some(path) = discover_config_path(env, executable_dir(), dirs::home_dir()) else {
        tracing::debug!("no config file found, using built-in rule table");
        return Ok(RouterConfig::default());
    };

    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "config path does not exist, using built-in rule table"
        );
        return Ok(RouterConfig::default());
    }

    load_config_file(&path)
}

/// Read and parse a single config file.
pub fn load_config_file(path: &Path) -> Result<RouterConfig> {
    tracing::debug!(path = %path.display(), "loading config file");
    let contents = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    parse_config(&contents, is_toml).map_err(|reason| LyraError::ConfigParse {
        path: path.display().to_string(),
        reason,
    })
}

/// Parse config text (JSON or TOML) into a [`RouterConfig`].
pub fn parse_config(contents: &str, is_toml: bool) -> std::result::Result<RouterConfig, String> {
    let raw: Value = if is_toml {
        let table: toml::Value = toml::from_str(contents).map_err(|e| e.to_string())?;
        serde_json::to_value(table).map_err(|e| e.to_string())?
    } else {
        serde_json::from_str(contents).map_err(|e| e.to_string())?
    };
    serde_json::from_value(normalize_keys(raw)).map_err(|e| e.to_string())
}

/// Convert camelCase JSON keys to snake_case recursively.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut new_map = serde_json::Map::new();
            for (key, val) in map {
                new_map.insert(camel_to_snake(&key), normalize_keys(val));
            }
            Value::Object(new_map)
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Convert a single camelCase string to snake_case.
///
/// Acronym runs stay together: `"HTMLParser"` becomes `"html_parser"`.
///
/// # Examples
/// ```
/// # use lyra_platform::config_loader::camel_to_snake;
/// assert_eq!(camel_to_snake("confidenceFloor"), "confidence_floor");
/// assert_eq!(camel_to_snake("already_snake"), "already_snake");
/// assert_eq!(camel_to_snake("maxURLLength"), "max_url_length");
/// ```
pub fn camel_to_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            if prev.is_lowercase()
                || (prev.is_uppercase() && next.is_some_and(|c| c.is_lowercase()))
            {
                result.push('_');
            }
        }
        result.extend(ch.to_lowercase());
    }
    result
}
