//! `lyra config` -- display resolved configuration.
//!
//! # Examples
//!
//! ```text
//! lyra config show
//! lyra config show --config ./lyra-config.toml
//! ```

use lyra_types::config::RouterConfig;

/// Display the resolved configuration as formatted JSON.
pub fn config_show(config: &RouterConfig) {
    match serde_json::to_string_pretty(config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("error: failed to serialize config: {e}"),
    }
}
