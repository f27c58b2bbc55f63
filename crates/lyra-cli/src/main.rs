//! `lyra` -- CLI binary for the lyra prompt router.
//!
//! Provides the following subcommands:
//!
//! - `lyra route` -- Hook mode: read a prompt payload on stdin, print one
//!   suggestion line or nothing.
//! - `lyra context` -- Hook mode: print project state and stack labels.
//! - `lyra explain` -- Show how a prompt is scored and decided.
//! - `lyra categories` -- List the configured routing categories.
//! - `lyra config` -- Show the resolved router configuration.
//!
//! Stdout is the hook channel, so all logging goes to stderr.

use clap::{Parser, Subcommand};

mod commands;

/// Lexical prompt router for coding-assistant hooks.
#[derive(Parser)]
#[command(name = "lyra", about = "Lexical prompt router for coding-assistant hooks", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Route a hook payload read from stdin (always exits 0).
    Route(commands::route::RouteArgs),

    /// Print project state and stack context for the working directory.
    Context(commands::context::ContextArgs),

    /// Explain how a prompt is classified.
    Explain(commands::explain::ExplainArgs),

    /// List routing categories.
    Categories {
        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Show resolved configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

/// Subcommands for `lyra config`.
#[derive(Subcommand)]
enum ConfigCmd {
    /// Show the full resolved configuration.
    Show {
        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Route(args) => commands::route::run(args),
        Commands::Context(args) => commands::context::run(args),
        Commands::Explain(args) => commands::explain::run(args)?,
        Commands::Categories { config } => {
            let cfg = commands::load_config(config.as_deref())?;
            let classifier = commands::build_classifier(&cfg)?;
            commands::categories::categories_list(&classifier);
        }
        Commands::Config { action } => match action {
            ConfigCmd::Show { config } => {
                let cfg = commands::load_config(config.as_deref())?;
                commands::config_cmd::config_show(&cfg);
            }
        },
    }

    Ok(())
}
