// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session Forge - persistent memory for AI coding sessions.
//!
//! This is the binary entry point. `forge serve` (the default) speaks MCP
//! over stdin/stdout; the other subcommands inspect the data directory.

mod inspect;
mod serve;

use clap::{Parser, Subcommand};
use forge_config::ForgeConfig;

/// Session Forge - persistent memory for AI coding sessions.
#[derive(Parser, Debug)]
#[command(name = "forge", version, about, long_about = None)]
struct Cli {
    /// Data directory (overrides storage.base_dir and SESSION_FORGE_DIR).
    #[arg(long, global = true, value_name = "PATH")]
    dir: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the memory tools over MCP stdio (default).
    Serve,
    /// Print store statistics as JSON.
    Stats,
    /// Print every store as a single JSON document.
    Export,
    /// Print the resolved on-disk layout.
    Paths,
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(mut config: ForgeConfig, cli: &Cli) -> ForgeConfig {
    if let Some(dir) = &cli.dir {
        config.storage.base_dir = Some(dir.clone());
    }
    config
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match forge_config::load_and_validate() {
        Ok(config) => apply_overrides(config, &cli),
        Err(errors) => {
            forge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Stats => inspect::run_stats(&config),
        Commands::Export => inspect::run_export(&config),
        Commands::Paths => inspect::run_paths(&config),
    };

    if let Err(e) = result {
        eprintln!("forge: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_parses_as_default() {
        let cli = Cli::try_parse_from(["forge"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.dir.is_none());
    }

    #[test]
    fn dir_flag_is_global() {
        let cli = Cli::try_parse_from(["forge", "stats", "--dir", "/tmp/forge"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Stats)));
        assert_eq!(cli.dir.as_deref(), Some("/tmp/forge"));
    }

    #[test]
    fn dir_flag_overrides_config() {
        let cli = Cli::try_parse_from(["forge", "--dir", "/data/forge", "paths"]).unwrap();
        let config = apply_overrides(ForgeConfig::default(), &cli);
        assert_eq!(config.storage.base_dir.as_deref(), Some("/data/forge"));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["forge", "shell"]).is_err());
    }

    #[test]
    #[serial_test::serial]
    fn binary_loads_config_defaults() {
        let config = forge_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.session.history_limit, 10);
        assert_eq!(config.agent.log_level, "info");
    }
}
