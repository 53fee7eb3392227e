//! Command-line interface definition for Prompthash
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for running the HTTP services and listing models.

use clap::{Parser, Subcommand, ValueEnum};

/// Prompthash - chat, prompt improvement, and model listing services
///
/// Serves the REST API in front of an OpenAI-compatible inference endpoint.
#[derive(Parser, Debug, Clone)]
#[command(name = "prompthash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "PROMPTHASH_CONFIG", default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Prompthash
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Socket address to listen on (overrides config and PROMPTHASH_BIND)
        #[arg(short, long)]
        bind: Option<String>,

        /// Which service routes to mount in this process
        #[arg(short, long, value_enum, default_value_t = ServiceSelection::All)]
        service: ServiceSelection,
    },

    /// List upstream models grouped by category
    Models {
        /// Print the raw JSON response instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Service selection for the `serve` command
///
/// Each service can run in its own process (mirroring separate agents)
/// or all three can share one process.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceSelection {
    /// Chat, prompt improver, and model listing together
    #[default]
    All,
    /// Chat service only
    Chat,
    /// Prompt improver service only
    Improver,
    /// Model listing service only
    Models,
}

impl ServiceSelection {
    /// Whether the chat routes are mounted
    pub fn includes_chat(self) -> bool {
        matches!(self, Self::All | Self::Chat)
    }

    /// Whether the prompt improver routes are mounted
    pub fn includes_improver(self) -> bool {
        matches!(self, Self::All | Self::Improver)
    }

    /// Whether the model listing routes are mounted
    pub fn includes_models(self) -> bool {
        matches!(self, Self::All | Self::Models)
    }
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["prompthash", "serve"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("config/config.yaml"));
        assert!(!cli.verbose);
        match cli.command {
            Commands::Serve { bind, service } => {
                assert!(bind.is_none());
                assert_eq!(service, ServiceSelection::All);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "prompthash",
            "--verbose",
            "serve",
            "--bind",
            "0.0.0.0:8011",
            "--service",
            "improver",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Serve { bind, service } => {
                assert_eq!(bind.as_deref(), Some("0.0.0.0:8011"));
                assert_eq!(service, ServiceSelection::Improver);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_models_json() {
        let cli = Cli::try_parse_from(["prompthash", "models", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Models { json: true }));
    }

    #[test]
    fn test_parse_rejects_unknown_service() {
        let result = Cli::try_parse_from(["prompthash", "serve", "--service", "video"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_service_selection_membership() {
        assert!(ServiceSelection::All.includes_chat());
        assert!(ServiceSelection::All.includes_improver());
        assert!(ServiceSelection::All.includes_models());

        assert!(ServiceSelection::Chat.includes_chat());
        assert!(!ServiceSelection::Chat.includes_improver());
        assert!(!ServiceSelection::Chat.includes_models());

        assert!(ServiceSelection::Models.includes_models());
        assert!(!ServiceSelection::Models.includes_chat());
    }
}
