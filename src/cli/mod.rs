//! CLI module - command-line interface for gymreg
//!
//! Running without a subcommand starts the web server.

mod commands;

use clap::{Parser, Subcommand};

/// gymreg - a small registry of gyms with a JSON API and a browser form
#[derive(Parser)]
#[command(name = "gymreg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve {
        /// Override the configured port
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Create a default config file
    #[command(alias = "--init")]
    Init,

    /// List all gyms
    #[command(alias = "ls", alias = "l")]
    List,

    /// Print a randomly picked gym
    #[command(alias = "r")]
    Random,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["gymreg"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_subcommands_and_aliases() {
        let cli = Cli::try_parse_from(["gymreg", "serve", "--port", "8080"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve { port: Some(8080) }));

        let cli = Cli::try_parse_from(["gymreg", "ls"]).unwrap();
        assert_eq!(cli.command, Some(Commands::List));

        let cli = Cli::try_parse_from(["gymreg", "random"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Random));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["gymreg", "frobnicate"]).is_err());
    }
}
