//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `netvcr`.
#[derive(Debug, Parser)]
#[command(name = "netvcr", version, about = "Inspect recorded HTTP cassettes")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the interactions stored in a cassette file.
    Show {
        /// Cassette file to read.
        file: PathBuf,
        /// Print the interactions as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the file a cassette name is stored at.
    Path {
        /// Cache directory cassettes live under.
        #[arg(long)]
        cache_dir: PathBuf,
        /// Cassette name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_show_subcommand() {
        let cli = Cli::parse_from(["netvcr", "show", "c.yml", "--json"]);
        assert!(matches!(cli.command, Command::Show { json: true, .. }));
    }

    #[test]
    fn parses_path_subcommand() {
        let cli = Cli::parse_from(["netvcr", "path", "--cache-dir", "/tmp/c", "api/login"]);
        match cli.command {
            Command::Path { cache_dir, name } => {
                assert_eq!(cache_dir.to_str(), Some("/tmp/c"));
                assert_eq!(name, "api/login");
            }
            Command::Show { .. } => panic!("expected path subcommand"),
        }
    }

    #[test]
    fn path_requires_cache_dir() {
        assert!(Cli::try_parse_from(["netvcr", "path", "x"]).is_err());
    }
}
