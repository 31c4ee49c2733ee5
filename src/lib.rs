//! Record outbound HTTP interactions once and replay them in later test runs.
//!
//! A [`Cassette`] owns the interactions for one test and decides, through its
//! [`RecordMode`], whether the live network may be used. HTTP clients are
//! wrapped by [`adapters::recording::RecordingHttpClient`], which reports
//! live responses to the active cassette, and
//! [`adapters::replaying::StubbingHttpClient`], which answers from the stubs
//! a cassette registered. [`VcrContext`] wires the pieces together for a
//! test harness.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod ports;

pub use cassette::{Cassette, CassetteOptions, CurrentCassette, RecordMode, RecordedInteraction};
pub use config::Config;
pub use context::VcrContext;
pub use error::{PersistenceError, Result, VcrError};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_prints_cassette_path() {
        let result = run(["netvcr", "path", "--cache-dir", "/tmp/c", "login"]);
        assert!(result.is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["netvcr", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_on_missing_cassette_file() {
        let result = run(["netvcr", "show", "/nonexistent/netvcr/cassette.yml"]);
        assert!(result.unwrap_err().contains("Failed to read cassette file"));
    }
}
