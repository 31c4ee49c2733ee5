//! Command dispatch and handlers.

pub mod path;
pub mod show;

use crate::cli::Command;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Show { file, json } => show::run(file, *json),
        Command::Path { cache_dir, name } => {
            path::run(cache_dir, name);
            Ok(())
        }
    }
}
