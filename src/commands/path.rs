//! `netvcr path` command.

use std::path::Path;

use crate::cassette::storage;

/// Execute the `path` command.
pub fn run(cache_dir: &Path, name: &str) {
    if let Some(path) = storage::cache_file(Some(cache_dir), name) {
        println!("{}", path.display());
    }
}
