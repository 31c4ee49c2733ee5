//! Cassette file paths and the YAML codec.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::format::RecordedInteraction;
use crate::error::{PersistenceError, Result};

/// Extension of persisted cassette files.
pub const CASSETTE_EXTENSION: &str = "yml";

static UNSAFE_NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_/\-]+").expect("cassette name pattern is valid")
});

/// Replaces every run of characters other than word characters, `-` or `/`
/// with a single `_`. Slashes survive so names can nest into directories.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    UNSAFE_NAME_CHARS.replace_all(name, "_").into_owned()
}

/// Path of the cassette file for `name`, or `None` without a cache directory.
#[must_use]
pub fn cache_file(cache_dir: Option<&Path>, name: &str) -> Option<PathBuf> {
    cache_dir.map(|dir| dir.join(format!("{}.{CASSETTE_EXTENSION}", sanitize_name(name))))
}

/// Reads a cassette file.
///
/// # Errors
///
/// Returns [`PersistenceError::Read`] if the file cannot be read and
/// [`PersistenceError::Decode`] if it is not a valid interaction list.
pub fn load(path: &Path) -> Result<Vec<RecordedInteraction>> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| PersistenceError::Read { path: path.to_path_buf(), source })?;
    let interactions = serde_yaml::from_str(&content)
        .map_err(|source| PersistenceError::Decode { path: path.to_path_buf(), source })?;
    Ok(interactions)
}

/// Writes `interactions` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`PersistenceError::Encode`] if serialization fails and
/// [`PersistenceError::Write`] if the directory or file cannot be written.
pub fn save(path: &Path, interactions: &[RecordedInteraction]) -> Result<()> {
    let yaml = serde_yaml::to_string(interactions)
        .map_err(|source| PersistenceError::Encode { path: path.to_path_buf(), source })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|source| PersistenceError::Write { path: path.to_path_buf(), source })?;
    }
    std::fs::write(path, yaml)
        .map_err(|source| PersistenceError::Write { path: path.to_path_buf(), source })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VcrError;
    use crate::ports::http::{HttpResponse, Method};

    #[test]
    fn sanitize_collapses_runs_and_keeps_slashes() {
        assert_eq!(sanitize_name("login"), "login");
        assert_eq!(sanitize_name("api/users - list"), "api/users_-_list");
        assert_eq!(sanitize_name("a b?c!!d"), "a_b_c_d");
        assert_eq!(sanitize_name("nested/dir/name_1"), "nested/dir/name_1");
    }

    #[test]
    fn cache_file_requires_cache_dir() {
        assert_eq!(cache_file(None, "x"), None);
        assert_eq!(
            cache_file(Some(Path::new("/tmp/c")), "group/my test"),
            Some(PathBuf::from("/tmp/c/group/my_test.yml"))
        );
    }

    #[test]
    fn save_creates_nested_directories_and_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.yml");
        let get = |body: &str| {
            let response = HttpResponse::new(200, body);
            RecordedInteraction::new(Method::new("get"), "http://h:80/1", response)
        };
        let interactions = vec![get("one"), get("two")];

        save(&path, &interactions).unwrap();
        assert_eq!(load(&path).unwrap(), interactions);
    }

    #[test]
    fn load_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        std::fs::write(&path, "{ not: [a, list").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, VcrError::Persistence(PersistenceError::Decode { .. })));
    }

    #[test]
    fn save_into_file_parent_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();

        let err = save(&blocker.join("x.yml"), &[]).unwrap_err();
        assert!(matches!(err, VcrError::Persistence(PersistenceError::Write { .. })));
    }
}
