//! Settings shared by every cassette a harness opens.

use std::path::{Path, PathBuf};

use crate::cassette::mode::RecordMode;
use crate::error::{Result, VcrError};

/// Environment variable naming the cassette cache directory.
pub const CACHE_DIR_VAR: &str = "NETVCR_CACHE_DIR";
/// Environment variable naming the default record mode.
pub const RECORD_MODE_VAR: &str = "NETVCR_RECORD_MODE";

/// Cache directory and default record mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    cache_dir: Option<PathBuf>,
    default_record_mode: RecordMode,
}

impl Config {
    /// Builds a config from `NETVCR_CACHE_DIR` and `NETVCR_RECORD_MODE`,
    /// loading a `.env` file first when one is present.
    ///
    /// # Errors
    ///
    /// Returns [`VcrError::EnvFile`] if a `.env` file exists but is
    /// malformed, and otherwise fails like [`Config::from_values`].
    pub fn from_env() -> Result<Self> {
        ignore_missing(dotenvy::dotenv())?;
        Self::from_process_env()
    }

    /// Like [`Config::from_env`], reading the dotenv file at `path` instead
    /// of searching for `.env`. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_env_file(path: &Path) -> Result<Self> {
        ignore_missing(dotenvy::from_path(path))?;
        Self::from_process_env()
    }

    fn from_process_env() -> Result<Self> {
        Self::from_values(
            std::env::var_os(CACHE_DIR_VAR).map(PathBuf::from),
            std::env::var(RECORD_MODE_VAR).ok().as_deref(),
        )
    }

    /// Builds a config through the regular setters.
    ///
    /// # Errors
    ///
    /// Same as [`Config::set_cache_dir`] and [`Config::set_default_record_mode`].
    pub fn from_values(cache_dir: Option<PathBuf>, record_mode: Option<&str>) -> Result<Self> {
        let mut config = Self::default();
        config.set_cache_dir(cache_dir)?;
        if let Some(mode) = record_mode {
            config.set_default_record_mode(mode)?;
        }
        Ok(config)
    }

    /// Directory cassette files are stored under.
    #[must_use]
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    /// Sets the cache directory, eagerly creating it and its ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`VcrError::CacheDir`] if the directory cannot be created.
    pub fn set_cache_dir(&mut self, cache_dir: Option<PathBuf>) -> Result<()> {
        if let Some(dir) = &cache_dir {
            std::fs::create_dir_all(dir)
                .map_err(|source| VcrError::CacheDir { path: dir.clone(), source })?;
        }
        self.cache_dir = cache_dir;
        Ok(())
    }

    /// Record mode used when a cassette does not name one.
    #[must_use]
    pub fn default_record_mode(&self) -> RecordMode {
        self.default_record_mode
    }

    /// Sets the default record mode from its name.
    ///
    /// # Errors
    ///
    /// Returns [`VcrError::InvalidRecordMode`] for an unknown name; the
    /// previous value is kept.
    pub fn set_default_record_mode(&mut self, mode: &str) -> Result<()> {
        self.default_record_mode = RecordMode::validate(mode)?;
        Ok(())
    }

    /// Sets the default record mode.
    pub fn set_default_record_mode_to(&mut self, mode: RecordMode) {
        self.default_record_mode = mode;
    }
}

fn ignore_missing<T>(loaded: std::result::Result<T, dotenvy::Error>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(source) => Err(VcrError::EnvFile { source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_unregistered_without_cache_dir() {
        let config = Config::default();
        assert_eq!(config.cache_dir(), None);
        assert_eq!(config.default_record_mode(), RecordMode::Unregistered);
    }

    #[test]
    fn setting_cache_dir_creates_it() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("deep/cache/dir");
        let mut config = Config::default();

        config.set_cache_dir(Some(dir.clone())).unwrap();

        assert!(dir.is_dir());
        assert_eq!(config.cache_dir(), Some(dir.as_path()));

        config.set_cache_dir(None).unwrap();
        assert_eq!(config.cache_dir(), None);
    }

    #[test]
    fn invalid_default_record_mode_keeps_previous() {
        let mut config = Config::default();
        config.set_default_record_mode("none").unwrap();

        let err = config.set_default_record_mode("bogus").unwrap_err();

        assert!(matches!(err, VcrError::InvalidRecordMode { .. }));
        assert_eq!(config.default_record_mode(), RecordMode::None);
    }

    #[test]
    fn from_values_applies_setters() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("c");

        let config = Config::from_values(Some(dir.clone()), Some("all")).unwrap();
        assert!(dir.is_dir());
        assert_eq!(config.default_record_mode(), RecordMode::All);

        assert!(Config::from_values(None, Some("sometimes")).is_err());
    }

    // The only test touching process environment; the cases run in order.
    #[test]
    fn from_env_file_handles_missing_malformed_and_valid_files() {
        let root = tempfile::tempdir().unwrap();

        let missing = Config::from_env_file(&root.path().join("absent.env"));
        assert!(missing.is_ok());

        let malformed = root.path().join("malformed.env");
        std::fs::write(&malformed, "this line is not valid\nNETVCR_RECORD_MODE=none\n").unwrap();
        let err = Config::from_env_file(&malformed).unwrap_err();
        assert!(matches!(err, VcrError::EnvFile { .. }));

        let cache = root.path().join("cache");
        let valid = root.path().join("valid.env");
        let content = format!("NETVCR_RECORD_MODE=none\nNETVCR_CACHE_DIR={}\n", cache.display());
        std::fs::write(&valid, content).unwrap();
        let config = Config::from_env_file(&valid).unwrap();
        assert_eq!(config.default_record_mode(), RecordMode::None);
        assert_eq!(config.cache_dir(), Some(cache.as_path()));
        assert!(cache.is_dir());
    }
}
