//! Configuration for the roster store.

use std::path::{Path, PathBuf};

/// Environment variable overriding the working data file path.
pub const DATA_FILE_ENV: &str = "FIREWATCH_DATA_FILE";

/// Working data file used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "./data/data.json";

/// Configuration for opening a [`crate::store::Store`] on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Working JSON file; created from the bundled default when missing
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl StoreConfig {
    pub fn new<P: AsRef<Path>>(data_file: P) -> Self {
        Self {
            data_file: data_file.as_ref().to_path_buf(),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(DATA_FILE_ENV) {
            Some(path) if !path.trim().is_empty() => Self::new(path.trim()),
            _ => Self::default(),
        }
    }
}
