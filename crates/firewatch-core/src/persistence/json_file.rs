//! JSON file gateway.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use tempfile::NamedTempFile;

use super::{parse_document, Gateway, PersistenceError, PersistenceResult, DEFAULT_DOCUMENT};
use crate::config::StoreConfig;
use crate::models::Roster;

/// Stores the roster as a pretty-printed JSON file.
///
/// Saves stage the full document in a temp file beside the working file and
/// rename it into place, so the working file is always a complete document.
///
/// When the working file is missing, the default document is loaded and
/// immediately written to the working path.
pub struct JsonFileGateway {
    path: PathBuf,
    default_document: Cow<'static, str>,
}

impl JsonFileGateway {
    /// Gateway on `path` with the bundled default document.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_default(path, DEFAULT_DOCUMENT)
    }

    /// Gateway on `path` with a custom default document.
    pub fn with_default<P, D>(path: P, default_document: D) -> Self
    where
        P: AsRef<Path>,
        D: Into<Cow<'static, str>>,
    {
        Self {
            path: path.as_ref().to_path_buf(),
            default_document: default_document.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.data_file)
    }

    /// Working file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_working_file(&self) -> PersistenceResult<Roster> {
        info!("Loading data from '{}'", self.path.display());
        let text = fs::read_to_string(&self.path).map_err(|source| {
            error!("Failed to read data file '{}': {}", self.path.display(), source);
            PersistenceError::Read {
                path: self.path.clone(),
                source,
            }
        })?;
        let roster = parse_document(&text, &self.path.display().to_string())?;
        let (residents, coverage, records) = roster.counts();
        info!(
            "Loaded {} resident(s), {} coverage mapping(s), {} medical record(s) from '{}'",
            residents,
            coverage,
            records,
            self.path.display()
        );
        Ok(roster)
    }

    fn bootstrap(&self) -> PersistenceResult<Roster> {
        warn!(
            "Data file '{}' not found, loading default document",
            self.path.display()
        );
        let roster = parse_document(&self.default_document, "default document")?;
        info!("Writing default document to '{}'", self.path.display());
        self.save(&roster)?;
        Ok(roster)
    }

    /// Directory holding the working file.
    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Write the full document to a temp file next to the working file.
    /// The working file is untouched until [`commit`](Self::commit).
    fn stage(&self, bytes: &[u8]) -> PersistenceResult<NamedTempFile> {
        let dir = self.directory();
        let write_err = |source: io::Error| {
            error!("Error staging data for '{}': {}", self.path.display(), source);
            PersistenceError::Write {
                path: dir.to_path_buf(),
                source,
            }
        };

        fs::create_dir_all(dir).map_err(write_err)?;
        let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
        staged.write_all(bytes).map_err(write_err)?;
        staged.as_file().sync_all().map_err(write_err)?;
        Ok(staged)
    }

    /// Rename a staged document over the working file.
    fn commit(&self, staged: NamedTempFile) -> PersistenceResult<()> {
        staged.persist(&self.path).map_err(|e| {
            error!("Error saving data to '{}': {}", self.path.display(), e.error);
            PersistenceError::Write {
                path: self.path.clone(),
                source: e.error,
            }
        })?;
        Ok(())
    }
}

impl Gateway for JsonFileGateway {
    fn load(&self) -> PersistenceResult<Roster> {
        if self.path.exists() {
            self.load_working_file()
        } else {
            self.bootstrap()
        }
    }

    fn save(&self, roster: &Roster) -> PersistenceResult<()> {
        let json = serde_json::to_string_pretty(roster)?;
        let staged = self.stage(json.as_bytes())?;
        self.commit(staged)?;
        info!("Saved data to '{}'", self.path.display());
        Ok(())
    }
}
