//! Persistence gateway for the roster document.
//!
//! The whole data set is loaded once at startup and rewritten in full on
//! every mutation. Gateways hold no query logic.

mod json_file;
mod memory;

pub use json_file::*;
pub use memory::*;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::Roster;

/// Bundled default document, materialized as the working file on first run.
pub const DEFAULT_DOCUMENT: &str = include_str!("../../data/default.json");

/// Persistence errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Cannot read data file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write data file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid data document ({origin}): {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backing store unavailable")]
    Unavailable,
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Load/store access to the backing document.
pub trait Gateway: Send + Sync {
    /// Load the full data set.
    fn load(&self) -> PersistenceResult<Roster>;

    /// Overwrite the backing document with the full data set.
    fn save(&self, roster: &Roster) -> PersistenceResult<()>;
}

/// Parse a roster document, tagging errors with where it came from.
pub fn parse_document(text: &str, origin: &str) -> PersistenceResult<Roster> {
    serde_json::from_str(text).map_err(|source| PersistenceError::Parse {
        origin: origin.to_string(),
        source,
    })
}
