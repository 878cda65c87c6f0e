//! Record services: the caller-side policy around store mutations.
//!
//! Adds are refused with [`ServiceError::AlreadyExists`] when the identity
//! is taken; updates, deletes and single lookups of a missing identity fail
//! with [`ServiceError::NotFound`]. The store itself never raises either.

mod coverage;
mod medical;
mod residents;

pub use coverage::*;
pub use medical::*;
pub use residents::*;

use thiserror::Error;

use crate::store::StoreError;

/// Service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
