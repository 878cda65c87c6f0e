//! Domain models for the firewatch system.

mod coverage;
mod medical;
mod reports;
mod resident;
mod roster;

pub use coverage::*;
pub use medical::*;
pub use reports::*;
pub use resident::*;
pub use roster::*;
