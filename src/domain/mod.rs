/// Domain module containing the plant-care model
///
/// This module defines the core entities (Plant, CareEvent) and the
/// scheduling rules that turn a care history into "next due" dates. Nothing
/// in here performs I/O.

pub mod care_event;
pub mod draft;
pub mod plant;
pub mod schedule;
pub mod types;

// Re-export public types for easy access
pub use care_event::*;
pub use draft::*;
pub use plant::*;
pub use schedule::{CareInterval, next_due, is_due};
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid plant name: {0}")]
    InvalidPlantName(String),
}
