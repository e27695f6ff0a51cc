//! symptora-common: Shared types, errors, and the data-host client used across all Symptora crates.

pub mod error;
pub mod entities;
pub mod sandbox;

// Re-export commonly used types
pub use entities::{DiseaseRecord, DiseaseTable, ListTable, MatchSource, PreventionTable, SymptomIndex, SymptomTable};
pub use error::{DataSourceError, SymptoraError};
