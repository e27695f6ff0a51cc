//! Dictionary-based entity handling for health queries.
//!
//! - [`resolver`]: disease name or synonym → canonical disease name
//! - [`symptoms`]: free text or parameter lists → normalized symptom tokens

pub mod resolver;
pub mod symptoms;

pub use resolver::{find_in_text, resolve, resolve_or_scan};
pub use symptoms::{normalize, SymptomInput};
