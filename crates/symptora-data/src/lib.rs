//! symptora-data: Reference data cache.
//!
//! Fetches the disease, symptom, prevention and (optional) symptom-index
//! documents over HTTP, caches each successful document for the process
//! lifetime, and hands out typed tables built from them.

pub mod fetcher;
pub mod cache;

pub use cache::{ReferenceCache, ReferenceData, SourceUrls};
pub use fetcher::{DocumentFetcher, HttpFetcher, MockFetcher};
