//! symptora-ranker: Symptom-to-disease matching, ranking and result assembly.

pub mod matcher;
pub mod normalise;
pub mod refine;
pub mod response;

pub use matcher::{rank_by_index, rank_by_table, MatchResult, Ranker, Ranking};
pub use response::{HealthResult, RankedDisease, ResultKind};
