//! Symptom-overlap matching.
//!
//! Two algorithms over the same notion of score (distinct input symptoms a
//! disease lists):
//! - table: walk disease → symptoms
//! - index: union symptom → diseases lookups
//!
//! Given documents derived from the same symptom assignments, both produce
//! the same ranking when the index ranking is given the symptom table for
//! totals and tie order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use symptora_common::{MatchSource, SymptomIndex, SymptomTable};
use symptora_config::MatchingConfig;
use tracing::debug;

use crate::normalise::{match_percent, symptom_key};
use crate::refine::suggest_followups;

/// One candidate disease and how well it matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub disease: String,
    /// Distinct input symptoms found in the disease's symptom list.
    pub match_count: usize,
    /// Length of the disease's symptom list (0 when unknown).
    pub total_symptoms: usize,
    pub percent: f64,
}

impl MatchResult {
    fn new(disease: &str, match_count: usize, total_symptoms: usize) -> Self {
        Self {
            disease: disease.to_string(),
            match_count,
            total_symptoms,
            percent: match_percent(match_count, total_symptoms),
        }
    }
}

/// Distinct comparison keys, first occurrence first.
fn distinct_keys(symptoms: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    symptoms
        .iter()
        .map(|s| symptom_key(s))
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .collect()
}

/// Rank diseases by how many distinct input symptoms appear in their
/// symptom list.
///
/// Diseases with no match are left out. Sorted by match count descending;
/// equal counts keep table order.
pub fn rank_by_table(symptoms: &[String], table: &SymptomTable) -> Vec<MatchResult> {
    let inputs = distinct_keys(symptoms);
    if inputs.is_empty() || table.is_empty() {
        return vec![];
    }

    let mut results: Vec<MatchResult> = table
        .iter()
        .filter_map(|(disease, list)| {
            let known: HashSet<String> = list.iter().map(|s| symptom_key(s)).collect();
            let count = inputs.iter().filter(|s| known.contains(*s)).count();
            (count > 0).then(|| MatchResult::new(disease, count, list.len()))
        })
        .collect();

    // slice::sort_by is stable
    results.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    results
}

fn known_len(table: &SymptomTable, disease: &str) -> usize {
    table.get(disease).map(|s| s.len()).unwrap_or(0)
}

/// Rank diseases through the inverted symptom index.
///
/// Each disease counts the distinct input symptoms whose index entry names
/// it. With `table`, totals come from the table and ties follow table order
/// (diseases the table lacks go last); without it totals are 0 and ties keep
/// first-seen order.
pub fn rank_by_index(
    symptoms: &[String],
    index: &SymptomIndex,
    table: Option<&SymptomTable>,
) -> Vec<MatchResult> {
    let inputs = distinct_keys(symptoms);
    if inputs.is_empty() || index.is_empty() {
        return vec![];
    }

    // (disease, count) in first-seen order
    let mut counts: Vec<(String, usize)> = Vec::new();
    for symptom in &inputs {
        let mut named: HashSet<&str> = HashSet::new();
        for disease in index.diseases_for(symptom) {
            if !named.insert(disease.as_str()) {
                continue;
            }
            match counts.iter_mut().find(|(d, _)| d == disease) {
                Some((_, n)) => *n += 1,
                None => counts.push((disease.clone(), 1)),
            }
        }
    }

    if let Some(table) = table {
        counts.sort_by_key(|(d, _)| table.position(d).unwrap_or(usize::MAX));
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .iter()
        .map(|(disease, count)| {
            let total = table.map(|t| known_len(t, disease)).unwrap_or(0);
            MatchResult::new(disease, *count, total)
        })
        .collect()
}

/// Ranked matches plus follow-up symptom suggestions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    pub ranked: Vec<MatchResult>,
    pub suggestions: Vec<String>,
}

/// Configured matching: picks the algorithm, caps results, and proposes
/// follow-up symptoms.
#[derive(Debug, Clone)]
pub struct Ranker {
    pub source: MatchSource,
    /// 0 means no cap.
    pub max_results: usize,
    pub suggestion_pool: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::from(&MatchingConfig::default())
    }
}

impl From<&MatchingConfig> for Ranker {
    fn from(config: &MatchingConfig) -> Self {
        Self {
            source: config.source,
            max_results: config.max_results,
            suggestion_pool: config.suggestion_pool,
        }
    }
}

impl Ranker {
    /// Rank `symptoms`. The index is used only when it is the configured
    /// source and was supplied; otherwise the symptom table is.
    pub fn rank(
        &self,
        symptoms: &[String],
        table: &SymptomTable,
        index: Option<&SymptomIndex>,
    ) -> Ranking {
        let mut ranked = match (self.source, index) {
            (MatchSource::Index, Some(index)) => rank_by_index(symptoms, index, Some(table)),
            _ => rank_by_table(symptoms, table),
        };

        let suggestions = suggest_followups(&ranked, symptoms, table, self.suggestion_pool);

        if self.max_results > 0 {
            ranked.truncate(self.max_results);
        }

        debug!(
            source = ?self.source,
            inputs = symptoms.len(),
            matches = ranked.len(),
            suggestions = suggestions.len(),
            "Ranked symptom matches"
        );

        Ranking { ranked, suggestions }
    }
}
