//! Follow-up symptom suggestions.

use std::collections::HashSet;

use symptora_common::SymptomTable;

use crate::matcher::MatchResult;
use crate::normalise::symptom_key;

/// Symptoms of the `top_n` best-ranked diseases that the user has not
/// mentioned yet, de-duplicated (case-insensitively) in first-seen order.
///
/// Asking about these narrows down the candidates on the next turn.
pub fn suggest_followups(
    ranked: &[MatchResult],
    symptoms: &[String],
    table: &SymptomTable,
    top_n: usize,
) -> Vec<String> {
    let mut seen: HashSet<String> = symptoms.iter().map(|s| symptom_key(s)).collect();
    let mut out = Vec::new();

    for result in ranked.iter().take(top_n) {
        for symptom in table.get(&result.disease).unwrap_or(&[]) {
            let key = symptom_key(symptom);
            if !key.is_empty() && seen.insert(key) {
                out.push(symptom.trim().to_string());
            }
        }
    }
    out
}
