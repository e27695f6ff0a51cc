//! Score normalisation helpers.

/// Share of a disease's known symptoms that matched, as a percentage rounded
/// to one decimal place and clamped to [0, 100]. Zero when the disease has no
/// known symptoms.
pub fn match_percent(match_count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = 100.0 * match_count as f64 / total as f64;
    round1(raw).clamp(0.0, 100.0)
}

/// Round half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Lowercased, trimmed comparison key for symptom strings.
pub fn symptom_key(symptom: &str) -> String {
    symptom.trim().to_lowercase()
}
