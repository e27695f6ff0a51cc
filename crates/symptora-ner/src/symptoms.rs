//! Symptom normalization.
//!
//! Symptoms arrive either as a platform parameter list or embedded in a
//! message. Both shapes end up as lowercase, trimmed, de-duplicated tokens in
//! first-occurrence order.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Symptom input as delivered by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymptomInput {
    /// Free text, e.g. "fever, cough and headache".
    Text(String),
    /// One candidate symptom per element.
    List(Vec<String>),
}

impl From<&str> for SymptomInput {
    fn from(text: &str) -> Self {
        SymptomInput::Text(text.to_string())
    }
}

impl From<Vec<String>> for SymptomInput {
    fn from(items: Vec<String>) -> Self {
        SymptomInput::List(items)
    }
}

/// Normalize symptom input into distinct tokens, first occurrence first.
pub fn normalize(input: &SymptomInput) -> Vec<String> {
    let tokens: Vec<String> = match input {
        SymptomInput::List(items) => items
            .iter()
            .flat_map(|item| item.split(','))
            .map(|t| t.trim().to_lowercase())
            .collect(),
        SymptomInput::Text(text) => {
            let lower = text.to_lowercase();
            separator_regex()
                .split(&lower)
                .flat_map(|t| t.split(','))
                .map(strip_punctuation)
                .collect()
        }
    };

    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !token.is_empty() && !out.contains(&token) {
            out.push(token);
        }
    }
    out
}

/// Keep word characters and whitespace; collapse runs of whitespace.
fn strip_punctuation(token: &str) -> String {
    let kept: String = token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits on the word "and" or a comma.
fn separator_regex() -> &'static Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\band\b|,").expect("separator pattern is valid"))
}
