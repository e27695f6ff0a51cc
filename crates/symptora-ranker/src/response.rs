//! Structured results handed back to the calling platform adapter.
//!
//! Nothing here produces display text; adapters render a [`HealthResult`]
//! into their own envelope.

use serde::{Deserialize, Serialize};

use crate::matcher::MatchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    DiseaseInfo,
    SymptomMatch,
    NotFound,
}

/// A ranked disease as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDisease {
    pub disease: String,
    pub match_count: usize,
    pub percent: f64,
}

impl From<&MatchResult> for RankedDisease {
    fn from(m: &MatchResult) -> Self {
        Self {
            disease: m.disease.clone(),
            match_count: m.match_count,
            percent: m.percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResult {
    pub kind: ResultKind,
    /// What the user asked about. Absent when no usable input was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub primary_entity: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub preventions: Vec<String>,
    #[serde(default)]
    pub ranked: Vec<RankedDisease>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl HealthResult {
    fn empty(kind: ResultKind, query: Option<String>) -> Self {
        Self {
            kind,
            query,
            primary_entity: None,
            symptoms: vec![],
            preventions: vec![],
            ranked: vec![],
            suggestions: vec![],
        }
    }

    /// A resolved disease with whatever symptom / prevention data exists.
    /// Missing lists are reported as empty.
    pub fn disease_info(
        query: &str,
        disease: &str,
        symptoms: Option<&[String]>,
        preventions: Option<&[String]>,
    ) -> Self {
        Self {
            primary_entity: Some(disease.to_string()),
            symptoms: symptoms.map(<[String]>::to_vec).unwrap_or_default(),
            preventions: preventions.map(<[String]>::to_vec).unwrap_or_default(),
            ..Self::empty(ResultKind::DiseaseInfo, Some(query.to_string()))
        }
    }

    /// Ranked matches for normalized `symptoms`; `not_found` when nothing
    /// matched.
    pub fn symptom_match(
        symptoms: Vec<String>,
        ranked: &[MatchResult],
        suggestions: Vec<String>,
    ) -> Self {
        let query = Some(symptoms.join(", "));
        if ranked.is_empty() {
            return Self { symptoms, ..Self::empty(ResultKind::NotFound, query) };
        }

        Self {
            primary_entity: ranked.first().map(|m| m.disease.clone()),
            symptoms,
            ranked: ranked.iter().map(RankedDisease::from).collect(),
            suggestions,
            ..Self::empty(ResultKind::SymptomMatch, query)
        }
    }

    /// The input named nothing we know.
    pub fn not_found(query: &str) -> Self {
        Self::empty(ResultKind::NotFound, Some(query.trim().to_string()))
    }

    /// No usable input at all; the adapter should prompt for some.
    pub fn missing_input() -> Self {
        Self::empty(ResultKind::NotFound, None)
    }

    pub fn is_missing_input(&self) -> bool {
        self.kind == ResultKind::NotFound && self.query.as_deref().map_or(true, str::is_empty)
    }
}
