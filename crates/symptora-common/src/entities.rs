/// Reference tables the matching engine reads.
/// Every table keeps the key order of its source JSON document, which is
/// the order ties are broken in.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

// ---------------------------------------------------------------------------
// Diseases
// ---------------------------------------------------------------------------

/// A disease keyed by its canonical (display) name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl DiseaseRecord {
    pub fn new(name: impl Into<String>, synonyms: &[&str]) -> Self {
        Self {
            name: name.into(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Canonical name → synonyms, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiseaseTable {
    records: Vec<DiseaseRecord>,
}

impl DiseaseTable {
    /// Build from records. A repeated canonical name keeps its first position.
    pub fn new(records: Vec<DiseaseRecord>) -> Self {
        let mut table = Self::default();
        for record in records {
            if table.get(&record.name).is_none() {
                table.records.push(record);
            }
        }
        table
    }

    /// Parse the `{ "<name>": { "synonyms": [..] } }` document.
    ///
    /// Anything other than a JSON object yields an empty table. Entries whose
    /// value is not an object, or carries no `synonyms` array, are kept with
    /// no synonyms.
    pub fn from_document(doc: &Value) -> Self {
        let Some(map) = doc.as_object() else {
            return Self::default();
        };

        let records = map
            .iter()
            .map(|(name, info)| DiseaseRecord {
                name: name.clone(),
                synonyms: info
                    .get("synonyms")
                    .map(string_list)
                    .unwrap_or_default(),
            })
            .collect();

        Self::new(records)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiseaseRecord> {
        self.records.iter()
    }

    /// Exact (case-sensitive) lookup by canonical name.
    pub fn get(&self, name: &str) -> Option<&DiseaseRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Symptoms / preventions
// ---------------------------------------------------------------------------

/// Canonical disease name → ordered list of strings.
///
/// Backs both the symptom and the prevention tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListTable {
    entries: Vec<(String, Vec<String>)>,
}

pub type SymptomTable = ListTable;
pub type PreventionTable = ListTable;

impl ListTable {
    pub fn from_pairs<I, K, V, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (name, items) in pairs {
            let name = name.into();
            if table.get(&name).is_none() {
                table.entries.push((name, items.into_iter().map(Into::into).collect()));
            }
        }
        table
    }

    /// Parse the `{ "<name>": ["..", ".."] }` document.
    ///
    /// Entries whose value is not an array are dropped and later reported as
    /// "no data" for that disease.
    pub fn from_document(doc: &Value) -> Self {
        let Some(map) = doc.as_object() else {
            return Self::default();
        };

        let mut entries = Vec::with_capacity(map.len());
        for (name, items) in map {
            if !items.is_array() {
                debug!(disease = %name, "Skipping non-list table entry");
                continue;
            }
            entries.push((name.clone(), string_list(items)));
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, items)| items.as_slice())
    }

    /// Position of a disease in document order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(n, items)| (n.as_str(), items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Inverted symptom index
// ---------------------------------------------------------------------------

/// Lowercase symptom → disease names. Built and maintained upstream;
/// fetched as data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymptomIndex {
    entries: HashMap<String, Vec<String>>,
}

impl SymptomIndex {
    pub fn from_pairs<I, K, V, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for (k, v) in pairs {
            index.merge(k.as_ref(), v.into_iter().map(Into::into).collect());
        }
        index
    }

    pub fn from_document(doc: &Value) -> Self {
        let Some(map) = doc.as_object() else {
            return Self::default();
        };

        let mut index = Self::default();
        for (symptom, diseases) in map.iter().filter(|(_, d)| d.is_array()) {
            index.merge(symptom, string_list(diseases));
        }
        index
    }

    /// Keys differing only in case or padding share one entry; later lists
    /// extend earlier ones.
    fn merge(&mut self, symptom: &str, diseases: Vec<String>) {
        let entry = self.entries.entry(index_key(symptom)).or_default();
        for disease in diseases {
            if !entry.contains(&disease) {
                entry.push(disease);
            }
        }
    }

    /// Diseases listed for a symptom; empty when the symptom is unknown.
    pub fn diseases_for(&self, symptom: &str) -> &[String] {
        self.entries
            .get(&index_key(symptom))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Match source
// ---------------------------------------------------------------------------

/// Which document is the source of truth for symptom matching.
/// One per deployment; the two are never reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Disease → symptoms table.
    #[default]
    Table,
    /// Symptom → diseases inverted index.
    Index,
}

fn index_key(symptom: &str) -> String {
    symptom.trim().to_lowercase()
}

/// String elements of a JSON array; anything else is skipped.
fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
