//! Shared test fixtures for the Symptora workspace.
//!
//! The documents mirror the shape of the public health dataset: diseases with
//! synonyms, per-disease symptom and prevention lists, and an inverted
//! symptom index derived from the same symptom assignments.

pub use pretty_assertions;

pub mod fixtures {
    use serde_json::{json, Map, Value};

    pub fn diseases_json() -> Value {
        json!({
            "Influenza": { "synonyms": ["flu", "grippe"] },
            "Common Cold": { "synonyms": ["cold", "coryza"] },
            "Malaria": { "synonyms": ["jungle fever"] },
            "Dengue": { "synonyms": ["breakbone fever", "dengue fever"] },
            "Typhoid": { "synonyms": ["enteric fever"] }
        })
    }

    pub fn symptoms_json() -> Value {
        json!({
            "Influenza": ["fever", "cough", "body ache", "fatigue"],
            "Common Cold": ["cough", "sneezing", "runny nose"],
            "Malaria": ["fever", "chills", "sweating", "headache"],
            "Dengue": ["fever", "headache", "joint pain", "rash"],
            "Typhoid": ["fever", "abdominal pain", "headache"]
        })
    }

    pub fn preventions_json() -> Value {
        json!({
            "Influenza": ["Get the annual flu vaccine", "Wash hands frequently"],
            "Common Cold": ["Wash hands frequently"],
            "Malaria": ["Sleep under mosquito nets", "Use insect repellent"],
            "Dengue": ["Remove standing water", "Use insect repellent"]
        })
    }

    /// Inverted view of [`symptoms_json`], keys lowercase.
    pub fn symptom_index_json() -> Value {
        let mut index: Map<String, Value> = Map::new();
        if let Some(table) = symptoms_json().as_object() {
            for (disease, symptoms) in table {
                for symptom in symptoms.as_array().into_iter().flatten() {
                    let Some(symptom) = symptom.as_str() else { continue };
                    let entry = index
                        .entry(symptom.to_lowercase())
                        .or_insert_with(|| Value::Array(vec![]));
                    if let Value::Array(diseases) = entry {
                        diseases.push(Value::String(disease.clone()));
                    }
                }
            }
        }
        Value::Object(index)
    }

    /// The two-disease table used throughout the ranking examples.
    pub fn flu_cold_symptoms_json() -> Value {
        json!({
            "Flu": ["fever", "cough"],
            "Cold": ["cough", "sneezing"]
        })
    }
}
