//! Intent fulfillment: platform requests and raw gateway text → [`HealthResult`].
//!
//! Everything here is synchronous over a [`ReferenceData`] snapshot; the
//! handlers take the snapshot from the cache and do the I/O.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use symptora_data::ReferenceData;
use symptora_ner::{find_in_text, normalize, resolve, resolve_or_scan, SymptomInput};
use symptora_ranker::{HealthResult, Ranker, ResultKind};
use tracing::{debug, info};

/// Marks gateway text as a symptom list rather than a disease question.
const SYMPTOMS_PREFIX: &str = "symptoms:";

// ── Dialogue platform request ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub query_result: QueryResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub intent: Option<IntentRef>,
    #[serde(default)]
    pub parameters: Option<HashMap<String, ParamValue>>,
    #[serde(default)]
    pub query_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRef {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl QueryResult {
    pub fn intent_name(&self) -> &str {
        self.intent
            .as_ref()
            .and_then(|i| i.display_name.as_deref())
            .unwrap_or_default()
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.as_ref()?.get(name)
    }

    pub fn raw_text(&self) -> &str {
        self.query_text.as_deref().unwrap_or_default()
    }
}

/// A platform parameter: a string, a list of strings, or anything else.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    List(Vec<String>),
    Other(Value),
}

impl ParamValue {
    /// The value as one non-blank string; lists give their first non-blank
    /// element.
    pub fn as_text(&self) -> Option<&str> {
        let text = match self {
            ParamValue::Text(s) => Some(s.as_str()),
            ParamValue::List(items) => items.iter().map(String::as_str).find(|s| !s.trim().is_empty()),
            ParamValue::Other(_) => None,
        };
        text.filter(|s| !s.trim().is_empty())
    }

    pub fn to_symptom_input(&self) -> Option<SymptomInput> {
        match self {
            ParamValue::Text(s) => Some(SymptomInput::Text(s.clone())),
            ParamValue::List(items) => Some(SymptomInput::List(items.clone())),
            ParamValue::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    DiseaseInfo,
    PreventionInfo,
    SymptomMatch,
    /// Unknown or absent intent; answered by routing the raw text.
    Unrouted,
}

impl Intent {
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "disease_info" => Intent::DiseaseInfo,
            "prevention_info" => Intent::PreventionInfo,
            "symptom_checker" | "symptom_match" => Intent::SymptomMatch,
            _ => Intent::Unrouted,
        }
    }
}

/// A result together with the intent that asked for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fulfillment {
    pub intent: Intent,
    pub result: HealthResult,
}

// ── Orchestration ───────────────────────────────────────────────────────────

/// Fulfil one dialogue-platform request.
pub fn fulfill(request: &WebhookRequest, data: &ReferenceData, ranker: &Ranker) -> Fulfillment {
    let query = &request.query_result;
    let intent = Intent::from_name(query.intent_name());
    let raw_text = query.raw_text();

    let result = match intent {
        Intent::DiseaseInfo | Intent::PreventionInfo => {
            let param = query
                .param("diseases")
                .and_then(ParamValue::as_text)
                .or_else(|| query.param("disease").and_then(ParamValue::as_text));
            disease_info(param, raw_text, data)
        }
        Intent::SymptomMatch => {
            let input = query.param("symptoms").and_then(ParamValue::to_symptom_input);
            symptom_match(input.as_ref(), raw_text, data, ranker)
        }
        Intent::Unrouted => route_text(raw_text, data, ranker),
    };

    info!(
        intent = query.intent_name(),
        kind = ?result.kind,
        primary = result.primary_entity.as_deref().unwrap_or("-"),
        "Fulfilled webhook request"
    );
    Fulfillment { intent, result }
}

/// Disease lookup from a platform parameter, scanning `raw_text` only when
/// no parameter was given.
pub fn disease_info(param: Option<&str>, raw_text: &str, data: &ReferenceData) -> HealthResult {
    let query = param
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| raw_text.trim());
    if query.is_empty() {
        return HealthResult::missing_input();
    }

    match resolve_or_scan(param, raw_text, &data.diseases) {
        Some(name) => disease_result(query, name, data),
        None => HealthResult::not_found(query),
    }
}

fn disease_result(query: &str, name: &str, data: &ReferenceData) -> HealthResult {
    HealthResult::disease_info(query, name, data.symptoms.get(name), data.preventions.get(name))
}

/// Symptom matching from a platform parameter, falling back to the raw
/// text when the parameter yields no symptoms.
pub fn symptom_match(
    input: Option<&SymptomInput>,
    raw_text: &str,
    data: &ReferenceData,
    ranker: &Ranker,
) -> HealthResult {
    let mut symptoms = input.map(normalize).unwrap_or_default();
    if symptoms.is_empty() {
        let text = strip_symptoms_prefix(raw_text).unwrap_or(raw_text);
        symptoms = normalize(&SymptomInput::from(text));
    }
    match_symptoms(symptoms, data, ranker)
}

fn match_symptoms(symptoms: Vec<String>, data: &ReferenceData, ranker: &Ranker) -> HealthResult {
    if symptoms.is_empty() {
        return HealthResult::missing_input();
    }
    let ranking = ranker.rank(&symptoms, &data.symptoms, data.symptom_index.as_ref());
    HealthResult::symptom_match(symptoms, &ranking.ranked, ranking.suggestions)
}

/// Route free text with no structured parameters.
///
/// A leading `symptoms:` forces symptom matching. Otherwise the whole text
/// is resolved as a disease name or synonym, then scanned for a disease name,
/// and only then treated as a symptom list.
pub fn route_text(text: &str, data: &ReferenceData, ranker: &Ranker) -> HealthResult {
    let text = text.trim();
    if text.is_empty() {
        return HealthResult::missing_input();
    }

    if let Some(rest) = strip_symptoms_prefix(text) {
        debug!("Explicit symptom list");
        return match_symptoms(normalize(&SymptomInput::from(rest)), data, ranker);
    }

    if let Some(name) = resolve(text, &data.diseases).or_else(|| find_in_text(text, &data.diseases)) {
        return disease_result(text, name, data);
    }

    let result = match_symptoms(normalize(&SymptomInput::from(text)), data, ranker);
    if result.kind == ResultKind::NotFound && !result.is_missing_input() {
        // echo what the user wrote rather than the token list
        return HealthResult::not_found(text);
    }
    result
}

fn strip_symptoms_prefix(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let head = text.get(..SYMPTOMS_PREFIX.len())?;
    head.eq_ignore_ascii_case(SYMPTOMS_PREFIX)
        .then(|| &text[SYMPTOMS_PREFIX.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use symptora_common::{DiseaseTable, PreventionTable, SymptomIndex, SymptomTable};
    use symptora_test_utils::fixtures;

    fn data() -> ReferenceData {
        ReferenceData {
            diseases: DiseaseTable::from_document(&fixtures::diseases_json()),
            symptoms: SymptomTable::from_document(&fixtures::symptoms_json()),
            preventions: PreventionTable::from_document(&fixtures::preventions_json()),
            symptom_index: None,
        }
    }

    fn request(body: Value) -> WebhookRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_param_value_shapes() {
        let params: HashMap<String, ParamValue> = serde_json::from_value(json!({
            "a": "flu",
            "b": ["", "malaria"],
            "c": 3,
            "d": ["x", 1]
        }))
        .unwrap();
        assert_eq!(params["a"].as_text(), Some("flu"));
        assert_eq!(params["b"].as_text(), Some("malaria"));
        assert_eq!(params["c"].as_text(), None);
        assert!(matches!(params["d"], ParamValue::Other(_)));
        assert_eq!(ParamValue::Text("  ".into()).as_text(), None);
    }

    #[test]
    fn test_intent_names() {
        assert_eq!(Intent::from_name("disease_info"), Intent::DiseaseInfo);
        assert_eq!(Intent::from_name("prevention_info"), Intent::PreventionInfo);
        assert_eq!(Intent::from_name("symptom_checker"), Intent::SymptomMatch);
        assert_eq!(Intent::from_name("symptom_match"), Intent::SymptomMatch);
        assert_eq!(Intent::from_name("Default Welcome Intent"), Intent::Unrouted);
    }

    #[test]
    fn test_disease_info_by_synonym() {
        let req = request(json!({
            "queryResult": {
                "intent": { "displayName": "disease_info" },
                "parameters": { "diseases": "Grippe" },
                "queryText": "tell me about grippe"
            }
        }));
        let f = fulfill(&req, &data(), &Ranker::default());
        assert_eq!(f.intent, Intent::DiseaseInfo);
        assert_eq!(f.result.kind, ResultKind::DiseaseInfo);
        assert_eq!(f.result.primary_entity.as_deref(), Some("Influenza"));
        assert_eq!(f.result.preventions.len(), 2);
    }

    #[test]
    fn test_disease_without_preventions_still_answers() {
        let r = disease_info(Some("enteric fever"), "", &data());
        assert_eq!(r.primary_entity.as_deref(), Some("Typhoid"));
        assert_eq!(r.symptoms, vec!["fever", "abdominal pain", "headache"]);
        assert!(r.preventions.is_empty());
    }

    #[test]
    fn test_unknown_parameter_is_not_found_even_if_text_names_a_disease() {
        let r = disease_info(Some("zika"), "zika or malaria?", &data());
        assert_eq!(r.kind, ResultKind::NotFound);
        assert_eq!(r.query.as_deref(), Some("zika"));
    }

    #[test]
    fn test_missing_parameters_fall_back_to_raw_text() {
        let req = request(json!({
            "queryResult": {
                "intent": { "displayName": "disease_info" },
                "parameters": {},
                "queryText": "what is dengue"
            }
        }));
        let f = fulfill(&req, &data(), &Ranker::default());
        assert_eq!(f.result.primary_entity.as_deref(), Some("Dengue"));
    }

    #[test]
    fn test_empty_request_prompts_for_input() {
        let f = fulfill(&WebhookRequest::default(), &data(), &Ranker::default());
        assert_eq!(f.intent, Intent::Unrouted);
        assert!(f.result.is_missing_input());

        let req = request(json!({
            "queryResult": {
                "intent": { "displayName": "disease_info" },
                "parameters": { "diseases": "" },
                "queryText": ""
            }
        }));
        assert!(fulfill(&req, &data(), &Ranker::default()).result.is_missing_input());
    }

    #[test]
    fn test_symptom_intent_with_list_parameter() {
        let req = request(json!({
            "queryResult": {
                "intent": { "displayName": "symptom_checker" },
                "parameters": { "symptoms": ["Fever", "cough"] },
                "queryText": "fever and cough"
            }
        }));
        let f = fulfill(&req, &data(), &Ranker::default());
        assert_eq!(f.result.kind, ResultKind::SymptomMatch);
        assert_eq!(f.result.primary_entity.as_deref(), Some("Influenza"));
        assert_eq!(f.result.ranked[0].match_count, 2);
        assert_eq!(f.result.ranked[0].percent, 50.0);
        assert_eq!(f.result.symptoms, vec!["fever", "cough"]);
    }

    #[test]
    fn test_symptom_intent_with_text_parameter() {
        let r = symptom_match(
            Some(&SymptomInput::from("fever, chills and sweating")),
            "",
            &data(),
            &Ranker::default(),
        );
        assert_eq!(r.primary_entity.as_deref(), Some("Malaria"));
        assert_eq!(r.ranked[0].percent, 75.0);
    }

    #[test]
    fn test_symptom_intent_uses_index_when_configured() {
        let mut data = data();
        data.symptom_index = Some(SymptomIndex::from_document(&fixtures::symptom_index_json()));
        let ranker = Ranker {
            source: symptora_common::MatchSource::Index,
            ..Ranker::default()
        };
        let by_index = symptom_match(Some(&SymptomInput::from("fever and headache")), "", &data, &ranker);
        let by_table = symptom_match(Some(&SymptomInput::from("fever and headache")), "", &data, &Ranker::default());
        assert_eq!(by_index.ranked, by_table.ranked);
    }

    #[test]
    fn test_unmatched_symptoms_are_not_found() {
        let r = symptom_match(Some(&SymptomInput::from("purple toes")), "", &data(), &Ranker::default());
        assert_eq!(r.kind, ResultKind::NotFound);
        assert!(!r.is_missing_input());
    }

    #[test]
    fn test_route_text_prefers_disease_names() {
        let r = route_text("Is Malaria dangerous?", &data(), &Ranker::default());
        assert_eq!(r.kind, ResultKind::DiseaseInfo);
        assert_eq!(r.primary_entity.as_deref(), Some("Malaria"));
    }

    #[test]
    fn test_route_text_resolves_synonyms_exactly() {
        let data = data();
        for (text, disease) in [
            ("flu", "Influenza"),
            ("Grippe", "Influenza"),
            ("  jungle fever ", "Malaria"),
            ("enteric fever", "Typhoid"),
            ("dengue fever", "Dengue"),
        ] {
            let r = route_text(text, &data, &Ranker::default());
            assert_eq!(r.kind, ResultKind::DiseaseInfo, "text {text:?}");
            assert_eq!(r.primary_entity.as_deref(), Some(disease), "text {text:?}");
        }
    }

    #[test]
    fn test_unrouted_webhook_resolves_synonym() {
        let req = request(json!({
            "queryResult": {
                "intent": { "displayName": "Default Fallback Intent" },
                "queryText": "coryza"
            }
        }));
        let f = fulfill(&req, &data(), &Ranker::default());
        assert_eq!(f.intent, Intent::Unrouted);
        assert_eq!(f.result.primary_entity.as_deref(), Some("Common Cold"));
    }

    #[test]
    fn test_route_text_symptoms() {
        let r = route_text("Symptoms: cough, sneezing and runny nose", &data(), &Ranker::default());
        assert_eq!(r.kind, ResultKind::SymptomMatch);
        assert_eq!(r.primary_entity.as_deref(), Some("Common Cold"));
        assert_eq!(r.ranked[0].percent, 100.0);

        let r = route_text("fever and rash", &data(), &Ranker::default());
        assert_eq!(r.primary_entity.as_deref(), Some("Dengue"));
    }

    #[test]
    fn test_route_text_negative_paths() {
        assert!(route_text("   ", &data(), &Ranker::default()).is_missing_input());
        assert!(route_text("symptoms:", &data(), &Ranker::default()).is_missing_input());

        let r = route_text("purple toes!", &data(), &Ranker::default());
        assert_eq!(r.kind, ResultKind::NotFound);
        assert_eq!(r.query.as_deref(), Some("purple toes!"));
    }

    #[test]
    fn test_strip_symptoms_prefix() {
        assert_eq!(strip_symptoms_prefix("SYMPTOMS: fever"), Some(" fever"));
        assert_eq!(strip_symptoms_prefix("symptom fever"), None);
        assert_eq!(strip_symptoms_prefix("é"), None);
    }
}
