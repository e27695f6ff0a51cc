//! Display text and platform envelopes.

use std::io::Cursor;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{json, Value};
use symptora_ranker::{HealthResult, ResultKind};

use crate::fulfillment::{Fulfillment, Intent};

/// Last-resort reply when a request could not be handled at all.
pub const APOLOGY: &str = "Sorry, something went wrong while answering. Please try again.";

pub const MISSING_INPUT: &str =
    "Please tell me a disease name, or list your symptoms (for example: fever, cough and headache).";

/// Used only if the TwiML writer itself fails.
pub const FALLBACK_TWIML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>Sorry, something went wrong while answering. Please try again.</Message></Response>";

/// Human-readable reply. Never empty.
pub fn render_text(fulfillment: &Fulfillment) -> String {
    let result = &fulfillment.result;
    match result.kind {
        ResultKind::DiseaseInfo => {
            render_disease(result, fulfillment.intent == Intent::PreventionInfo)
        }
        ResultKind::SymptomMatch => render_matches(result),
        ResultKind::NotFound if result.is_missing_input() => MISSING_INPUT.to_string(),
        ResultKind::NotFound => format!(
            "Sorry, I don't have information about '{}'.",
            result.query.as_deref().unwrap_or_default()
        ),
    }
}

fn render_disease(result: &HealthResult, prevention_first: bool) -> String {
    let name = result.primary_entity.as_deref().unwrap_or_default();
    let symptoms = format!("Symptoms: {}", result.symptoms.join(", "));
    let prevention = format!("Prevention: {}", result.preventions.join("; "));
    if prevention_first {
        format!("**{name}**\n{prevention}\n{symptoms}")
    } else {
        format!("**{name}**\n{symptoms}\n{prevention}")
    }
}

fn render_matches(result: &HealthResult) -> String {
    let mut out = format!("Possible conditions for {}:", result.symptoms.join(", "));
    for (i, d) in result.ranked.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {} ({} matching, {:.1}%)",
            i + 1,
            d.disease,
            d.match_count,
            d.percent
        ));
    }
    if !result.suggestions.is_empty() {
        out.push_str(&format!("\nDo you also have: {}?", result.suggestions.join(", ")));
    }
    out
}

/// Fulfillment webhook reply: display text plus the structured result.
pub fn webhook_reply(fulfillment: &Fulfillment) -> Value {
    json!({
        "fulfillmentText": render_text(fulfillment),
        "payload": { "symptora": fulfillment.result },
    })
}

pub fn apology_reply() -> Value {
    json!({ "fulfillmentText": APOLOGY })
}

/// `<Response><Message>…</Message></Response>` for the SMS gateway.
pub fn twiml(message: &str) -> anyhow::Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("Response")))?;
    writer.write_event(Event::Start(BytesStart::new("Message")))?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(message))))?;
    writer.write_event(Event::End(BytesEnd::new("Message")))?;
    writer.write_event(Event::End(BytesEnd::new("Response")))?;
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}
