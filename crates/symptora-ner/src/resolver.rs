//! Disease name resolution against the synonym-aware disease table.
//!
//! Two modes:
//! - exact: the whole input equals a canonical name or synonym, ignoring case
//! - scan: a canonical name occurs anywhere in free text (fallback only;
//!   short names would otherwise match inside unrelated words)

use symptora_common::DiseaseTable;
use tracing::debug;

/// Resolve `input` to a canonical disease name.
///
/// Canonical names are tried first across the whole table, then synonyms;
/// both passes walk the table in document order and the first hit wins.
pub fn resolve<'a>(input: &str, table: &'a DiseaseTable) -> Option<&'a str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(record) = table.iter().find(|r| r.name.to_lowercase() == needle) {
        return Some(record.name.as_str());
    }

    table
        .iter()
        .find(|r| r.synonyms.iter().any(|s| s.trim().to_lowercase() == needle))
        .map(|r| r.name.as_str())
}

/// First canonical name (table order) occurring in `text`, ignoring case.
pub fn find_in_text<'a>(text: &str, table: &'a DiseaseTable) -> Option<&'a str> {
    let haystack = text.to_lowercase();
    if haystack.trim().is_empty() {
        return None;
    }

    table
        .iter()
        .find(|r| {
            let name = r.name.trim().to_lowercase();
            !name.is_empty() && haystack.contains(&name)
        })
        .map(|r| r.name.as_str())
}

/// Resolve a disease from an extracted parameter, falling back to scanning
/// the raw text only when no parameter was supplied.
pub fn resolve_or_scan<'a>(
    param: Option<&str>,
    raw_text: &str,
    table: &'a DiseaseTable,
) -> Option<&'a str> {
    match param.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => resolve(p, table),
        None => {
            let found = find_in_text(raw_text, table);
            debug!(found = ?found, "Disease parameter absent, scanned raw text");
            found
        }
    }
}
