//! Visual records and their collection from raw per-visual documents.
//!
//! A `Visual` is the unit of comparison: one chart/table element,
//! characterized by its type and the set of field tokens it references.
//! Collection is deliberately forgiving — a document that does not yield a
//! usable visual is simply skipped, never fatal.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use xxhash_rust::xxh3::xxh3_64;

use crate::fields::{extract_fields, insert_token};

/// One chart/table element within a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visual {
    /// Source document name; informational only, never compared.
    pub id: String,
    /// Lower-cased visual type. May be empty when the document carries none.
    #[serde(default)]
    pub visual_type: String,
    /// Normalized field tokens. Sorted by construction (`BTreeSet`).
    pub fields: BTreeSet<String>,
}

impl Visual {
    /// Content signature over `(type, sorted fields)`. Two visuals with the
    /// same signature are duplicates for collection purposes. Components are
    /// length-prefixed so adjacent strings cannot run together.
    pub fn signature(&self) -> u64 {
        let mut buf = Vec::with_capacity(self.visual_type.len() + 16);
        push_component(&mut buf, &self.visual_type);
        for field in &self.fields {
            push_component(&mut buf, field);
        }
        xxh3_64(&buf)
    }
}

fn push_component(buf: &mut Vec<u8>, component: &str) {
    buf.extend_from_slice(&(component.len() as u64).to_le_bytes());
    buf.extend_from_slice(component.as_bytes());
}

/// A named report together with its collected visuals, in stable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportVisuals {
    pub name: String,
    pub visuals: Vec<Visual>,
    /// Documents excluded during collection (unreadable or unparsable).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub skipped_docs: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl ReportVisuals {
    pub fn new(name: impl Into<String>, visuals: Vec<Visual>) -> Self {
        Self {
            name: name.into(),
            visuals,
            skipped_docs: 0,
        }
    }
}

/// Builds a `Visual` from an explicit visual definition document
/// (the enhanced PBIR layout's `visual.json`). A document whose top level
/// is not an object cannot describe a visual and yields `None`.
pub fn visual_from_doc(id: &str, doc: &Value) -> Option<Visual> {
    if !doc.is_object() {
        return None;
    }
    let visual_type = doc_visual_type(doc);
    let mut fields = BTreeSet::new();
    collect_explicit_fields(doc, &mut fields);
    fields.append(&mut extract_fields(doc));
    Some(Visual {
        id: id.to_string(),
        visual_type,
        fields,
    })
}

/// Fallback path for arbitrary JSON documents when no explicit visual
/// definitions exist. Tokens equal to the visual's own type are noise from
/// the type declaration itself and are removed; a document that yields no
/// fields yields no visual.
pub fn visual_from_generic_doc(id: &str, doc: &Value) -> Option<Visual> {
    if !doc.is_object() {
        return None;
    }
    let visual_type = doc_visual_type(doc);
    let mut fields = BTreeSet::new();
    collect_explicit_fields(doc, &mut fields);
    fields.append(&mut extract_fields(doc));
    if !visual_type.is_empty() {
        fields.remove(&visual_type);
    }
    if fields.is_empty() {
        return None;
    }
    Some(Visual {
        id: id.to_string(),
        visual_type,
        fields,
    })
}

/// Collapses visuals sharing a `(type, sorted fields)` signature, keeping
/// the first occurrence and the original order of survivors.
pub fn dedup_visuals(visuals: Vec<Visual>) -> Vec<Visual> {
    let mut seen: FxHashSet<u64> = FxHashSet::default();
    visuals
        .into_iter()
        .filter(|v| seen.insert(v.signature()))
        .collect()
}

fn doc_visual_type(doc: &Value) -> String {
    doc.get("visualType")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| doc.get("type").and_then(Value::as_str))
        .unwrap_or("")
        .to_lowercase()
}

/// Union of the explicit `fields` array and `projections` mapping, when
/// present: string entries become tokens directly, object entries go through
/// the recursive extractor.
fn collect_explicit_fields(doc: &Value, fields: &mut BTreeSet<String>) {
    if let Some(Value::Array(items)) = doc.get("fields") {
        for item in items {
            if let Value::String(s) = item {
                insert_token(fields, s);
            }
        }
    }
    if let Some(Value::Object(projections)) = doc.get("projections") {
        for bucket in projections.values() {
            let Value::Array(items) = bucket else {
                continue;
            };
            for item in items {
                match item {
                    Value::String(s) => insert_token(fields, s),
                    Value::Object(_) => fields.append(&mut extract_fields(item)),
                    _ => {}
                }
            }
        }
    }
}
