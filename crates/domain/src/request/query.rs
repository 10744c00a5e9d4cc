//! Query string construction from payloads.
//!
//! Query parameters bypass the body interceptor, so callers denormalize the
//! query object themselves and flatten it here.

use chrono::SecondsFormat;

use crate::payload::{Payload, Protected};

/// Flattens a mapping into query pairs.
///
/// Arrays repeat their key once per element. Nulls, nested objects and
/// binary values are skipped; timestamps are written as RFC 3339. A
/// non-object payload yields no pairs.
#[must_use]
pub fn query_pairs(payload: &Payload) -> Vec<(String, String)> {
    let Some(map) = payload.as_object() else {
        return Vec::new();
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Payload::Array(items) => {
                pairs.extend(
                    items
                        .iter()
                        .filter_map(scalar)
                        .map(|item| (key.clone(), item)),
                );
            }
            other => {
                if let Some(item) = scalar(other) {
                    pairs.push((key.clone(), item));
                }
            }
        }
    }
    pairs
}

fn scalar(value: &Payload) -> Option<String> {
    match value {
        Payload::Bool(b) => Some(b.to_string()),
        Payload::Number(n) => Some(n.to_string()),
        Payload::String(s) => Some(s.clone()),
        Payload::Protected(inner) => match inner.as_ref() {
            Protected::Timestamp(at) => Some(at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            _ => None,
        },
        Payload::Null | Payload::Array(_) | Payload::Object(_) => None,
    }
}
