//! Payload normalization and record extraction.
//!
//! Recipe dumps produced by scraping tools carry bare `NaN` tokens where a
//! value was missing. `NaN` is not JSON, so it is rewritten to `null` before
//! parsing. Only standalone tokens outside string literals are rewritten.

use std::borrow::Cow;

use recipedb_core::{CoreError, CoreResult, Recipe};
use serde_json::Value;
use tracing::debug;

const NAN_TOKEN: &[u8] = b"NaN";
const NULL_LITERAL: &str = "null";

/// Rewrites standalone `NaN`, `-NaN` and `+NaN` tokens to `null`.
///
/// Returns the input unchanged (borrowed) when there is nothing to rewrite.
pub fn normalize(raw: &str) -> Cow<'_, str> {
    if !raw.contains("NaN") {
        return Cow::Borrowed(raw);
    }

    let bytes = raw.as_bytes();
    let mut out: Option<String> = None;
    let mut flushed = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }

        if bytes[i..].starts_with(NAN_TOKEN) && is_standalone(bytes, i) {
            let start = match i.checked_sub(1) {
                Some(sign) if matches!(bytes[sign], b'-' | b'+') => sign,
                _ => i,
            };

            let buf = out.get_or_insert_with(|| String::with_capacity(raw.len()));
            buf.push_str(&raw[flushed..start]);
            buf.push_str(NULL_LITERAL);

            i += NAN_TOKEN.len();
            flushed = i;
            continue;
        }

        i += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&raw[flushed..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(raw),
    }
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_standalone(bytes: &[u8], at: usize) -> bool {
    let before = at == 0 || !is_identifier_byte(bytes[at - 1]);
    let after = bytes
        .get(at + NAN_TOKEN.len())
        .map_or(true, |b| !is_identifier_byte(*b));
    before && after
}

/// Normalizes and parses a bulk payload into recipe records.
///
/// A top-level object contributes its values in document order (keys are
/// dropped); a top-level array is taken as-is.
pub fn parse_records(raw: &str) -> CoreResult<Vec<Recipe>> {
    let normalized = normalize(raw);
    if let Cow::Owned(_) = normalized {
        debug!("Rewrote NaN tokens in payload");
    }

    let document: Value = serde_json::from_str(&normalized)
        .map_err(|e| CoreError::MalformedPayload(e.to_string()))?;

    let values = match document {
        Value::Object(map) => map.into_iter().map(|(_, value)| value).collect(),
        Value::Array(items) => items,
        other => {
            return Err(CoreError::MalformedPayload(format!(
                "expected an object or array of records, found {}",
                json_kind(&other)
            )))
        }
    };

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<Recipe>(value)
                .map_err(|e| CoreError::MalformedPayload(format!("record {index}: {e}")))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
