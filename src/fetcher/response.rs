//! Response normalization: BOM handling, result extraction, "no record" detection

use crate::error::FetchError;
use crate::types::{Identifier, Record};
use serde_json::Value;

/// UTF-8 byte-order mark some endpoints prepend to JSON bodies
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Maximum number of body characters carried into a log line
const BODY_PREVIEW_CHARS: usize = 512;

/// Strip a leading UTF-8 byte-order mark, if present
pub fn strip_bom(body: &[u8]) -> &[u8] {
    body.strip_prefix(UTF8_BOM).unwrap_or(body)
}

/// Turn a response body into a [`Record`]
///
/// The body is JSON, optionally BOM-prefixed, with the record under
/// `result_key`. The remote says "no such record" with a 2xx response whose
/// result fields are all blank or whose `echo_field` is missing; both become
/// [`FetchError::EmptyResult`].
pub fn parse_record(
    identifier: &Identifier,
    body: &[u8],
    result_key: &str,
    echo_field: &str,
) -> Result<Record, FetchError> {
    let body = strip_bom(body);
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::EmptyResult("empty response body".to_string()));
    }

    let mut document: Value = serde_json::from_slice(body).map_err(|e| FetchError::Parse {
        reason: format!("invalid JSON: {}", e),
        body: preview(body),
    })?;

    let fields = match document.get_mut(result_key).map(Value::take) {
        Some(Value::Object(fields)) => fields,
        Some(Value::Null) => {
            return Err(FetchError::EmptyResult(format!(
                "result object {:?} is null",
                result_key
            )));
        }
        Some(other) => {
            return Err(FetchError::Parse {
                reason: format!(
                    "result {:?} is {}, expected an object",
                    result_key,
                    kind(&other)
                ),
                body: preview(body),
            });
        }
        None => {
            return Err(FetchError::Parse {
                reason: format!("missing result object {:?}", result_key),
                body: preview(body),
            });
        }
    };

    if fields.values().all(is_blank) {
        return Err(FetchError::EmptyResult(
            "all result fields are empty".to_string(),
        ));
    }

    if fields.get(echo_field).is_none_or(is_blank) {
        return Err(FetchError::EmptyResult(format!(
            "result has no {:?}",
            echo_field
        )));
    }

    Ok(Record::new(identifier.clone(), fields))
}

/// Null or whitespace-only string
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Lossy, length-capped copy of the body for log lines
pub(crate) fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    }
}
