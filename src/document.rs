//! Encoding contract for the vessel document.
//!
//! The document is an ordered array of opaque JSON records. On the wire it
//! is pretty-printed JSON text, base64-encoded, stored as one file.
//! Decoding is lossy-tolerant: a blob that fails any decode stage yields the
//! empty document plus a [`DecodeWarning`], so a corrupted file degrades
//! reads instead of permanently blocking them.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

/// The full ordered list of vessel records, treated as one atomic unit.
///
/// Record contents are opaque to this crate; no schema validation happens
/// here.
pub type Records = Vec<Value>;

/// Classification of a failed decode, surfaced alongside the degraded
/// (empty) document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeWarning {
    /// The stored blob is not valid base64.
    InvalidBase64,
    /// The decoded bytes are not valid UTF-8.
    InvalidUtf8,
    /// The text is not valid JSON.
    InvalidJson,
    /// The JSON parsed but is not an array.
    NotAnArray,
}

impl std::fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeWarning::InvalidBase64 => write!(f, "invalid base64"),
            DecodeWarning::InvalidUtf8 => write!(f, "invalid UTF-8"),
            DecodeWarning::InvalidJson => write!(f, "invalid JSON"),
            DecodeWarning::NotAnArray => write!(f, "not a JSON array"),
        }
    }
}

/// Serialize records to pretty-printed JSON and base64-encode the result.
pub fn encode_records(records: &[Value]) -> Result<String, serde_json::Error> {
    let text = serde_json::to_string_pretty(records)?;
    Ok(BASE64.encode(text.as_bytes()))
}

/// Decode a stored blob into records.
///
/// The blob may contain line breaks (the GitHub API wraps base64 content at
/// 60 columns); all whitespace is stripped before decoding. Any failure
/// degrades to the empty document with a warning instead of an error.
pub fn decode_records(content_base64: &str) -> (Records, Option<DecodeWarning>) {
    let compact: String = content_base64
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let bytes = match BASE64.decode(compact.as_bytes()) {
        Ok(bytes) => bytes,
        Err(_) => return (Vec::new(), Some(DecodeWarning::InvalidBase64)),
    };
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => return (Vec::new(), Some(DecodeWarning::InvalidUtf8)),
    };
    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => return (Vec::new(), Some(DecodeWarning::InvalidJson)),
    };
    match value {
        Value::Array(records) => (records, None),
        _ => (Vec::new(), Some(DecodeWarning::NotAnArray)),
    }
}
