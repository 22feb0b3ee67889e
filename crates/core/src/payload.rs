//! Request payload validation for the `/save` endpoint.

use crate::error::{Error, Result};
use bytes::Bytes;
use serde_json::Value;

/// A validated `/save` submission.
///
/// `body` holds the exact received byte buffer; persistence writes these
/// bytes verbatim, so whitespace, field order, and unknown fields survive
/// the round trip. Validation never re-serializes the parsed structure.
#[derive(Clone, Debug, PartialEq)]
pub struct SavePayload {
    /// Required identifier; becomes the base filename.
    pub name: String,
    /// Optional grouping identifier; becomes the output subdirectory.
    pub major_run_id: String,
    /// Optional grouping identifier; accepted but not used for placement.
    pub minor_run_id: String,
    /// The raw request body.
    pub body: Bytes,
}

/// Validate a request body.
///
/// Fails with [`Error::MalformedJson`] when the body does not parse as JSON,
/// and with [`Error::MissingName`] when the top level carries no non-empty
/// string `name`. `majorRunId` and `minorRunId` are best-effort grouping
/// hints: absent or non-string values become empty strings, never errors.
pub fn validate(body: Bytes) -> Result<SavePayload> {
    let value: Value = serde_json::from_slice(&body)?;
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or(Error::MissingName)?
        .to_owned();

    Ok(SavePayload {
        name,
        major_run_id: string_field(&value, "majorRunId"),
        minor_run_id: string_field(&value, "minorRunId"),
        body,
    })
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(raw: &str) -> Bytes {
        Bytes::copy_from_slice(raw.as_bytes())
    }

    #[test]
    fn full_payload_extracts_all_fields() {
        let payload = validate(bytes(
            r#"{"name":"run-1","majorRunId":"exp-7","minorRunId":"trial-3","data":{"x":1}}"#,
        ))
        .unwrap();
        assert_eq!(payload.name, "run-1");
        assert_eq!(payload.major_run_id, "exp-7");
        assert_eq!(payload.minor_run_id, "trial-3");
    }

    #[test]
    fn name_alone_is_enough() {
        let payload = validate(bytes(r#"{"name":"solo"}"#)).unwrap();
        assert_eq!(payload.name, "solo");
        assert_eq!(payload.major_run_id, "");
        assert_eq!(payload.minor_run_id, "");
    }

    #[test]
    fn raw_bytes_are_preserved_exactly() {
        let raw = "{ \"name\" : \"spacing\",\n  \"unknown\": [1, 2]\t}";
        let payload = validate(bytes(raw)).unwrap();
        assert_eq!(payload.body.as_ref(), raw.as_bytes());
    }

    #[test]
    fn missing_name_is_rejected() {
        let err = validate(bytes(r#"{"data": 1}"#)).unwrap_err();
        assert!(matches!(err, Error::MissingName));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = validate(bytes(r#"{"name": ""}"#)).unwrap_err();
        assert!(matches!(err, Error::MissingName));
    }

    #[test]
    fn non_string_name_is_rejected() {
        let err = validate(bytes(r#"{"name": 42}"#)).unwrap_err();
        assert!(matches!(err, Error::MissingName));
    }

    #[test]
    fn top_level_array_has_no_name() {
        let err = validate(bytes(r#"[1, 2, 3]"#)).unwrap_err();
        assert!(matches!(err, Error::MissingName));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = validate(bytes("{not json")).unwrap_err();
        assert!(matches!(err, Error::MalformedJson(_)));
    }

    #[test]
    fn non_string_run_ids_become_empty() {
        let payload = validate(bytes(r#"{"name":"n","majorRunId":7,"minorRunId":null}"#)).unwrap();
        assert_eq!(payload.major_run_id, "");
        assert_eq!(payload.minor_run_id, "");
    }
}
