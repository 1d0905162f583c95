//! Decoding of the mail-retrieval script response
//!
//! The script's execution API answers `{"@type": ..., "result": ...}` where
//! `result` is sometimes a JSON-encoded string holding the record array and
//! sometimes the array itself.

use crate::StoreError;
use hirelog_domain::{Email, RawEmailRecord};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// The two shapes of `result`; the string form is tried first
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptResult {
    Encoded(String),
    Records(Vec<RawEmailRecord>),
}

#[derive(Debug, Deserialize)]
struct ScriptResponse {
    #[serde(rename = "@type", default)]
    #[allow(dead_code)]
    kind: String,
    result: ScriptResult,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptPayload {
    Wrapped(ScriptResponse),
    Bare(Vec<RawEmailRecord>),
}

/// Decode a script response, or a bare array of records, into raw records
pub fn decode_script_response(json: &str) -> Result<Vec<RawEmailRecord>, StoreError> {
    let payload: ScriptPayload = serde_json::from_str(json)
        .map_err(|e| StoreError::ScriptResponse(format!("unrecognised payload: {}", e)))?;

    match payload {
        ScriptPayload::Bare(records) => Ok(records),
        ScriptPayload::Wrapped(response) => match response.result {
            ScriptResult::Records(records) => Ok(records),
            ScriptResult::Encoded(text) => serde_json::from_str(&text)
                .map_err(|e| StoreError::ScriptResponse(format!("result string is not a record array: {}", e))),
        },
    }
}

/// Load raw records from a file holding a snapshot, a script response, or a
/// bare record array
///
/// Snapshot entries contribute their embedded email record; classification
/// fields are discarded.
pub fn load_raw_records(path: impl AsRef<Path>) -> Result<Vec<RawEmailRecord>, StoreError> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)?;

    let records = match serde_json::from_str::<Vec<Email>>(&data) {
        Ok(emails) => emails.into_iter().map(|email| email.record).collect(),
        Err(_) => decode_script_response(&data)?,
    };
    info!(path = %path.display(), count = records.len(), "Loaded raw email records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    const RECORDS: &str = r#"[{"SentTime":"2025-10-03T19:02:06.000Z","Subject":"Thank you for applying to Samsara","FullSender":"no-reply@us.greenhouse-mail.io","Domain":"us.greenhouse-mail.io"}]"#;

    fn check(records: &[RawEmailRecord]) {
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Thank you for applying to Samsara");
        assert_eq!(records[0].sent_time, Utc.with_ymd_and_hms(2025, 10, 3, 19, 2, 6).unwrap());
        assert_eq!(records[0].message, "");
    }

    #[test]
    fn test_result_as_string() {
        let json = serde_json::json!({
            "@type": "type.googleapis.com/google.apps.script.v1.ExecutionResponse",
            "result": RECORDS,
        })
        .to_string();

        check(&decode_script_response(&json).unwrap());
    }

    #[test]
    fn test_result_as_array() {
        let json = format!(
            r#"{{"@type":"type.googleapis.com/google.apps.script.v1.ExecutionResponse","result":{}}}"#,
            RECORDS
        );
        check(&decode_script_response(&json).unwrap());
    }

    #[test]
    fn test_bare_array() {
        check(&decode_script_response(RECORDS).unwrap());
    }

    #[test]
    fn test_bad_shapes() {
        assert!(matches!(
            decode_script_response(r#"{"@type":"x","result":42}"#),
            Err(StoreError::ScriptResponse(_))
        ));
        assert!(matches!(
            decode_script_response(r#"{"@type":"x","result":"not json"}"#),
            Err(StoreError::ScriptResponse(_))
        ));
    }

    #[test]
    fn test_load_raw_records_from_snapshot_and_response() {
        let dir = TempDir::new().unwrap();

        let snapshot = dir.path().join("snapshot.json");
        std::fs::write(
            &snapshot,
            format!(r#"[{{"Company":"Samsara","Status":"Reject","Email":{}}}]"#, &RECORDS[1..RECORDS.len() - 1]),
        )
        .unwrap();
        check(&load_raw_records(&snapshot).unwrap());

        let response = dir.path().join("response.json");
        std::fs::write(&response, format!(r#"{{"@type":"x","result":{}}}"#, RECORDS)).unwrap();
        check(&load_raw_records(&response).unwrap());
    }
}
