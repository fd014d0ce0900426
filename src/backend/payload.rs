//! Backend response shapes and their normalization into a catalog.

use crate::domain::error::{LauncherError, Result};
use crate::domain::{AppRecord, AppRecordWire};
use serde_json::Value;

/// Raw answer of [`AppBackend::get_applications`](crate::backend::AppBackend::get_applications).
///
/// Backends differ in whether they hand over serialized JSON or already-decoded
/// data, so both are accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendPayload {
    /// JSON text that must decode to an array of wire records.
    Text(String),
    /// Decoded data; only an array of wire records is accepted.
    Structured(Value),
}

impl BackendPayload {
    /// Wraps already-typed wire records as a structured payload.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::MalformedResponse`] if a record cannot be
    /// encoded as JSON.
    pub fn from_records(records: &[AppRecordWire]) -> Result<Self> {
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()
            .map_err(|e| LauncherError::MalformedResponse(format!("failed to encode application record: {e}")))?;

        Ok(Self::Structured(Value::Array(values)))
    }

    /// Normalizes the payload into catalog records, preserving backend order.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::MalformedResponse`] if the text is not valid JSON,
    /// if the decoded data is not an array, or if any element is not a valid
    /// application record.
    pub fn into_catalog(self) -> Result<Vec<AppRecord>> {
        let wire: Vec<AppRecordWire> = match self {
            Self::Text(text) => serde_json::from_str(&text).map_err(|e| {
                LauncherError::MalformedResponse(format!("invalid JSON response from backend: {e}"))
            })?,
            Self::Structured(value @ Value::Array(_)) => serde_json::from_value(value).map_err(|e| {
                LauncherError::MalformedResponse(format!("invalid application record from backend: {e}"))
            })?,
            Self::Structured(other) => {
                return Err(LauncherError::MalformedResponse(format!(
                    "unexpected response format from backend: expected an array, got {}",
                    value_kind(&other)
                )));
            }
        };

        Ok(wire.into_iter().map(AppRecord::from).collect())
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_payload_decodes_in_order() {
        let payload = BackendPayload::Text(
            r#"[{"name":"Firefox","exec":"firefox","categories":"Network"},{"name":"Files","exec":"nautilus"}]"#
                .to_string(),
        );

        let catalog = payload.into_catalog().unwrap();
        let names: Vec<_> = catalog.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Firefox", "Files"]);
        assert_eq!(catalog[0].categories.as_deref(), Some("Network"));
    }

    #[test]
    fn structured_array_is_accepted() {
        let payload = BackendPayload::Structured(json!([
            {"name": "Files", "exec": "nautilus", "comment": "Access files", "isFavorite": true}
        ]));

        let catalog = payload.into_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].description.as_deref(), Some("Access files"));
        assert!(catalog[0].is_favorite);
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        assert!(BackendPayload::Text("[]".into()).into_catalog().unwrap().is_empty());
    }

    #[test]
    fn unparseable_text_is_malformed() {
        let err = BackendPayload::Text("not json".into()).into_catalog().unwrap_err();
        assert!(matches!(err, LauncherError::MalformedResponse(_)));
        assert!(err.to_string().contains("invalid JSON response"));
    }

    #[test]
    fn non_array_structure_is_malformed() {
        let err = BackendPayload::Structured(json!({"apps": []})).into_catalog().unwrap_err();
        assert!(matches!(err, LauncherError::MalformedResponse(_)));
        assert!(err.to_string().contains("unexpected response format"));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn record_missing_exec_is_malformed() {
        let err = BackendPayload::Structured(json!([{"name": "Broken"}])).into_catalog().unwrap_err();
        assert!(matches!(err, LauncherError::MalformedResponse(_)));
    }

    #[test]
    fn from_records_keeps_every_record() {
        let wire = vec![
            AppRecordWire::from(&AppRecord::new("Firefox", "firefox")),
            AppRecordWire::from(&AppRecord::new("Files", "nautilus").favorite(true)),
        ];

        let catalog = BackendPayload::from_records(&wire).unwrap().into_catalog().unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog[1].is_favorite);
    }

    #[test]
    fn from_records_round_trips_through_structured_form() {
        let wire = vec![AppRecordWire::from(&AppRecord::new("xterm", "xterm").with_icon("xterm-color"))];
        let payload = BackendPayload::from_records(&wire).unwrap();
        assert!(matches!(&payload, BackendPayload::Structured(Value::Array(items)) if items.len() == 1));

        let catalog = payload.into_catalog().unwrap();
        assert_eq!(catalog, vec![AppRecord::new("xterm", "xterm").with_icon("xterm-color")]);
    }
}
