//! Result and status types produced by a submission.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::time::Duration;

/// Field label → field value pairs extracted by the recognition service.
///
/// Order is preserved exactly as received. An empty result is valid; it
/// renders as the "no structured fields" placeholder, same as a response
/// that carries no `structured_data` at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredResult {
    fields: Vec<(String, String)>,
}

impl StructuredResult {
    /// Build from a JSON object. `null` becomes an empty value. Other
    /// non-string values keep their JSON text (`42`, `true`, `{"a":1}`).
    pub fn from_json_object(map: &Map<String, Value>) -> Self {
        let fields = map
            .iter()
            .map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (k.clone(), text)
            })
            .collect();
        Self { fields }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StructuredResult {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Serialize for StructuredResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// What a successful submission returns to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub filename: String,
    pub document_type: String,
    pub fields: StructuredResult,
    /// Wall-clock time of the HTTP exchange.
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl SubmissionOutcome {
    /// Elapsed seconds with two decimals, e.g. `"1.23"`.
    pub fn elapsed_display(&self) -> String {
        format!("{:.2}", self.elapsed.as_secs_f64())
    }
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Styling hint carried with every status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Idle,
    Loading,
    Success,
    Error,
}

impl StatusKind {
    /// CSS class name used by HTML status panels.
    pub fn class_name(self) -> &'static str {
        match self {
            StatusKind::Idle => "idle",
            StatusKind::Loading => "loading",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// User-facing status of the workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowStatus {
    Idle,
    Reading,
    Submitting,
    Success { elapsed: Duration },
    Error { message: String },
}

impl WorkflowStatus {
    pub fn kind(&self) -> StatusKind {
        match self {
            WorkflowStatus::Idle => StatusKind::Idle,
            WorkflowStatus::Reading | WorkflowStatus::Submitting => StatusKind::Loading,
            WorkflowStatus::Success { .. } => StatusKind::Success,
            WorkflowStatus::Error { .. } => StatusKind::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            WorkflowStatus::Idle => "Select a file to begin.".to_string(),
            WorkflowStatus::Reading => "Reading file...".to_string(),
            WorkflowStatus::Submitting => {
                "Processing with OCR (this can take up to 3 minutes)...".to_string()
            }
            WorkflowStatus::Success { elapsed } => {
                format!("Processed! ({:.2}s)", elapsed.as_secs_f64())
            }
            WorkflowStatus::Error { message } => format!("Error: {message}"),
        }
    }
}

/// Internal state machine of [`crate::workflow::SubmissionWorkflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    /// No file selected yet.
    Idle,
    /// A file is selected; submission may be triggered.
    Ready,
    Reading,
    Submitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_object_keeps_order_and_stringifies() {
        let v = json!({"Zeta": "z", "Alpha": 1, "Mid": null, "Flag": true});
        let r = StructuredResult::from_json_object(v.as_object().unwrap());
        let keys: Vec<_> = r.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Zeta", "Alpha", "Mid", "Flag"]);
        assert_eq!(r.get("Alpha"), Some("1"));
        assert_eq!(r.get("Mid"), Some(""));
        assert_eq!(r.get("Flag"), Some("true"));
    }

    #[test]
    fn serializes_as_ordered_map() {
        let r: StructuredResult = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"b":"2","a":"1"}"#);
    }

    #[test]
    fn status_messages() {
        let ok = WorkflowStatus::Success {
            elapsed: Duration::from_millis(1234),
        };
        assert_eq!(ok.message(), "Processed! (1.23s)");
        assert_eq!(ok.kind(), StatusKind::Success);

        let err = WorkflowStatus::Error {
            message: "bad image".into(),
        };
        assert_eq!(err.message(), "Error: bad image");
        assert_eq!(err.kind().class_name(), "error");
        assert_eq!(WorkflowStatus::Submitting.kind(), StatusKind::Loading);
    }

    #[test]
    fn elapsed_display_two_decimals() {
        let o = SubmissionOutcome {
            filename: "a.png".into(),
            document_type: "invoice".into(),
            fields: StructuredResult::default(),
            elapsed: Duration::from_millis(2004),
        };
        assert_eq!(o.elapsed_display(), "2.00");
    }
}
