//! Result of a report submission.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Why a report was not accepted.
///
/// The display text is the caller-facing failure message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// No coordinate has been received or set yet.
    #[error("GPS coordinates not available")]
    PositionUnavailable,

    /// The report body could not be encoded.
    #[error("Failed to encode report: {0}")]
    Encode(String),

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("{0}")]
    InvalidResponse(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },
}

/// Outcome of [`Reporter::submit_report`](super::Reporter::submit_report).
///
/// Serializes as `{"success": true, "data": ..}` or
/// `{"success": false, "message": ..}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// The server accepted the report; `data` is its parsed response body.
    Submitted { data: Value },
    /// The report was not accepted.
    Failed(ReportError),
}

impl ReportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }

    /// Parsed server response, for successful submissions.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Submitted { data } => Some(data),
            Self::Failed(_) => None,
        }
    }

    /// Failure message, for failed submissions.
    pub fn message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    pub fn error(&self) -> Option<&ReportError> {
        match self {
            Self::Submitted { .. } => None,
            Self::Failed(error) => Some(error),
        }
    }

    /// The stored marker, when the server answers `{"status": "success", "marker": {..}}`.
    pub fn marker(&self) -> Option<&Value> {
        self.data().and_then(|data| data.get("marker"))
    }

    /// JSON rendering of the outcome, as produced by its `Serialize` impl.
    pub fn to_json(&self) -> Value {
        // Map keys are strings and values are already JSON, so this cannot fail.
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Serialize for ReportOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Self::Submitted { data } => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
            }
            Self::Failed(error) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("message", &error.to_string())?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_unavailable_message() {
        let outcome = ReportOutcome::Failed(ReportError::PositionUnavailable);
        assert!(!outcome.is_success());
        assert_eq!(outcome.message().as_deref(), Some("GPS coordinates not available"));
        assert!(outcome.data().is_none());
    }

    #[test]
    fn test_server_error_message_is_verbatim() {
        let error = ReportError::Server {
            status: 400,
            message: "Invalid data".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid data");
    }

    #[test]
    fn test_serialize_success() {
        let outcome = ReportOutcome::Submitted { data: json!({"id": 42}) };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"id": 42}}));
        assert_eq!(outcome.to_json(), value);
    }

    #[test]
    fn test_serialize_failure() {
        let outcome = ReportOutcome::Failed(ReportError::Transport("connection refused".into()));
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!({"success": false, "message": "connection refused"}));
        assert_eq!(outcome.to_json(), value);
    }

    #[test]
    fn test_to_json_matches_serialize_for_nested_data() {
        let outcome = ReportOutcome::Submitted {
            data: json!({"status": "success", "marker": {"id": "7c1e", "tags": [1, 2]}}),
        };
        assert_eq!(outcome.to_json(), serde_json::to_value(&outcome).unwrap());
        assert_eq!(outcome.to_json()["data"]["marker"]["tags"], json!([1, 2]));
    }

    #[test]
    fn test_marker_extraction() {
        let outcome = ReportOutcome::Submitted {
            data: json!({
                "status": "success",
                "marker": {"id": "7c1e", "lat": 12.97, "lng": 77.59, "reported_by": "AI Detection"}
            }),
        };
        let marker = outcome.marker().expect("marker present");
        assert_eq!(marker["reported_by"], "AI Detection");

        let bare = ReportOutcome::Submitted { data: json!({"id": 42}) };
        assert!(bare.marker().is_none());
    }
}
