//! Wire records for a routing request.
//!
//! Records are validated structurally by serde when the payload is parsed;
//! semantic checks (index ranges, non-empty quantity lists) happen in the
//! pool builders so every invalid-shape failure is raised at the boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied identifier of a job or vehicle.
///
/// The wire format accepts any JSON scalar. Strings are kept verbatim while
/// numbers and booleans keep their JSON text, so `7` and `"7"` render the
/// same way in a response.
///
/// # Examples
/// ```
/// use dispatch_core::RecordId;
///
/// let id: RecordId = serde_json::from_str("42")?;
/// assert_eq!(id.as_str(), "42");
/// let named: RecordId = serde_json::from_str(r#""van-1""#)?;
/// assert_eq!(named.to_string(), "van-1");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "Value", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Build an identifier from its rendered text.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the rendered identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<Value> for RecordId {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self(text)),
            Value::Number(number) => Ok(Self(number.to_string())),
            Value::Bool(flag) => Ok(Self(flag.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                Err("id must be a string, number or boolean".to_owned())
            }
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One vehicle of the fleet as sent by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VehicleRecord {
    /// Vehicle identifier, used as the key of the response's route map.
    pub id: RecordId,
    /// Location index where the vehicle starts.
    pub start_index: usize,
    /// Capacity per dimension; only the first entry is used.
    pub capacity: Vec<u64>,
}

/// One delivery job as sent by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JobRecord {
    /// Job identifier, echoed in the vehicle's job list.
    pub id: RecordId,
    /// Location index where the job is delivered.
    pub location_index: usize,
    /// Delivered quantity per dimension; only the first entry is used.
    pub delivery: Vec<u64>,
    /// Time spent serving the job at its location.
    pub service: u64,
}

/// A complete routing request.
///
/// # Examples
/// ```
/// use dispatch_core::SolveRequest;
///
/// let request: SolveRequest = serde_json::from_str(
///     r#"{
///         "matrix": [[0, 1], [1, 0]],
///         "vehicles": [{"id": "v1", "start_index": 0, "capacity": [10]}],
///         "jobs": [{"id": "j1", "location_index": 1, "delivery": [1], "service": 0}]
///     }"#,
/// )?;
/// assert_eq!(request.vehicles.len(), 1);
/// assert_eq!(request.jobs[0].location_index, 1);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SolveRequest {
    /// Square travel-time matrix between locations.
    pub matrix: Vec<Vec<u64>>,
    /// Fleet definition.
    pub vehicles: Vec<VehicleRecord>,
    /// Jobs to deliver.
    pub jobs: Vec<JobRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\"j1\"", "j1")]
    #[case("7", "7")]
    #[case("2.5", "2.5")]
    #[case("true", "true")]
    fn record_id_renders_scalars(#[case] raw: &str, #[case] expected: &str) {
        let id: RecordId = serde_json::from_str(raw).expect("scalar id");
        assert_eq!(id.as_str(), expected);
    }

    #[rstest]
    #[case("null")]
    #[case("[1]")]
    #[case("{\"a\": 1}")]
    fn record_id_rejects_non_scalars(#[case] raw: &str) {
        let result: Result<RecordId, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }

    #[rstest]
    fn record_id_serializes_as_string() {
        let id: RecordId = serde_json::from_str("12").expect("numeric id");
        let rendered = serde_json::to_string(&id).expect("serialize id");
        assert_eq!(rendered, "\"12\"");
    }

    #[rstest]
    fn missing_job_field_is_rejected() {
        let payload = r#"{
            "matrix": [[0]],
            "vehicles": [],
            "jobs": [{"id": "j1", "location_index": 0, "delivery": [1]}]
        }"#;
        let result: Result<SolveRequest, _> = serde_json::from_str(payload);
        assert!(result.is_err());
    }

    #[rstest]
    fn negative_costs_are_rejected() {
        let payload = r#"{"matrix": [[0, -1], [1, 0]], "vehicles": [], "jobs": []}"#;
        let result: Result<SolveRequest, _> = serde_json::from_str(payload);
        assert!(result.is_err());
    }
}
