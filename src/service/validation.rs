use crate::domain::error::{ErrorEnvelope, ErrorPayload};
use crate::domain::metrics::MetricSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

pub const REQUIRED_FIELDS: [&str; 7] = [
    "api_id",
    "uptime_percentage",
    "avg_response_time",
    "total_requests",
    "error_rate",
    "active_users",
    "security_score",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    MissingField,
    OutOfRange,
    InvalidType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub field: String,
    pub constraint: String,
    pub received: Option<Value>,
}

impl ValidationError {
    fn missing(field: &str, constraint: &str) -> Self {
        Self {
            kind: ValidationErrorKind::MissingField,
            field: field.to_string(),
            constraint: constraint.to_string(),
            received: None,
        }
    }

    fn invalid_type(field: &str, constraint: &str, received: &Value) -> Self {
        Self {
            kind: ValidationErrorKind::InvalidType,
            field: field.to_string(),
            constraint: constraint.to_string(),
            received: Some(received.clone()),
        }
    }

    fn out_of_range(field: &str, constraint: &str, received: &Value) -> Self {
        Self {
            kind: ValidationErrorKind::OutOfRange,
            field: field.to_string(),
            constraint: constraint.to_string(),
            received: Some(received.clone()),
        }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            ValidationErrorKind::MissingField => "MISSING_FIELD",
            ValidationErrorKind::OutOfRange => "OUT_OF_RANGE",
            ValidationErrorKind::InvalidType => "INVALID_TYPE",
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            details: Some(serde_json::json!({
                "field": self.field,
                "constraint": self.constraint,
                "received": self.received,
            })),
        }
    }

    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: self.to_payload(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.received) {
            (ValidationErrorKind::MissingField, _) => {
                write!(f, "missing required field `{}` ({})", self.field, self.constraint)
            }
            (_, Some(received)) => write!(
                f,
                "field `{}` must be {}, got {}",
                self.field, self.constraint, received
            ),
            (_, None) => write!(f, "field `{}` must be {}", self.field, self.constraint),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks presence of every required field first, then types and ranges in
/// field order.
pub fn validate_snapshot(raw: &Value) -> Result<MetricSnapshot, ValidationError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ValidationError::invalid_type("$", "a JSON object", raw))?;

    for field in REQUIRED_FIELDS {
        if obj.get(field).map_or(true, Value::is_null) {
            return Err(ValidationError::missing(field, "required"));
        }
    }

    let api_id = match &obj["api_id"] {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        Value::String(_) => {
            return Err(ValidationError::out_of_range(
                "api_id",
                "a non-empty string",
                &obj["api_id"],
            ))
        }
        other => return Err(ValidationError::invalid_type("api_id", "a string", other)),
    };

    Ok(MetricSnapshot {
        api_id,
        uptime_percentage: bounded(obj, "uptime_percentage", 0.0, Some(100.0))?,
        avg_response_time: bounded(obj, "avg_response_time", 0.0, None)?,
        total_requests: count(obj, "total_requests")?,
        error_rate: bounded(obj, "error_rate", 0.0, Some(100.0))?,
        active_users: count(obj, "active_users")?,
        security_score: bounded(obj, "security_score", 0.0, Some(10.0))?,
        timestamp: timestamp(obj)?,
    })
}

/// Reads the optional `base_revenue` field used for revenue projection.
pub fn base_revenue(raw: &Value) -> Result<Option<f64>, ValidationError> {
    match raw.get("base_revenue") {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| ValidationError::invalid_type("base_revenue", "a number", v)),
    }
}

/// Best-effort `api_id` for error reporting on items that fail validation.
pub fn api_id_hint(raw: &Value) -> Option<String> {
    raw.get("api_id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bounded(obj: &Map<String, Value>, field: &str, min: f64, max: Option<f64>) -> Result<f64, ValidationError> {
    let raw = &obj[field];
    let constraint = match max {
        Some(max) => format!("a number in [{min}, {max}]"),
        None => format!("a number >= {min}"),
    };
    let v = raw
        .as_f64()
        .ok_or_else(|| ValidationError::invalid_type(field, &constraint, raw))?;
    if v < min || max.is_some_and(|max| v > max) {
        return Err(ValidationError::out_of_range(field, &constraint, raw));
    }
    Ok(v)
}

fn count(obj: &Map<String, Value>, field: &str) -> Result<u64, ValidationError> {
    let raw = &obj[field];
    let constraint = "an integer >= 0";
    if let Some(v) = raw.as_u64() {
        return Ok(v);
    }
    if raw.as_i64().is_some() {
        return Err(ValidationError::out_of_range(field, constraint, raw));
    }
    Err(ValidationError::invalid_type(field, constraint, raw))
}

fn timestamp(obj: &Map<String, Value>) -> Result<DateTime<Utc>, ValidationError> {
    match obj.get("timestamp") {
        None | Some(Value::Null) => Ok(Utc::now()),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| {
                ValidationError::invalid_type("timestamp", "an RFC 3339 timestamp", &obj["timestamp"])
            }),
        Some(other) => Err(ValidationError::invalid_type(
            "timestamp",
            "an RFC 3339 timestamp",
            other,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "api_id": "api-1",
            "uptime_percentage": 99.5,
            "avg_response_time": 75,
            "total_requests": 15000,
            "error_rate": 0.5,
            "active_users": 2500,
            "security_score": 9.2
        })
    }

    #[test]
    fn accepts_valid_snapshot() {
        let s = validate_snapshot(&valid()).unwrap();
        assert_eq!(s.api_id, "api-1");
        assert_eq!(s.avg_response_time, 75.0);
        assert_eq!(s.total_requests, 15_000);
    }

    #[test]
    fn each_required_field_is_enforced() {
        for field in REQUIRED_FIELDS {
            let mut v = valid();
            v.as_object_mut().unwrap().remove(field);
            let e = validate_snapshot(&v).unwrap_err();
            assert_eq!(e.kind, ValidationErrorKind::MissingField);
            assert_eq!(e.field, field);
        }
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases = [
            ("uptime_percentage", json!(100.5)),
            ("error_rate", json!(-0.1)),
            ("avg_response_time", json!(-1)),
            ("security_score", json!(11)),
            ("total_requests", json!(-3)),
            ("api_id", json!("  ")),
        ];
        for (field, value) in cases {
            let mut v = valid();
            v[field] = value.clone();
            let e = validate_snapshot(&v).unwrap_err();
            assert_eq!(e.kind, ValidationErrorKind::OutOfRange, "{field}");
            assert_eq!(e.field, field);
            assert_eq!(e.received, Some(value));
        }
    }

    #[test]
    fn rejects_wrong_types() {
        let cases = [
            ("active_users", json!(1.5)),
            ("uptime_percentage", json!("99.9")),
            ("api_id", json!(42)),
            ("timestamp", json!("yesterday")),
        ];
        for (field, value) in cases {
            let mut v = valid();
            v[field] = value;
            let e = validate_snapshot(&v).unwrap_err();
            assert_eq!(e.kind, ValidationErrorKind::InvalidType, "{field}");
            assert_eq!(e.code(), "INVALID_TYPE");
        }
        let e = validate_snapshot(&json!([1, 2])).unwrap_err();
        assert_eq!(e.field, "$");
    }

    #[test]
    fn payload_names_field_and_constraint() {
        let mut v = valid();
        v["security_score"] = json!(12.5);
        let payload = validate_snapshot(&v).unwrap_err().to_payload();
        assert_eq!(payload.code, "OUT_OF_RANGE");
        let details = payload.details.unwrap();
        assert_eq!(details["field"], "security_score");
        assert_eq!(details["constraint"], "a number in [0, 10]");
        assert_eq!(details["received"], 12.5);
    }

    #[test]
    fn parses_optional_fields() {
        let mut v = valid();
        v["timestamp"] = json!("2026-01-02T03:04:05Z");
        v["base_revenue"] = json!(1200);
        assert_eq!(validate_snapshot(&v).unwrap().timestamp.to_rfc3339(), "2026-01-02T03:04:05+00:00");
        assert_eq!(base_revenue(&v).unwrap(), Some(1200.0));
        assert_eq!(base_revenue(&valid()).unwrap(), None);
    }
}
