// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic time-series record returned by the HCGateway fetch endpoint.
//!
//! Every record kind shares the same envelope (`id`, source app, `start`,
//! `end`) and differs only in its `data` payload. Validation of the
//! envelope lives here once; payload constraints are declared on the
//! payload type with `validator` attributes.

use crate::time_utils::parse_iso8601;
use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

/// Marker for types that can appear in a record's `data` field.
pub trait RecordPayload: DeserializeOwned + Validate {}

impl<T: DeserializeOwned + Validate> RecordPayload for T {}

/// Strict validation failure for a batch of raw records.
///
/// Identifies the first offending record (zero-based position in the batch)
/// and the field that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record {index}: field `{field}`: {message}")]
pub struct ValidationError {
    pub index: usize,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(index: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            index,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A single validated measurement record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord<D> {
    pub id: String,
    /// Application that wrote the record (wire name `app`, alias `sourceApp`)
    pub source_app: String,
    /// Start timestamp as received (ISO 8601)
    pub start: String,
    /// End timestamp as received (ISO 8601)
    pub end: String,
    pub data: D,
}

impl<D> MeasurementRecord<D> {
    /// Best-effort parse of `start`; `None` if it does not parse.
    pub fn start_dt(&self) -> Option<DateTime<FixedOffset>> {
        parse_iso8601(&self.start).ok()
    }

    /// Best-effort parse of `end`; `None` if it does not parse.
    pub fn end_dt(&self) -> Option<DateTime<FixedOffset>> {
        parse_iso8601(&self.end).ok()
    }
}

impl<D: RecordPayload> MeasurementRecord<D> {
    /// Strictly validate one raw record at position `index` of its batch.
    pub fn from_raw(index: usize, raw: &Value) -> Result<Self, ValidationError> {
        let obj = raw
            .as_object()
            .ok_or_else(|| ValidationError::new(index, "record", "expected a JSON object"))?;

        let id = string_field(index, obj, "id")?;
        let source_app = match (obj.get("app"), obj.get("sourceApp")) {
            (None, Some(_)) => string_field(index, obj, "sourceApp")?,
            _ => string_field(index, obj, "app")?,
        };
        let start = datetime_field(index, obj, "start")?;
        let end = datetime_field(index, obj, "end")?;

        let data_value = obj
            .get("data")
            .ok_or_else(|| ValidationError::new(index, "data", "field required"))?;
        let data: D = serde_json::from_value(data_value.clone())
            .map_err(|e| ValidationError::new(index, "data", e.to_string()))?;
        data.validate().map_err(|errors| {
            let mut fields: Vec<_> = errors.field_errors().into_keys().collect();
            fields.sort();
            let field = match fields.first() {
                Some(name) => format!("data.{}", name),
                None => "data".to_string(),
            };
            ValidationError::new(index, field, errors.to_string())
        })?;

        Ok(Self {
            id,
            source_app,
            start,
            end,
            data,
        })
    }
}

/// Validate a whole batch, failing on the first invalid record.
pub fn validate_records<D: RecordPayload>(
    raw: &[Value],
) -> Result<Vec<MeasurementRecord<D>>, ValidationError> {
    raw.iter()
        .enumerate()
        .map(|(index, item)| MeasurementRecord::from_raw(index, item))
        .collect()
}

fn string_field(
    index: usize,
    obj: &Map<String, Value>,
    name: &str,
) -> Result<String, ValidationError> {
    match obj.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ValidationError::new(
            index,
            name,
            format!("expected a string, got {}", json_type_name(other)),
        )),
        None => Err(ValidationError::new(index, name, "field required")),
    }
}

fn datetime_field(
    index: usize,
    obj: &Map<String, Value>,
    name: &str,
) -> Result<String, ValidationError> {
    let value = string_field(index, obj, name)?;
    parse_iso8601(&value).map_err(|_| {
        ValidationError::new(
            index,
            name,
            format!("invalid ISO 8601 datetime: {}", value),
        )
    })?;
    Ok(value)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
