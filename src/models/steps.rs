// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steps records from the HCGateway `steps` method.

use super::record::{validate_records, MeasurementRecord, ValidationError};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use validator::Validate;

/// The `data` field of a steps record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StepsPayload {
    /// Step count, must be non-negative
    #[serde(deserialize_with = "integral_count")]
    #[validate(range(min = 0))]
    pub count: i64,
}

/// Accept integers and floats with no fractional part (`5000.0`).
fn integral_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = Number::deserialize(deserializer)?;
    if let Some(count) = number.as_i64() {
        return Ok(count);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(de::Error::custom(format!(
            "count must be an integer, got {}",
            number
        ))),
    }
}

/// A single steps record.
pub type StepsRecord = MeasurementRecord<StepsPayload>;

/// Validate a list of raw steps records.
pub fn validate_steps_list(raw: &[Value]) -> Result<Vec<StepsRecord>, ValidationError> {
    validate_records(raw)
}
