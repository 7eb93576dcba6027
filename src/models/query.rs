// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filter documents sent to the HCGateway fetch endpoint.

use crate::time_utils::{end_of_day_utc, start_of_day_utc};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Comparison operator understood by the fetch endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gte,
    Lte,
}

impl Comparison {
    pub fn as_operator(self) -> &'static str {
        match self {
            Comparison::Gte => "$gte",
            Comparison::Lte => "$lte",
        }
    }
}

/// Field name → (operator → operand) mapping, sent verbatim as `queries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DataQuery(BTreeMap<String, BTreeMap<&'static str, Value>>);

impl DataQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comparison on `field`. A later comparison with the same
    /// operator on the same field replaces the earlier one.
    pub fn with(mut self, field: &str, op: Comparison, operand: impl Into<Value>) -> Self {
        self.0
            .entry(field.to_string())
            .or_default()
            .insert(op.as_operator(), operand.into());
        self
    }

    /// Inclusive whole-day range on `field`: `start` 00:00:00Z to `end` 23:59:59Z.
    ///
    /// A reversed range is sent as-is; the remote simply matches nothing.
    pub fn date_range(field: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self::new()
            .with(field, Comparison::Gte, start_of_day_utc(start))
            .with(field, Comparison::Lte, end_of_day_utc(end))
    }
}
