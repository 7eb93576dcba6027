// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steps dashboard workflow.
//!
//! Handles the core flow:
//! 1. Build the date-range query on the record `end` field
//! 2. Fetch raw steps records (token management is handled by HcGatewayService)
//! 3. Strictly validate the whole batch
//! 4. Normalize records into display rows keyed by day

use crate::error::Result;
use crate::models::{
    validate_steps_list, Credentials, DataQuery, NormalizedRow, StepsRecord, UNKNOWN_SOURCE,
};
use crate::services::HcGatewayService;
use crate::time_utils::format_display_date;
use chrono::NaiveDate;

/// HCGateway method name for steps.
pub const STEPS_METHOD: &str = "steps";

/// Outcome of a successful steps fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepsReport {
    /// Rows ready for charting.
    Rows(Vec<NormalizedRow>),
    /// The API returned no records for the range.
    NoData,
    /// Records were returned but none had a usable timestamp.
    NoValidRows,
}

impl StepsReport {
    pub fn rows(&self) -> &[NormalizedRow] {
        match self {
            StepsReport::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Sum of all row counts, saturating at `i64::MAX`.
    pub fn total_steps(&self) -> i64 {
        self.rows()
            .iter()
            .fold(0i64, |total, r| total.saturating_add(r.count))
    }

    /// User-facing summary of the outcome.
    pub fn message(&self) -> &'static str {
        match self {
            StepsReport::Rows(_) => "Steps data fetched successfully.",
            StepsReport::NoData => {
                "No steps data found. Check the query, credentials, and API connectivity."
            }
            StepsReport::NoValidRows => "No valid step records to display.",
        }
    }
}

/// Convert validated steps records into display rows.
///
/// Uses `end` when it parses, otherwise `start`. Records where neither
/// parses cannot be plotted and are dropped.
pub fn normalize_steps(records: &[StepsRecord]) -> Vec<NormalizedRow> {
    let rows: Vec<NormalizedRow> = records
        .iter()
        .filter_map(|record| {
            let dt = record.end_dt().or_else(|| record.start_dt())?;
            let source = if record.source_app.is_empty() {
                UNKNOWN_SOURCE.to_string()
            } else {
                record.source_app.clone()
            };
            Some(NormalizedRow {
                date: format_display_date(&dt),
                count: record.data.count,
                source,
            })
        })
        .collect();

    let dropped = records.len() - rows.len();
    if dropped > 0 {
        tracing::warn!(
            dropped,
            total = records.len(),
            "Dropped unplottable steps records"
        );
    }

    rows
}

/// Fetches, validates and normalizes steps for the dashboard.
#[derive(Clone)]
pub struct StepsService {
    gateway: HcGatewayService,
}

impl StepsService {
    pub fn new(gateway: HcGatewayService) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &HcGatewayService {
        &self.gateway
    }

    /// Fetch steps recorded between `start` and `end` (inclusive days).
    pub async fn fetch_steps(
        &self,
        credentials: &Credentials,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<StepsReport> {
        tracing::info!(%start, %end, "Fetching steps");

        let query = DataQuery::date_range("end", start, end);
        let raw = self
            .gateway
            .fetch_data(STEPS_METHOD, &query, credentials)
            .await?;

        if raw.is_empty() {
            tracing::info!(%start, %end, "No steps records in range");
            return Ok(StepsReport::NoData);
        }

        let records = validate_steps_list(&raw).inspect_err(|e| {
            tracing::warn!(error = %e, "Steps data validation failed");
        })?;

        let rows = normalize_steps(&records);
        if rows.is_empty() {
            return Ok(StepsReport::NoValidRows);
        }

        tracing::info!(rows = rows.len(), "Steps normalized");
        Ok(StepsReport::Rows(rows))
    }
}
