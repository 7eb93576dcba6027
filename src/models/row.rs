// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display rows handed to the chart/table renderer.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Source shown when a record has no source app.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// One plotted steps entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NormalizedRow {
    /// Day of the record (DD-MM-YYYY)
    pub date: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub count: i64,
    pub source: String,
}
