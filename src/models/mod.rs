// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod query;
pub mod record;
pub mod row;
pub mod steps;
pub mod token;

pub use query::{Comparison, DataQuery};
pub use record::{validate_records, MeasurementRecord, RecordPayload, ValidationError};
pub use row::{NormalizedRow, UNKNOWN_SOURCE};
pub use steps::{validate_steps_list, StepsPayload, StepsRecord};
pub use token::{Credentials, TokenResponse};
