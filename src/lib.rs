// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! HCGateway Dashboard: visualize step counts from HCGateway
//!
//! This crate authenticates against the HCGateway health-data API, fetches
//! steps records for a date range, validates and normalizes them, and
//! serves the resulting rows to a chart/table frontend.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::StepsService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub steps_service: StepsService,
}
