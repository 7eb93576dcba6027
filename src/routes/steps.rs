// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steps API consumed by the chart/table frontend.

use crate::error::{AppError, Result};
use crate::models::{Credentials, NormalizedRow};
use crate::services::StepsReport;
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Steps routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/steps", post(get_steps))
}

/// Steps request. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct StepsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Steps response for the renderer.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StepsResponse {
    /// "ok" or "no_data"
    pub status: String,
    pub message: String,
    pub rows: Vec<NormalizedRow>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_steps: i64,
}

impl From<StepsReport> for StepsResponse {
    fn from(report: StepsReport) -> Self {
        let status = match report {
            StepsReport::Rows(_) => "ok",
            StepsReport::NoData | StepsReport::NoValidRows => "no_data",
        };
        let total_steps = report.total_steps();
        let message = report.message().to_string();
        let rows = match report {
            StepsReport::Rows(rows) => rows,
            _ => Vec::new(),
        };

        Self {
            status: status.to_string(),
            message,
            rows,
            total_steps,
        }
    }
}

/// Default range: one month ago through today.
pub fn default_date_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.checked_sub_months(Months::new(1)).unwrap_or(today);
    (start, today)
}

/// Fetch and normalize steps for the requested range.
async fn get_steps(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StepsRequest>,
) -> Result<Json<StepsResponse>> {
    let credentials = resolve_credentials(&state, &request)?;

    let (default_start, default_end) = default_date_range(today_utc());
    let start = request.start_date.unwrap_or(default_start);
    let end = request.end_date.unwrap_or(default_end);

    let report = state
        .steps_service
        .fetch_steps(&credentials, start, end)
        .await?;

    Ok(Json(report.into()))
}

/// Request credentials win; configured defaults fill the gap.
fn resolve_credentials(state: &AppState, request: &StepsRequest) -> Result<Credentials> {
    let non_empty = |v: &Option<String>| {
        v.as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let username =
        non_empty(&request.username).or_else(|| state.config.hcgateway_username.clone());
    let password =
        non_empty(&request.password).or_else(|| state.config.hcgateway_password.clone());

    match (username, password) {
        (Some(username), Some(password)) => Ok(Credentials::new(username, password)),
        _ => Err(AppError::BadRequest(
            "Please enter both username and password.".to_string(),
        )),
    }
}
