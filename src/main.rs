// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HCGateway Dashboard API Server
//!
//! Serves normalized HCGateway steps data to the chart/table frontend.

use hcgateway_dashboard::{
    config::Config,
    services::{HcGatewayService, StepsService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        base_url = %config.hcgateway_base_url,
        default_credentials = config.default_credentials().is_some(),
        "Starting HCGateway Dashboard"
    );

    // One token cache for the whole process
    let gateway = HcGatewayService::from_config(&config)?;
    let steps_service = StepsService::new(gateway);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        steps_service,
    });

    // Build router
    let app = hcgateway_dashboard::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hcgateway_dashboard=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
