// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process HCGateway stub and test app builders.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use hcgateway_dashboard::config::Config;
use hcgateway_dashboard::models::Credentials;
use hcgateway_dashboard::routes::create_router;
use hcgateway_dashboard::services::{HcGatewayClient, HcGatewayService, StepsService};
use hcgateway_dashboard::AppState;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How the stub answers.
#[derive(Clone)]
#[allow(dead_code)]
pub struct StubConfig {
    /// Whether `/login` succeeds
    pub login_ok: bool,
    /// Status returned by `/login` when it fails
    pub login_error_status: StatusCode,
    /// Whether `/refresh` succeeds
    pub refresh_ok: bool,
    /// Whether issued token responses include a refresh token
    pub issue_refresh: bool,
    /// Lifetime of issued tokens; `None` omits `expiry`
    pub token_ttl_secs: Option<i64>,
    /// Status and body returned by `/fetch/{method}`
    pub fetch_status: StatusCode,
    pub fetch_body: Value,
    /// Delay before answering `/fetch/{method}`
    pub fetch_delay: Option<Duration>,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            login_ok: true,
            login_error_status: StatusCode::UNAUTHORIZED,
            refresh_ok: true,
            issue_refresh: true,
            token_ttl_secs: Some(3600),
            fetch_status: StatusCode::OK,
            fetch_body: json!([]),
            fetch_delay: None,
        }
    }
}

/// Shared stub state: configuration plus everything it observed.
#[derive(Default)]
pub struct StubState {
    pub config: Mutex<StubConfig>,
    /// Endpoint hits in order: "login", "refresh", "fetch:<method>"
    pub calls: Mutex<Vec<String>>,
    pub authorizations: Mutex<Vec<String>>,
    pub login_bodies: Mutex<Vec<Value>>,
    pub refresh_bodies: Mutex<Vec<Value>>,
    pub fetch_bodies: Mutex<Vec<Value>>,
    issued: Mutex<u32>,
}

#[allow(dead_code)]
impl StubState {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn authorizations(&self) -> Vec<String> {
        self.authorizations.lock().unwrap().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut StubConfig)) {
        f(&mut self.config.lock().unwrap());
    }

    fn issue_tokens(&self) -> Value {
        let config = self.config.lock().unwrap().clone();
        let mut issued = self.issued.lock().unwrap();
        *issued += 1;

        let mut body = json!({ "token": format!("access-{}", *issued) });
        if config.issue_refresh {
            body["refresh"] = json!(format!("refresh-{}", *issued));
        }
        if let Some(ttl) = config.token_ttl_secs {
            body["expiry"] = json!((Utc::now() + chrono::Duration::seconds(ttl)).to_rfc3339());
        }
        body
    }
}

async fn login(State(stub): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    stub.calls.lock().unwrap().push("login".to_string());
    stub.login_bodies.lock().unwrap().push(body);

    let (login_ok, error_status) = {
        let config = stub.config.lock().unwrap();
        (config.login_ok, config.login_error_status)
    };
    if !login_ok {
        return (error_status, Json(json!({"error": "login failed"}))).into_response();
    }
    Json(stub.issue_tokens()).into_response()
}

async fn refresh(State(stub): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    stub.calls.lock().unwrap().push("refresh".to_string());
    stub.refresh_bodies.lock().unwrap().push(body);

    if !stub.config.lock().unwrap().refresh_ok {
        return (StatusCode::FORBIDDEN, Json(json!({"error": "refresh revoked"})))
            .into_response();
    }
    Json(stub.issue_tokens()).into_response()
}

async fn fetch(
    State(stub): State<Arc<StubState>>,
    Path(method): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    stub.calls.lock().unwrap().push(format!("fetch:{}", method));
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    stub.authorizations.lock().unwrap().push(authorization);
    stub.fetch_bodies.lock().unwrap().push(body);

    let config = stub.config.lock().unwrap().clone();
    if let Some(delay) = config.fetch_delay {
        tokio::time::sleep(delay).await;
    }
    (config.fetch_status, Json(config.fetch_body)).into_response()
}

/// Start the stub on an ephemeral port. Returns its base URL.
pub async fn spawn_stub(config: StubConfig) -> (String, Arc<StubState>) {
    let stub = Arc::new(StubState {
        config: Mutex::new(config),
        ..StubState::default()
    });

    let app = Router::new()
        .route("/api/v2/login", post(login))
        .route("/api/v2/refresh", post(refresh))
        .route("/api/v2/fetch/{method}", post(fetch))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Stub has no local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });

    (format!("http://{}/api/v2", addr), stub)
}

/// Gateway service pointed at `base_url`.
#[allow(dead_code)]
pub fn test_gateway(base_url: &str) -> HcGatewayService {
    test_gateway_with_timeout(base_url, Duration::from_secs(5))
}

#[allow(dead_code)]
pub fn test_gateway_with_timeout(base_url: &str, timeout: Duration) -> HcGatewayService {
    let client = HcGatewayClient::new(base_url, timeout).expect("Failed to build client");
    HcGatewayService::new(client)
}

#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Credentials::new("test_user", "test_pass")
}

/// Create a test app against `base_url` with the given config overrides.
#[allow(dead_code)]
pub fn create_test_app(base_url: &str, config: Config) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        hcgateway_base_url: base_url.to_string(),
        ..config
    };
    let steps_service = StepsService::new(test_gateway(base_url));
    let state = Arc::new(AppState {
        config,
        steps_service,
    });

    (create_router(state.clone()), state)
}

/// A steps record as HCGateway returns it.
#[allow(dead_code)]
pub fn steps_record(id: &str, app: &str, end: &str, count: i64) -> Value {
    json!({
        "_id": format!("mongo-{}", id),
        "id": id,
        "app": app,
        "start": end,
        "end": end,
        "data": { "count": count },
    })
}
