// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HCGateway API client for authenticating and fetching health records.
//!
//! Handles:
//! - Login with username/password
//! - Token refresh when expired, falling back to a full login
//! - Record fetching with either response shape (bare list or `{data: [...]}`)

use crate::config::Config;
use crate::error::AppError;
use crate::models::token::{LoginRequest, RefreshRequest};
use crate::models::{Credentials, DataQuery, TokenResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::token::TokenManager;

/// Low-level HCGateway HTTP client. Holds no token state.
#[derive(Clone)]
pub struct HcGatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl HcGatewayClient {
    /// Create a client for `base_url` with a fixed per-call timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log in with username and password.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, AppError> {
        let url = format!("{}/login", self.base_url);
        self.post_json(&url, &LoginRequest { username, password }, None)
            .await
    }

    /// Exchange a refresh token for a new token set.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        let url = format!("{}/refresh", self.base_url);
        self.post_json(
            &url,
            &RefreshRequest {
                refresh: refresh_token,
            },
            None,
        )
        .await
    }

    /// Fetch raw records for `method` matching `query`.
    pub async fn fetch(
        &self,
        access_token: &str,
        method: &str,
        query: &DataQuery,
    ) -> Result<Vec<Value>, AppError> {
        let url = format!("{}/fetch/{}", self.base_url, method);
        let body = serde_json::json!({ "queries": query });
        let payload: Value = self.post_json(&url, &body, Some(access_token)).await?;
        Ok(unwrap_records(payload))
    }

    /// POST a JSON body and parse a JSON response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, AppError> {
        tracing::debug!(url = %url, "Sending HCGateway request");

        let mut request = self.http.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "HCGateway request failed");
            AppError::RequestFailed(format!("{}: {}", url, e))
        })?;

        let status = response.status();
        tracing::info!(url = %url, status = %status, "HCGateway response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %url,
                status = %status,
                body = %body,
                "HCGateway returned error status"
            );
            return Err(AppError::UpstreamStatus {
                url: url.to_string(),
                status,
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "HCGateway response was not valid JSON");
            AppError::RequestFailed(format!("{}: JSON parse error: {}", url, e))
        })
    }
}

/// Accept both response shapes from the fetch endpoint.
///
/// Deployments return either a bare list or `{"data": [...]}`. Anything
/// else is treated as no records.
pub fn unwrap_records(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(records) => records,
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(records)) => records,
            Some(other) => {
                tracing::warn!(kind = ?other, "Fetch envelope `data` is not a list, ignoring");
                Vec::new()
            }
            None => {
                tracing::warn!("Fetch envelope has no `data` field");
                Vec::new()
            }
        },
        other => {
            tracing::warn!(kind = ?other, "Unexpected fetch response shape, ignoring");
            Vec::new()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HcGatewayService - High-level service with token management
// ─────────────────────────────────────────────────────────────────────────────

/// HCGateway client paired with the token state it authenticates with.
///
/// Clones share one `TokenManager`; the lock is held for the whole
/// check-then-renew sequence so concurrent fetches never race a refresh.
#[derive(Clone)]
pub struct HcGatewayService {
    client: HcGatewayClient,
    tokens: Arc<Mutex<TokenManager>>,
}

impl HcGatewayService {
    pub fn new(client: HcGatewayClient) -> Self {
        Self {
            client,
            tokens: Arc::new(Mutex::new(TokenManager::new())),
        }
    }

    /// Build the client from application config.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client =
            HcGatewayClient::new(config.hcgateway_base_url.clone(), config.request_timeout)?;
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &HcGatewayClient {
        &self.client
    }

    /// Shared token state (exposed for inspection and tests).
    pub fn tokens(&self) -> &Arc<Mutex<TokenManager>> {
        &self.tokens
    }

    // ─── Token Management ────────────────────────────────────────────────────

    /// Return a usable access token, renewing it first if needed.
    ///
    /// 1. Current token valid → return it.
    /// 2. Refresh token held → try refresh. Failure is logged, not returned.
    /// 3. Otherwise (or after a failed refresh) → full login. A login failure
    ///    is an `AuthFailed` when a refresh already failed or the server
    ///    rejected the credentials; otherwise the transport error is returned.
    ///
    /// Token state is only written after a successful response.
    pub async fn ensure_valid_token(
        &self,
        credentials: &Credentials,
    ) -> Result<String, AppError> {
        let mut tokens = self.tokens.lock().await;

        if !tokens.is_expired() {
            if let Some(token) = tokens.access_token() {
                return Ok(token.to_string());
            }
        }

        let mut refresh_failed = false;
        if let Some(refresh_token) = tokens.refresh_token().map(str::to_string) {
            tracing::info!("Access token expired, refreshing");
            match self.client.refresh(&refresh_token).await {
                Ok(response) => {
                    tokens.update(response);
                    if let Some(token) = tokens.access_token() {
                        tracing::info!(expiry = ?tokens.expiry(), "Token refreshed");
                        return Ok(token.to_string());
                    }
                    tracing::warn!("Refresh response carried no access token");
                    refresh_failed = true;
                }
                Err(e) => {
                    refresh_failed = true;
                    tracing::warn!(
                        error = %e,
                        "Token refresh failed, attempting full authentication"
                    );
                }
            }
        }

        let response = self
            .client
            .authenticate(&credentials.username, &credentials.password)
            .await
            .map_err(|e| {
                if refresh_failed || e.is_credential_rejection() {
                    AppError::AuthFailed(e.to_string())
                } else {
                    e
                }
            })?;
        tokens.update(response);

        match tokens.access_token() {
            Some(token) => {
                tracing::info!(expiry = ?tokens.expiry(), "Authenticated with HCGateway");
                Ok(token.to_string())
            }
            None => Err(AppError::AuthFailed(
                "login response did not include an access token".to_string(),
            )),
        }
    }

    // ─── API Wrappers ────────────────────────────────────────────────────────

    /// Fetch raw records for `method`, authenticating as needed.
    ///
    /// The payload is returned unvalidated.
    pub async fn fetch_data(
        &self,
        method: &str,
        query: &DataQuery,
        credentials: &Credentials,
    ) -> Result<Vec<Value>, AppError> {
        let access_token = self.ensure_valid_token(credentials).await?;
        let records = self.client.fetch(&access_token, method, query).await?;
        tracing::debug!(method, count = records.len(), "Fetched records");
        Ok(records)
    }
}
