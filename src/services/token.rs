// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token lifecycle for the HCGateway API.
//!
//! The manager only records what the server told us. Freshness is decided
//! solely by comparing the stored expiry against the clock, with a
//! 5-minute safety margin so a token is never used while it may expire
//! mid-request.

use crate::models::TokenResponse;
use crate::time_utils::parse_iso8601;
use chrono::{DateTime, Duration, Utc};

/// Margin before token expiration when we proactively renew (5 minutes).
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 5 * 60;

/// Observable state of the stored token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// No access token has been issued.
    Absent,
    /// Access token usable for longer than the margin.
    Valid,
    /// Access token expires within the margin, has expired, or has no
    /// known expiry. Must be refreshed or reissued.
    Expiring,
}

/// Stored tokens, created empty and overwritten by each successful
/// login/refresh.
#[derive(Debug, Default)]
pub struct TokenManager {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expiry: Option<DateTime<Utc>>,
}

impl TokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }

    /// Classify the stored token as of `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> TokenStatus {
        if self.access_token.is_none() {
            return TokenStatus::Absent;
        }
        match self.expiry {
            Some(expiry) if expiry - now > Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) => {
                TokenStatus::Valid
            }
            _ => TokenStatus::Expiring,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) != TokenStatus::Valid
    }

    /// Whether the token must be refreshed or reissued before use.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Overwrite all token fields from a successful login/refresh response.
    ///
    /// A missing or unparsable expiry is stored as absent, which keeps the
    /// token permanently expired.
    pub fn update(&mut self, response: TokenResponse) {
        let expiry = response
            .expiry
            .as_deref()
            .and_then(|raw| match parse_iso8601(raw) {
                Ok(dt) => Some(dt.with_timezone(&Utc)),
                Err(e) => {
                    tracing::warn!(
                        expiry = raw,
                        error = %e,
                        "Unparsable token expiry, treating as expired"
                    );
                    None
                }
            });

        self.access_token = response.token;
        self.refresh_token = response.refresh;
        self.expiry = expiry;
    }
}
