// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire types for the HCGateway login and refresh endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /refresh`.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Token response shared by login and refresh.
///
/// All fields are optional on the wire; a missing `expiry` leaves the
/// token permanently due for renewal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer access token
    #[serde(default)]
    pub token: Option<String>,
    /// Refresh token
    #[serde(default)]
    pub refresh: Option<String>,
    /// Access token expiry (ISO 8601 with timezone)
    #[serde(default)]
    pub expiry: Option<String>,
}

/// Username and password for one authentication attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
