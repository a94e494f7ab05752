// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Token refresh exchange
//!
//! The backend treats refresh as re-authentication of a possibly expired
//! access token: the *old access token* is presented as the bearer, not the
//! refresh token. A successful answer carries a new `access_token` and may
//! rotate the `refresh_token`.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::client_trait::NetworkClient;
use super::compose::bearer;
use super::credentials::Credentials;
use crate::error::Result;
use crate::http::{Request, Response};

/// New tokens returned by the refresh endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct TokenGrant {
    /// New access token
    pub access_token: String,
    /// Rotated refresh token, if the backend sent one
    pub refresh_token: Option<String>,
    /// Full response payload
    pub body: Value,
}

impl TokenGrant {
    /// Extract a grant; `None` unless `access_token` is a non-empty string
    pub fn from_body(body: Value) -> Option<Self> {
        let access_token = non_empty_str(&body, "access_token")?;
        let refresh_token = non_empty_str(&body, "refresh_token");
        Some(Self {
            access_token,
            refresh_token,
            body,
        })
    }
}

fn non_empty_str(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Why a refresh attempt produced no new token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshFailure {
    /// Nothing to exchange
    #[error("no access token to exchange")]
    NoToken,
    /// Refresh endpoint answered non-2xx
    #[error("refresh endpoint returned status {0}")]
    BadStatus(u16),
    /// 2xx answer without a usable `access_token`
    #[error("malformed refresh response: {0}")]
    MalformedBody(String),
    /// Request never completed
    #[error("refresh transport error: {0}")]
    Transport(String),
}

/// Performs the refresh exchange against the un-intercepted transport
#[derive(Clone)]
pub struct RefreshCoordinator {
    client: Arc<dyn NetworkClient>,
    credentials: Credentials,
    refresh_url: String,
}

impl RefreshCoordinator {
    /// Create a coordinator
    ///
    /// `client` must be the raw primitive; routing refresh through the
    /// interceptor would apply its own header policy to the exchange.
    pub fn new(
        client: Arc<dyn NetworkClient>,
        credentials: Credentials,
        refresh_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            credentials,
            refresh_url: refresh_url.into(),
        }
    }

    /// Refresh endpoint URL
    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }

    /// Credential handle shared with the interceptor
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Run the exchange; the store is written only on success
    pub async fn refresh(&self) -> std::result::Result<TokenGrant, RefreshFailure> {
        let old_token = self.credentials.token().ok_or(RefreshFailure::NoToken)?;

        let response = self
            .exchange(&old_token)
            .await
            .map_err(|e| RefreshFailure::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(RefreshFailure::BadStatus(response.status_code()));
        }

        let body: Value = response
            .json()
            .map_err(|e| RefreshFailure::MalformedBody(e.to_string()))?;
        let grant = TokenGrant::from_body(body)
            .ok_or_else(|| RefreshFailure::MalformedBody("missing access_token".to_string()))?;

        self.store_grant(&grant);
        Ok(grant)
    }

    /// Refresh, collapsing every failure to `false`
    pub async fn attempt_refresh(&self) -> bool {
        match self.refresh().await {
            Ok(grant) => {
                info!(
                    rotated_refresh_token = grant.refresh_token.is_some(),
                    "Access token refreshed"
                );
                true
            }
            Err(failure) => {
                warn!(url = %self.refresh_url, reason = %failure, "Token refresh failed");
                false
            }
        }
    }

    /// POST the old access token to the refresh endpoint
    pub(crate) async fn exchange(&self, old_token: &str) -> Result<Response> {
        let mut request = Request::post(self.refresh_url.clone());
        if let Some(value) = bearer(Some(old_token)) {
            request.headers.insert(AUTHORIZATION, value);
        }
        debug!(url = %self.refresh_url, "Sending refresh exchange");
        self.client.send(request).await
    }

    /// Write the new access token and, if rotated, the refresh token
    pub(crate) fn store_grant(&self, grant: &TokenGrant) {
        self.credentials.set_token(&grant.access_token);
        if let Some(ref refresh_token) = grant.refresh_token {
            self.credentials.set_refresh_token(refresh_token);
        }
    }
}
