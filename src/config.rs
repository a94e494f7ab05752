// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor configuration

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default path segment identifying the OAuth handshake start
pub const DEFAULT_OAUTH_PATH: &str = "/api/auth/google";
/// Default refresh endpoint path
pub const DEFAULT_REFRESH_PATH: &str = "/api/auth/refresh";
/// Default identity endpoint path
pub const DEFAULT_ME_PATH: &str = "/api/auth/me";
/// Default storage key for the access token
pub const DEFAULT_ACCESS_TOKEN_KEY: &str = "accessToken";
/// Default storage key for the refresh token
pub const DEFAULT_REFRESH_TOKEN_KEY: &str = "ipPlanningRefreshToken";

/// Auth interceptor configuration
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// API base URL, without trailing slash; empty means same-origin
    pub api_base: String,
    /// Storage key the credential store keeps the access token under
    pub access_token_key: String,
    /// Storage key the credential store keeps the refresh token under
    pub refresh_token_key: String,
    /// Path segment marking OAuth entry URLs
    pub oauth_path: String,
    /// Refresh endpoint path
    pub refresh_path: String,
    /// Identity endpoint path
    pub me_path: String,
    /// Hosts that non-API absolute URLs may carry the token to (empty = any)
    pub token_hosts: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            access_token_key: DEFAULT_ACCESS_TOKEN_KEY.to_string(),
            refresh_token_key: DEFAULT_REFRESH_TOKEN_KEY.to_string(),
            oauth_path: DEFAULT_OAUTH_PATH.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            me_path: DEFAULT_ME_PATH.to_string(),
            token_hosts: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from `AUTHFETCH_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = env::var("AUTHFETCH_API_BASE") {
            config = config.api_base(base);
        }
        if let Ok(key) = env::var("AUTHFETCH_ACCESS_TOKEN_KEY") {
            config.access_token_key = key;
        }
        if let Ok(key) = env::var("AUTHFETCH_REFRESH_TOKEN_KEY") {
            config.refresh_token_key = key;
        }
        config
    }

    /// Parse a JSON config document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        let base = config.api_base.clone();
        Ok(config.api_base(base))
    }

    /// Set API base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set refresh token storage key
    pub fn refresh_token_key(mut self, key: impl Into<String>) -> Self {
        self.refresh_token_key = key.into();
        self
    }

    /// Set OAuth entry path segment
    pub fn oauth_path(mut self, path: impl Into<String>) -> Self {
        self.oauth_path = path.into();
        self
    }

    /// Restrict token injection on non-API URLs to these hosts
    pub fn token_hosts(mut self, hosts: Vec<String>) -> Self {
        self.token_hosts = hosts;
        self
    }

    /// Full refresh endpoint URL
    pub fn refresh_url(&self) -> String {
        format!("{}{}", self.api_base, self.refresh_path)
    }

    /// Full identity endpoint URL
    pub fn me_url(&self) -> String {
        format!("{}{}", self.api_base, self.me_path)
    }
}
