// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request classification
//!
//! Decides from the URL string alone which header policy a call gets.

use std::fmt;

use crate::config::AuthConfig;

/// Per-call classification tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// OAuth handshake entry point; never touched
    OAuthEntry,
    /// The token refresh endpoint itself
    RefreshCall,
    /// Backend API call; gets forced bearer policy and 401 recovery
    BackendApi,
    /// Anything else
    Other,
}

impl Classification {
    /// Whether a 401 on this call should trigger refresh-and-retry
    pub fn retries_on_unauthorized(&self) -> bool {
        matches!(self, Classification::BackendApi)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::OAuthEntry => "oauth-entry",
            Classification::RefreshCall => "refresh-call",
            Classification::BackendApi => "backend-api",
            Classification::Other => "other",
        };
        f.write_str(s)
    }
}

/// URL predicates for the interceptor
#[derive(Debug, Clone)]
pub struct RequestClassifier {
    /// `{api_base}/api`
    api_prefix: String,
    oauth_marker: String,
    refresh_marker: String,
}

impl RequestClassifier {
    /// Create a classifier
    pub fn new(
        api_base: &str,
        oauth_path: impl Into<String>,
        refresh_path: impl Into<String>,
    ) -> Self {
        Self {
            api_prefix: format!("{}/api", api_base.trim_end_matches('/')),
            oauth_marker: oauth_path.into(),
            refresh_marker: refresh_path.into(),
        }
    }

    /// Create a classifier from the auth config
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.api_base, config.oauth_path.clone(), config.refresh_path.clone())
    }

    /// URL contains the OAuth handshake segment; an empty segment never matches
    pub fn is_oauth_entry(&self, url: &str) -> bool {
        contains_marker(url, &self.oauth_marker)
    }

    /// URL contains the refresh endpoint segment; an empty segment never matches
    pub fn is_refresh_call(&self, url: &str) -> bool {
        contains_marker(url, &self.refresh_marker)
    }

    /// URL starts with `{api_base}/api` or is an absolute `/api/` path
    pub fn is_backend_api(&self, url: &str) -> bool {
        !url.is_empty() && (url.starts_with(&self.api_prefix) || url.starts_with("/api/"))
    }

    /// Classify a URL; an empty URL is [`Classification::Other`]
    pub fn classify(&self, url: &str) -> Classification {
        if self.is_oauth_entry(url) {
            Classification::OAuthEntry
        } else if self.is_refresh_call(url) {
            Classification::RefreshCall
        } else if self.is_backend_api(url) {
            Classification::BackendApi
        } else {
            Classification::Other
        }
    }
}

fn contains_marker(url: &str, marker: &str) -> bool {
    !url.is_empty() && !marker.is_empty() && url.contains(marker)
}

impl Default for RequestClassifier {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}
