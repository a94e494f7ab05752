// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for authfetch
//!
//! Transport failures, unusable request targets and the failures of the
//! explicit auth operations (`get_current_user`, `force_refresh`).
//! HTTP error statuses seen by the interceptor are *not* errors; they are
//! returned to the caller as ordinary responses.

use std::fmt;

use thiserror::Error;

/// Result type alias for authfetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Backend endpoint an auth operation talked to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Identity ("who am I") endpoint
    Me,
    /// Token refresh endpoint
    Refresh,
}

impl Endpoint {
    /// Short tag used in reason codes (`ME_401`, `REFRESH_500`)
    pub fn tag(&self) -> &'static str {
        match self {
            Endpoint::Me => "ME",
            Endpoint::Refresh => "REFRESH",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Me => write!(f, "identity"),
            Endpoint::Refresh => write!(f, "refresh"),
        }
    }
}

/// Main error type for authfetch
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Absolute-path URL with no origin to resolve it against
    #[error("Cannot resolve relative URL '{0}' without a configured origin")]
    RelativeUrl(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Auth endpoint answered with a non-success status
    #[error("{endpoint} request failed with status {status}")]
    Status { endpoint: Endpoint, status: u16 },

    /// No access token available to exchange
    #[error("No access token available to refresh")]
    NoAccessToken,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a status error for an auth endpoint
    pub fn status(endpoint: Endpoint, status: u16) -> Self {
        Error::Status { endpoint, status }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a transport-level error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Stable machine-readable reason, e.g. `ME_401`, `REFRESH_500`,
    /// `NO_OLD_ACCESS`
    pub fn reason_code(&self) -> Option<String> {
        match self {
            Error::Status { endpoint, status } => Some(format!("{}_{}", endpoint.tag(), status)),
            Error::NoAccessToken => Some("NO_OLD_ACCESS".to_string()),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
