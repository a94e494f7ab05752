// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # authfetch - Bearer-token fetch interceptor
//!
//! Wraps an HTTP transport so every outgoing call transparently carries
//! bearer authentication, recovers from an expired token with a single
//! refresh exchange, and is retried exactly once.
//!
//! ## Features
//!
//! - Request classification: OAuth entry, refresh call, backend API, other
//! - Forced bearer policy on backend API calls (set or stripped, never stale)
//! - Untouched OAuth entry calls: no credentials, no preflight-provoking headers
//! - Content-Type only for calls that carry a body
//! - One refresh and one retry on 401, with headers rebuilt from the caller's
//!   original request
//! - Explicit `get_current_user` / `force_refresh` operations
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use authfetch::{AuthConfig, FetchInterceptor, HttpClient, HttpClientConfig, MemoryCredentialStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AuthConfig::new().api_base("https://backend.example.com");
//!     let store = Arc::new(MemoryCredentialStore::with_token(&config, "T1"));
//!     let http = HttpClient::with_config(
//!         HttpClientConfig::default().origin("https://backend.example.com")?,
//!     )?;
//!
//!     let client = FetchInterceptor::new(Arc::new(http), config, Some(store));
//!
//!     // 401 -> refresh -> retry happens inside
//!     let resp = client.get("/api/widgets").await?;
//!     println!("{} {}", resp.status, resp.text_lossy());
//!
//!     let me = client.auth_api().get_current_user().await?;
//!     println!("{}", me);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod network;

// Re-exports for convenience

// Configuration
pub use config::AuthConfig;

// Errors
pub use error::{Endpoint, Error, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Request, Response};

// Network
pub use network::{AuthApi, FetchInterceptor, NetworkClient};
pub use network::{Classification, RequestClassifier};
pub use network::{CredentialStore, Credentials, MemoryCredentialStore};
pub use network::{RefreshCoordinator, RefreshFailure, TokenGrant};

/// authfetch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
