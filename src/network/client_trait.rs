// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The network primitive seam
//!
//! Everything that sends requests depends on [`NetworkClient`] rather than a
//! concrete transport. [`HttpClient`](crate::http::HttpClient) is the raw
//! primitive; [`FetchInterceptor`](super::FetchInterceptor) implements the
//! same trait on top of it, so call sites cannot tell the two apart.

use async_trait::async_trait;

use crate::error::Result;
use crate::http::{Request, Response};

/// Something that can send a request and hand back a response
///
/// Non-2xx statuses are returned as `Ok`; only transport failures are `Err`.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use authfetch::{AuthConfig, FetchInterceptor, HttpClient, MemoryCredentialStore, NetworkClient, Request};
///
/// # async fn run() -> authfetch::Result<()> {
/// let store = Arc::new(MemoryCredentialStore::new(&AuthConfig::default()));
/// let client: Arc<dyn NetworkClient> = Arc::new(FetchInterceptor::new(
///     Arc::new(HttpClient::new()?),
///     AuthConfig::default().api_base("https://backend.example.com"),
///     Some(store),
/// ));
///
/// let resp = client.send(Request::get("https://backend.example.com/api/widgets")).await?;
/// println!("{}", resp.status);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Send a request
    async fn send(&self, request: Request) -> Result<Response>;
}
