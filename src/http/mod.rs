// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for authfetch
//!
//! Plain request/response values and the reqwest-backed transport that the
//! interceptor wraps.

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use request::Request;
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("authfetch/", env!("CARGO_PKG_VERSION"));

/// Common header values
pub mod headers {
    /// Content type injected for body-carrying API calls
    pub const APPLICATION_JSON: &str = "application/json";
}
