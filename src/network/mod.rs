// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interception and token refresh
//!
//! Classifies every outgoing call, attaches bearer credentials, and recovers
//! from a 401 with one refresh exchange and one retry.

mod api;
mod classifier;
mod client_trait;
mod compose;
mod credentials;
mod interceptor;
mod refresh;

#[cfg(test)]
mod testing;

pub use api::AuthApi;
pub use classifier::{Classification, RequestClassifier};
pub use client_trait::NetworkClient;
pub use compose::{bearer, compose, inject_bearer};
pub use credentials::{CredentialStore, Credentials, MemoryCredentialStore};
pub use interceptor::FetchInterceptor;
pub use refresh::{RefreshCoordinator, RefreshFailure, TokenGrant};
