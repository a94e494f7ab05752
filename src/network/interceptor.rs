// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fetch interceptor: bearer injection plus one refresh-and-retry on 401

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use url::Url;

use super::classifier::{Classification, RequestClassifier};
use super::client_trait::NetworkClient;
use super::compose::compose;
use super::credentials::{CredentialStore, Credentials};
use super::refresh::RefreshCoordinator;
use crate::config::AuthConfig;
use crate::error::Result;
use crate::http::{Request, Response};

/// Wraps a network primitive with the auth protocol
///
/// Per call: classify, compose headers, send; for backend API calls that come
/// back 401, refresh once and resend once with headers rebuilt from the
/// caller's original request. The second response is returned whatever its
/// status. Concurrent 401s each run their own refresh; there is no shared
/// in-flight refresh.
pub struct FetchInterceptor {
    /// Un-intercepted primitive
    client: Arc<dyn NetworkClient>,
    classifier: RequestClassifier,
    credentials: Credentials,
    refresher: RefreshCoordinator,
    /// Hosts eligible for token injection on non-API URLs (empty = any)
    token_hosts: Vec<String>,
    me_url: String,
}

impl FetchInterceptor {
    /// Wrap `client`; a `None` store reads as empty and ignores writes
    pub fn new(
        client: Arc<dyn NetworkClient>,
        config: AuthConfig,
        store: Option<Arc<dyn CredentialStore>>,
    ) -> Self {
        let credentials = Credentials::new(store);
        let refresher =
            RefreshCoordinator::new(client.clone(), credentials.clone(), config.refresh_url());

        Self {
            classifier: RequestClassifier::from_config(&config),
            client,
            credentials,
            refresher,
            me_url: config.me_url(),
            token_hosts: config.token_hosts,
        }
    }

    /// Get the classifier
    pub fn classifier(&self) -> &RequestClassifier {
        &self.classifier
    }

    /// Get the refresh coordinator
    pub fn refresher(&self) -> &RefreshCoordinator {
        &self.refresher
    }

    /// Get the credential handle
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Identity endpoint URL
    pub fn me_url(&self) -> &str {
        &self.me_url
    }

    /// The wrapped primitive, bypassing interception
    pub fn raw_client(&self) -> &Arc<dyn NetworkClient> {
        &self.client
    }

    /// Send a request through the interceptor
    ///
    /// Transport errors from the primitive propagate unchanged; HTTP error
    /// statuses are returned as responses.
    pub async fn fetch(&self, request: Request) -> Result<Response> {
        let classification = self.classifier.classify(&request.url);
        debug!(
            method = %request.method,
            url = %request.url,
            %classification,
            "Intercepted request"
        );

        if classification == Classification::OAuthEntry {
            return self.client.send(request).await;
        }

        let first = self
            .client
            .send(self.prepare(&request, classification))
            .await?;

        if !(classification.retries_on_unauthorized() && first.is_unauthorized()) {
            return Ok(first);
        }

        debug!(url = %request.url, "Unauthorized, attempting token refresh");
        if !self.refresher.attempt_refresh().await {
            return Ok(first);
        }

        let retried = self
            .client
            .send(self.prepare(&request, classification))
            .await?;
        debug!(url = %request.url, status = %retried.status, "Retried after refresh");
        Ok(retried)
    }

    /// Execute a GET request
    pub async fn get(&self, url: impl Into<String>) -> Result<Response> {
        self.fetch(Request::get(url)).await
    }

    /// Execute a POST request
    pub async fn post(&self, url: impl Into<String>, body: impl Into<Bytes>) -> Result<Response> {
        self.fetch(Request::post(url).body(body)).await
    }

    /// Execute multiple requests concurrently
    pub async fn fetch_all(&self, requests: Vec<Request>) -> Vec<Result<Response>> {
        let futures: Vec<_> = requests.into_iter().map(|r| self.fetch(r)).collect();
        futures::future::join_all(futures).await
    }

    /// One attempt's request, composed from the caller's original headers
    fn prepare(&self, request: &Request, classification: Classification) -> Request {
        let token = self.token_for(&request.url, classification);
        let headers = compose(
            &request.headers,
            classification,
            token.as_deref(),
            request.has_body(),
        );
        request.with_headers(headers)
    }

    fn token_for(&self, url: &str, classification: Classification) -> Option<String> {
        if classification == Classification::Other && !self.host_allowed(url) {
            return None;
        }
        self.credentials.token()
    }

    fn host_allowed(&self, url: &str) -> bool {
        if self.token_hosts.is_empty() {
            return true;
        }
        let parsed = if url.starts_with("//") {
            // scheme-relative: names a host of its own
            Url::parse(&format!("https:{}", url))
        } else {
            match Url::parse(url) {
                // relative URLs are same-origin
                Err(url::ParseError::RelativeUrlWithoutBase) => return true,
                other => other,
            }
        };
        let Ok(parsed) = parsed else {
            return false;
        };
        parsed
            .host_str()
            .map(|host| {
                self.token_hosts
                    .iter()
                    .any(|d| host == d || host.ends_with(&format!(".{}", d)))
            })
            .unwrap_or(false)
    }
}

#[async_trait]
impl NetworkClient for FetchInterceptor {
    async fn send(&self, request: Request) -> Result<Response> {
        self.fetch(request).await
    }
}
