// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Explicit auth operations
//!
//! For call sites that want direct control instead of relying on automatic
//! interception. Unlike the interceptor, these surface failures as errors.

use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::{debug, info};

use super::compose::inject_bearer;
use super::interceptor::FetchInterceptor;
use super::refresh::TokenGrant;
use crate::error::{Endpoint, Error, Result};
use crate::http::Request;

/// `get_current_user` / `force_refresh` on top of an interceptor
pub struct AuthApi<'a> {
    interceptor: &'a FetchInterceptor,
}

impl<'a> AuthApi<'a> {
    /// Bind to an interceptor
    pub fn new(interceptor: &'a FetchInterceptor) -> Self {
        Self { interceptor }
    }

    /// GET the identity endpoint and return its JSON body
    ///
    /// Fails with `Error::Status { endpoint: Endpoint::Me, .. }` on non-2xx.
    pub async fn get_current_user(&self) -> Result<Value> {
        let mut headers = HeaderMap::new();
        inject_bearer(&mut headers, self.interceptor.credentials().token().as_deref());

        let mut request = Request::get(self.interceptor.me_url());
        request.headers = headers;

        let response = self.interceptor.raw_client().send(request).await?;
        if !response.is_success() {
            return Err(Error::status(Endpoint::Me, response.status_code()));
        }
        response.json()
    }

    /// Run the refresh exchange directly and return the full payload
    ///
    /// Fails with `Error::NoAccessToken` when there is nothing to exchange
    /// and `Error::Status { endpoint: Endpoint::Refresh, .. }` on non-2xx.
    /// Tokens are written back only when the payload has an `access_token`.
    pub async fn force_refresh(&self) -> Result<Value> {
        let refresher = self.interceptor.refresher();
        let old_token = refresher
            .credentials()
            .token()
            .ok_or(Error::NoAccessToken)?;

        let response = refresher.exchange(&old_token).await?;
        if !response.is_success() {
            return Err(Error::status(Endpoint::Refresh, response.status_code()));
        }

        let body: Value = response.json()?;
        match TokenGrant::from_body(body.clone()) {
            Some(grant) => {
                refresher.store_grant(&grant);
                info!("Access token refreshed on demand");
            }
            None => debug!("Refresh payload carried no access_token, store left as is"),
        }
        Ok(body)
    }
}

impl FetchInterceptor {
    /// Explicit auth operations bound to this interceptor
    pub fn auth_api(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::network::credentials::{CredentialStore, MemoryCredentialStore};
    use crate::network::testing::ScriptedClient;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    fn setup(
        token: Option<&str>,
        script: ScriptedClient,
    ) -> (FetchInterceptor, Arc<MemoryCredentialStore>, Arc<ScriptedClient>) {
        let config = AuthConfig::default();
        let store = Arc::new(match token {
            Some(t) => MemoryCredentialStore::with_token(&config, t),
            None => MemoryCredentialStore::new(&config),
        });
        let client = Arc::new(script);
        let interceptor = FetchInterceptor::new(client.clone(), config, Some(store.clone()));
        (interceptor, store, client)
    }

    #[tokio::test]
    async fn test_get_current_user() {
        let script = ScriptedClient::new().json(StatusCode::OK, json!({"id": 7, "name": "ada"}));
        let (interceptor, _, client) = setup(Some("T1"), script);

        let user = tokio_test::assert_ok!(interceptor.auth_api().get_current_user().await);
        assert_eq!(user["name"], "ada");

        let sent = client.requests();
        assert_eq!(sent[0].method, reqwest::Method::GET);
        assert_eq!(sent[0].url, "/api/auth/me");
        assert_eq!(sent[0].header_str("authorization"), Some("Bearer T1"));
    }

    #[tokio::test]
    async fn test_get_current_user_status_error() {
        let script = ScriptedClient::new().status(StatusCode::UNAUTHORIZED);
        let (interceptor, _, client) = setup(Some("T1"), script);

        let err = interceptor
            .auth_api()
            .get_current_user()
            .await
            .unwrap_err();
        assert_eq!(err.reason_code().as_deref(), Some("ME_401"));
        // explicit call: no automatic refresh
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_force_refresh_returns_payload() {
        let payload = json!({"access_token": "T2", "refresh_token": "R2", "expires_in": 900});
        let script = ScriptedClient::new().json(StatusCode::OK, payload.clone());
        let (interceptor, store, client) = setup(Some("T1"), script);

        let body = interceptor.auth_api().force_refresh().await.unwrap();
        assert_eq!(body, payload);
        assert_eq!(store.token().as_deref(), Some("T2"));
        assert_eq!(store.refresh_token().as_deref(), Some("R2"));
        assert_eq!(
            client.requests()[0].header_str("authorization"),
            Some("Bearer T1")
        );
    }

    #[tokio::test]
    async fn test_force_refresh_payload_without_access_token() {
        let payload = json!({"refresh_token": "R2", "detail": "pending"});
        let script = ScriptedClient::new().json(StatusCode::OK, payload.clone());
        let (interceptor, store, _) = setup(Some("T1"), script);

        let body = interceptor.auth_api().force_refresh().await.unwrap();
        assert_eq!(body, payload);
        assert_eq!(store.token().as_deref(), Some("T1"));
        assert!(store.refresh_token().is_none());
    }

    #[tokio::test]
    async fn test_force_refresh_unusable_access_token_writes_nothing() {
        for payload in [
            json!({"access_token": null, "refresh_token": "R2"}),
            json!({"access_token": "", "refresh_token": "R2"}),
        ] {
            let script = ScriptedClient::new().json(StatusCode::OK, payload.clone());
            let (interceptor, store, _) = setup(Some("T1"), script);
            store.set_refresh_token("R1");

            let body = interceptor.auth_api().force_refresh().await.unwrap();
            assert_eq!(body, payload);
            assert_eq!(store.token().as_deref(), Some("T1"));
            assert_eq!(store.refresh_token().as_deref(), Some("R1"));
        }
    }

    #[tokio::test]
    async fn test_force_refresh_without_token() {
        let (interceptor, _, client) = setup(None, ScriptedClient::new());

        let err = interceptor.auth_api().force_refresh().await.unwrap_err();
        assert!(matches!(err, Error::NoAccessToken));
        assert_eq!(err.reason_code().as_deref(), Some("NO_OLD_ACCESS"));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_force_refresh_bad_status() {
        let script = ScriptedClient::new().status(StatusCode::INTERNAL_SERVER_ERROR);
        let (interceptor, store, _) = setup(Some("T1"), script);

        let err = interceptor.auth_api().force_refresh().await.unwrap_err();
        assert_eq!(err.reason_code().as_deref(), Some("REFRESH_500"));
        assert_eq!(store.token().as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn test_force_refresh_transport_error() {
        let script = ScriptedClient::new().fail("dns failure");
        let (interceptor, _, _) = setup(Some("T1"), script);

        let err = interceptor.auth_api().force_refresh().await.unwrap_err();
        assert!(matches!(err, Error::Other(_)));
    }
}
