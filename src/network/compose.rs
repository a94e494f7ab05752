// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Outgoing header composition

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use super::classifier::Classification;
use crate::http::headers::APPLICATION_JSON;

/// Build the header set for one attempt
///
/// Always starts from `base` (the caller's headers) so every attempt is
/// derived from the original input, never from a previous attempt.
pub fn compose(
    base: &HeaderMap,
    classification: Classification,
    token: Option<&str>,
    has_body: bool,
) -> HeaderMap {
    let mut headers = base.clone();

    match classification {
        // No custom headers at all: no preflight, no credentials to a
        // third-party authorization server.
        Classification::OAuthEntry => return headers,
        Classification::BackendApi => match bearer(token) {
            Some(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            None => {
                headers.remove(AUTHORIZATION);
            }
        },
        Classification::RefreshCall | Classification::Other => {
            inject_bearer(&mut headers, token);
        }
    }

    if has_body && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    }

    headers
}

/// Add `Authorization: Bearer <token>` unless one is already present
pub fn inject_bearer(headers: &mut HeaderMap, token: Option<&str>) {
    if headers.contains_key(AUTHORIZATION) {
        return;
    }
    if let Some(value) = bearer(token) {
        headers.insert(AUTHORIZATION, value);
    }
}

/// Header value for a token; empty or unencodable tokens count as absent
pub fn bearer(token: Option<&str>) -> Option<HeaderValue> {
    let token = token.filter(|t| !t.is_empty())?;
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).ok()?;
    value.set_sensitive(true);
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller_headers() -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert("x-trace", HeaderValue::from_static("abc"));
        h.insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));
        h
    }

    fn auth(h: &HeaderMap) -> Option<&str> {
        h.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_oauth_entry_untouched() {
        let base = caller_headers();
        let out = compose(&base, Classification::OAuthEntry, Some("T1"), true);
        assert_eq!(out, base);
        assert!(out.get(CONTENT_TYPE).is_none());

        let empty = compose(&HeaderMap::new(), Classification::OAuthEntry, Some("T1"), true);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_backend_api_forces_token() {
        let out = compose(&caller_headers(), Classification::BackendApi, Some("T1"), false);
        assert_eq!(auth(&out), Some("Bearer T1"));
        assert_eq!(out.get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(out.get("x-trace").unwrap(), "abc");
    }

    #[test]
    fn test_backend_api_strips_without_token() {
        let out = compose(&caller_headers(), Classification::BackendApi, None, false);
        assert!(auth(&out).is_none());

        let out = compose(&caller_headers(), Classification::BackendApi, Some(""), false);
        assert!(auth(&out).is_none());
    }

    #[test]
    fn test_other_injects_only_if_absent() {
        let out = compose(&caller_headers(), Classification::Other, Some("T1"), false);
        assert_eq!(auth(&out), Some("Bearer stale"));

        let out = compose(&HeaderMap::new(), Classification::Other, Some("T1"), false);
        assert_eq!(auth(&out), Some("Bearer T1"));

        let out = compose(&caller_headers(), Classification::RefreshCall, None, false);
        assert_eq!(auth(&out), Some("Bearer stale"));
    }

    #[test]
    fn test_content_type_only_with_body() {
        let out = compose(&HeaderMap::new(), Classification::BackendApi, Some("T1"), false);
        assert!(out.get(CONTENT_TYPE).is_none());

        let out = compose(&HeaderMap::new(), Classification::BackendApi, Some("T1"), true);
        assert_eq!(out.get(CONTENT_TYPE).unwrap(), APPLICATION_JSON);

        let mut base = HeaderMap::new();
        base.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let out = compose(&base, Classification::BackendApi, Some("T1"), true);
        assert_eq!(out.get(CONTENT_TYPE).unwrap(), "text/plain");
    }

    #[test]
    fn test_base_is_not_mutated() {
        let base = caller_headers();
        let _ = compose(&base, Classification::BackendApi, None, true);
        assert_eq!(auth(&base), Some("Bearer stale"));
        assert!(base.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_bearer_value_is_sensitive() {
        let value = bearer(Some("T1")).unwrap();
        assert!(value.is_sensitive());
        assert!(bearer(Some("bad\ntoken")).is_none());
    }
}
