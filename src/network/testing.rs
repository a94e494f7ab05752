// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scripted in-process transport for unit tests

use std::collections::VecDeque;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;

use super::client_trait::NetworkClient;
use crate::error::{Error, Result};
use crate::http::{Request, Response};

/// Replays queued responses and records every request it receives
pub struct ScriptedClient {
    queue: Mutex<VecDeque<std::result::Result<Response, String>>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn json(self, status: StatusCode, body: Value) -> Self {
        self.push(Ok(response(status, body.to_string())))
    }

    pub fn text(self, status: StatusCode, body: &str) -> Self {
        self.push(Ok(response(status, body.to_string())))
    }

    pub fn status(self, status: StatusCode) -> Self {
        self.push(Ok(response(status, String::new())))
    }

    /// Queue a transport failure
    pub fn fail(self, msg: &str) -> Self {
        self.push(Err(msg.to_string()))
    }

    fn push(self, item: std::result::Result<Response, String>) -> Self {
        self.queue.lock().push_back(item);
        self
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }
}

pub fn response(status: StatusCode, body: impl Into<Bytes>) -> Response {
    Response::new(status, HeaderMap::new(), body.into(), "", 0)
}

#[async_trait]
impl NetworkClient for ScriptedClient {
    async fn send(&self, request: Request) -> Result<Response> {
        self.requests.lock().push(request.clone());
        let next = self.queue.lock().pop_front();
        match next {
            Some(Ok(resp)) => Ok(Response {
                url: request.url.clone(),
                ..resp
            }),
            Some(Err(msg)) => Err(Error::Other(msg)),
            None => Err(Error::other("script exhausted")),
        }
    }
}
