#![allow(dead_code)]

//! Mock transport for testing
//!
//! This module provides a scripted [`HttpTransport`] implementation plus a few
//! test helpers. All types are gated with `#[cfg(test)]`.

use crate::api::Payload;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{HttpResponse, HttpTransport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// One recorded POST, captured for assertions.
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub url: String,
    pub api_token: String,
    pub payload: Payload,
}

/// Scripted mock transport with configurable behavior.
///
/// POST responses are served from a queue in order; once the queue is empty
/// every further POST gets a `200 []`. `with_fail_count` prepends that many
/// 503 responses, mirroring a model that is still loading. GETs are served
/// from their own queue.
pub struct MockTransport {
    post_responses: Mutex<VecDeque<HttpResponse>>,
    get_responses: Mutex<VecDeque<HttpResponse>>,
    posts: Mutex<Vec<RecordedPost>>,
    gets: Mutex<Vec<String>>,
    post_count: AtomicU32,
    get_count: AtomicU32,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            post_responses: Mutex::new(VecDeque::new()),
            get_responses: Mutex::new(VecDeque::new()),
            posts: Mutex::new(Vec::new()),
            gets: Mutex::new(Vec::new()),
            post_count: AtomicU32::new(0),
            get_count: AtomicU32::new(0),
        }
    }

    /// Queue a POST response with an arbitrary status and JSON body.
    pub fn with_response(self, status: u16, body: serde_json::Value) -> Self {
        self.post_responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body.to_string().into_bytes()));
        self
    }

    /// Queue a `200` POST response.
    pub fn with_json_response(self, body: serde_json::Value) -> Self {
        self.with_response(200, body)
    }

    /// Queue a POST response with a raw, not necessarily JSON, body.
    pub fn with_raw_response(self, status: u16, body: Vec<u8>) -> Self {
        self.post_responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body));
        self
    }

    /// Prepend `count` unavailable (503) responses before whatever else is
    /// queued.
    pub fn with_fail_count(self, count: u32) -> Self {
        {
            let mut responses = self.post_responses.lock().unwrap();
            for _ in 0..count {
                responses.push_front(HttpResponse::new(
                    503,
                    br#"{"error": "Model is currently loading"}"#.to_vec(),
                ));
            }
        }
        self
    }

    /// Queue a GET response with an arbitrary status and raw body.
    pub fn with_get_response(self, status: u16, body: Vec<u8>) -> Self {
        self.get_responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body));
        self
    }

    /// Queue a `200` hub metadata GET declaring `pipeline_tag` for a model.
    pub fn with_hub_task(self, pipeline_tag: &str) -> Self {
        let body = serde_json::json!({ "pipeline_tag": pipeline_tag });
        self.with_get_response(200, body.to_string().into_bytes())
    }

    pub fn post_count(&self) -> u32 {
        self.post_count.load(Ordering::SeqCst)
    }

    pub fn get_count(&self) -> u32 {
        self.get_count.load(Ordering::SeqCst)
    }

    /// All recorded POSTs, oldest first.
    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }

    /// The most recent POST.
    pub fn last_post(&self) -> Option<RecordedPost> {
        self.posts.lock().unwrap().last().cloned()
    }

    /// All recorded GET URLs, oldest first.
    pub fn get_urls(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post(&self, url: &str, api_token: &str, payload: &Payload) -> Result<HttpResponse> {
        self.post_count.fetch_add(1, Ordering::SeqCst);
        self.posts.lock().unwrap().push(RecordedPost {
            url: url.to_string(),
            api_token: api_token.to_string(),
            payload: payload.clone(),
        });

        let scripted = self.post_responses.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| HttpResponse::new(200, b"[]".to_vec())))
    }

    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        self.gets.lock().unwrap().push(url.to_string());

        let scripted = self.get_responses.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| HttpResponse::new(200, b"{}".to_vec())))
    }
}

/// Config tuned for tests: local endpoints and no inter-attempt sleep.
pub fn fast_config() -> ClientConfig {
    ClientConfig {
        base_url: "http://mock.local/models".to_string(),
        hub_api_url: "http://mock.local/api/models".to_string(),
        retry_interval_ms: 0,
        ..ClientConfig::default()
    }
}
