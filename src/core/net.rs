// src/core/net.rs
//
// HTTP GET behind a small trait so the fetch loop can be driven by canned
// responses in tests. The real transport is a blocking reqwest client.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};

/// Status + body of one GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a status line (DNS, TLS, timeout, reset).
#[derive(Debug, Error)]
#[error("GET {url}: {message}")]
pub struct TransportError {
    pub url: String,
    pub message: String,
}

pub trait Transport {
    fn get(&mut self, url: &str) -> Result<Response, TransportError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&mut self, url: &str) -> Result<Response, TransportError> {
        let fail = |e: reqwest::Error| TransportError { url: s!(url), message: e.to_string() };

        let resp = self.client.get(url).send().map_err(fail)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(fail)?;
        logd!("GET {url} → {status} ({} bytes)", body.len());
        Ok(Response { status, body })
    }
}

/// Where the fetcher waits. Tests record instead of sleeping.
pub trait Sleep {
    fn sleep(&mut self, d: Duration);
}

pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d);
    }
}
