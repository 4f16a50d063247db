// src/fetcher.rs

use crate::models::{LogEntry, NewLogEntry, Page};
use crate::pagination::ViewWindow;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Why a single request attempt failed. Always retried.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected status code {0}")]
    Status(StatusCode),

    #[error("failed to read body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("failed to decode logs: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("service replied {status}: {reply}")]
    Rejected { status: StatusCode, reply: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("exhausted retries after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn from_tls(tls: bool) -> Self {
        if tls {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Reads pages of logs from a running service, retrying failed attempts
/// immediately up to a fixed count.
#[derive(Debug, Clone)]
pub struct LogFetcher {
    client: Client,
    url: String,
    retries: u32,
}

impl LogFetcher {
    pub fn new(client: Client, scheme: Scheme, host: &str, port: u16, retries: u32) -> Self {
        Self::with_base_url(client, format!("{}://{}:{}", scheme.as_str(), host, port), retries)
    }

    /// `base` is everything before `/logs`, e.g. `http://127.0.0.1:12345`.
    pub fn with_base_url(client: Client, base: impl Into<String>, retries: u32) -> Self {
        let base = base.into();
        Self {
            client,
            url: format!("{}/logs", base.trim_end_matches('/')),
            retries: retries.max(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub async fn fetch(&self, window: ViewWindow) -> Result<Page, FetchError> {
        for attempt in 1..=self.retries {
            match self.attempt(window).await {
                Ok(records) => {
                    debug!(
                        "fetched {} logs at offset {} (attempt {})",
                        records.len(),
                        window.offset,
                        attempt
                    );
                    return Ok(Page::new(window, records));
                }
                Err(e) => warn!(
                    "error fetching logs (attempt {}/{}): {}",
                    attempt, self.retries, e
                ),
            }
        }
        Err(FetchError::ExhaustedRetries {
            attempts: self.retries,
        })
    }

    async fn attempt(&self, window: ViewWindow) -> Result<Vec<LogEntry>, AttemptError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("offset", window.offset), ("limit", window.limit.get())])
            .send()
            .await
            .map_err(AttemptError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AttemptError::Status(status));
        }

        let body = response.bytes().await.map_err(AttemptError::Body)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Submits one entry and returns the service's JSON reply.
    pub async fn submit(&self, entry: &NewLogEntry) -> Result<serde_json::Value, AttemptError> {
        let response = self
            .client
            .post(&self.url)
            .json(entry)
            .send()
            .await
            .map_err(AttemptError::Transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(AttemptError::Body)?;
        if status != StatusCode::OK {
            let reply = String::from_utf8_lossy(&body).into_owned();
            warn!("log submission rejected with {}: {}", status, reply);
            return Err(AttemptError::Rejected { status, reply });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Builds the HTTP client shared by every fetch.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}
