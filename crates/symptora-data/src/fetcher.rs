//! Document retrieval.
//!
//! Abstracts over where reference documents come from so the cache can be
//! exercised without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use symptora_common::sandbox::SandboxClient;
use symptora_common::{DataSourceError, SymptoraError};
use symptora_config::DataConfig;
use tracing::{debug, instrument};

/// Retrieves one reference document by source id (its URL).
///
/// Implementations can use:
/// - the remote static host (HTTP)
/// - in-memory documents (testing)
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch and parse a document. Only JSON objects count as documents.
    async fn fetch(&self, source_id: &str) -> Result<Value, DataSourceError>;
}

// ── HTTP implementation ─────────────────────────────────────────────────────

/// Fetches documents over HTTP through the allowlisted client.
pub struct HttpFetcher {
    client: SandboxClient,
}

impl HttpFetcher {
    pub fn new(client: SandboxClient) -> Self {
        Self { client }
    }

    /// Client bounded by `data.fetch_timeout_secs`, allowing the hosts of
    /// every configured source plus `data.extra_hosts`.
    pub fn from_config(config: &DataConfig) -> Result<Self, SymptoraError> {
        let mut client = SandboxClient::new(config.fetch_timeout())?;
        for url in config.source_urls() {
            client.allow_url(url);
        }
        for host in &config.extra_hosts {
            client.allow_domain(host);
        }
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, source_id: &str) -> Result<Value, DataSourceError> {
        let network = |source| DataSourceError::Network {
            url: source_id.to_string(),
            source,
        };

        let resp = self.client.get(source_id)?.send().await.map_err(network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataSourceError::Status {
                url: source_id.to_string(),
                status: status.as_u16(),
            });
        }

        // Static hosts often label JSON as text/plain, so parse the raw body.
        let body = resp.bytes().await.map_err(network)?;
        let doc: Value = serde_json::from_slice(&body).map_err(|e| DataSourceError::Malformed {
            url: source_id.to_string(),
            reason: e.to_string(),
        })?;

        if !doc.is_object() {
            return Err(DataSourceError::Malformed {
                url: source_id.to_string(),
                reason: "expected a JSON object".to_string(),
            });
        }

        debug!(bytes = body.len(), "Fetched reference document");
        Ok(doc)
    }
}

// ── Mock implementation for testing ─────────────────────────────────────────

/// In-memory fetcher. Unknown ids fail with HTTP 404; every call is counted.
#[derive(Default)]
pub struct MockFetcher {
    documents: Mutex<HashMap<String, Value>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `doc` for `source_id`.
    pub fn with(self, source_id: &str, doc: Value) -> Self {
        self.set(source_id, doc);
        self
    }

    /// Serve (or replace) a document after construction.
    pub fn set(&self, source_id: &str, doc: Value) {
        if let Ok(mut docs) = self.documents.lock() {
            docs.insert(source_id.to_string(), doc);
        }
    }

    /// Stop serving a document; later fetches fail.
    pub fn remove(&self, source_id: &str) {
        if let Ok(mut docs) = self.documents.lock() {
            docs.remove(source_id);
        }
    }

    /// Number of fetches seen for `source_id`.
    pub fn calls(&self, source_id: &str) -> usize {
        self.calls
            .lock()
            .map(|c| c.get(source_id).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentFetcher for MockFetcher {
    async fn fetch(&self, source_id: &str) -> Result<Value, DataSourceError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(source_id.to_string()).or_default() += 1;
        }

        let doc = self
            .documents
            .lock()
            .ok()
            .and_then(|docs| docs.get(source_id).cloned());

        match doc {
            Some(doc) if doc.is_object() => Ok(doc),
            Some(_) => Err(DataSourceError::Malformed {
                url: source_id.to_string(),
                reason: "expected a JSON object".to_string(),
            }),
            None => Err(DataSourceError::Status {
                url: source_id.to_string(),
                status: 404,
            }),
        }
    }
}
