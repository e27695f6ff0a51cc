use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use crate::error::{DataSourceError, SymptoraError};

/// Host that serves the reference datasets by default.
pub const DEFAULT_DATA_HOST: &str = "raw.githubusercontent.com";

/// An HTTP client capped to approved data hosts.
/// Reference documents are only ever fetched through this client.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client whose every request is bounded by `timeout`.
    ///
    /// The default allowlist covers the public data host and loopback
    /// (local mirrors and test servers).
    pub fn new(timeout: Duration) -> Result<Self, SymptoraError> {
        let mut allowlist = HashSet::new();
        for d in [DEFAULT_DATA_HOST, "localhost", "127.0.0.1"] {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("symptora/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_lowercase());
    }

    /// Allows the host of `url`, if it parses.
    pub fn allow_url(&mut self, url: &str) {
        if let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
            self.allow_domain(&host);
        }
    }

    /// Validates if a URL is permitted under the current policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or a subdomain of an allowed host
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// GET request builder for an allowed URL.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, DataSourceError> {
        if !self.is_allowed(url) {
            return Err(DataSourceError::Blocked { url: url.to_string() });
        }

        Ok(self.client.get(url))
    }
}
