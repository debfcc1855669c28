use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error::{Context, Result};

pub mod export;
pub mod request;
pub mod transactions;

#[cfg(test)]
pub(crate) mod test_server;

pub use export::{export_file_name, ExportKind, ExportReceipt};
pub use request::Endpoint;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client bound to the configured transaction service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("ledger-dash/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to construct HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base(), config.api.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        request::endpoint_url(&self.base_url, endpoint)
    }
}
