use log::debug;

use crate::error::Result;
use crate::records::PageResult;

use super::request::{ensure_success, Endpoint};
use super::ApiClient;

impl ApiClient {
    /// Fetch one page of transactions.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<PageResult> {
        let url = self.url_for(&Endpoint::Transactions { page, limit });
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = ensure_success(&url, response)?;
        let result: PageResult = response.json().await?;

        debug!(
            "Loaded page {}/{} with {} rows ({} total)",
            result.page,
            result.total_pages,
            result.transactions.len(),
            result.total
        );
        Ok(result)
    }
}
