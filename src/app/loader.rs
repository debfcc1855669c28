use log::{debug, warn};

use crate::records::{PageResult, Transaction};

/// Authoritative page data plus loading/error flags.
#[derive(Debug, Default)]
pub struct PageLoader {
    page: Option<PageResult>,
    loading: bool,
    error: Option<String>,
    latest_request: u64,
}

impl PageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a new load in flight and return its request id.
    pub fn begin(&mut self) -> u64 {
        self.latest_request += 1;
        self.loading = true;
        self.latest_request
    }

    /// Apply a completion. Returns false when a newer request has superseded this one.
    pub fn complete(&mut self, request: u64, outcome: Result<PageResult, String>) -> bool {
        if request != self.latest_request {
            debug!(
                "Dropping stale page response {} (latest is {})",
                request, self.latest_request
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(page) => {
                self.page = Some(page);
                self.error = None;
            }
            Err(message) => {
                warn!("Page load failed: {}", message);
                self.page = None;
                self.error = Some(message);
            }
        }
        true
    }

    pub fn page(&self) -> Option<&PageResult> {
        self.page.as_ref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.page
            .as_ref()
            .map(|page| page.transactions.as_slice())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
