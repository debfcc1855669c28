use log::warn;
use reqwest::Response;

use crate::error::{AppError, Result};

/// Routes exposed by the transaction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Transactions { page: u32, limit: u32 },
    ExportBuffered,
    ExportStreamed,
}

impl Endpoint {
    pub fn path_and_query(&self) -> String {
        match self {
            Endpoint::Transactions { page, limit } => {
                format!("/transactions?page={page}&limit={limit}")
            }
            Endpoint::ExportBuffered => "/export-csv-no-stream".to_string(),
            Endpoint::ExportStreamed => "/export-csv".to_string(),
        }
    }
}

pub fn endpoint_url(base_url: &str, endpoint: &Endpoint) -> String {
    format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        endpoint.path_and_query()
    )
}

/// Turn a non-2xx response into `AppError::Status`.
pub fn ensure_success(url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!("GET {} returned {}", url, status);
        Err(AppError::Status {
            url: url.to_string(),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_paged_url() {
        let url = endpoint_url(
            "http://localhost:5000/",
            &Endpoint::Transactions { page: 2, limit: 25 },
        );
        assert_eq!(url, "http://localhost:5000/transactions?page=2&limit=25");
    }

    #[test]
    fn builds_export_urls() {
        let base = "https://api.example.com/v1";
        assert_eq!(
            endpoint_url(base, &Endpoint::ExportBuffered),
            "https://api.example.com/v1/export-csv-no-stream"
        );
        assert_eq!(
            endpoint_url(base, &Endpoint::ExportStreamed),
            "https://api.example.com/v1/export-csv"
        );
    }
}
