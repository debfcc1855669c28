use std::path::{Path, PathBuf};

use futures::StreamExt;
use log::{debug, info, warn};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::error::{Context, Result};
use crate::utils::{ensure_dir, export_date_stamp};

use super::request::{ensure_success, Endpoint};
use super::ApiClient;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ExportKind {
    /// Whole CSV body read into memory, then written out.
    Buffered,
    /// CSV body copied to disk chunk by chunk.
    Streamed,
}

impl ExportKind {
    pub const ALL: [ExportKind; 2] = [ExportKind::Buffered, ExportKind::Streamed];

    pub fn label(self) -> &'static str {
        match self {
            ExportKind::Buffered => "CSV export",
            ExportKind::Streamed => "Streamed CSV export",
        }
    }

    pub fn endpoint(self) -> Endpoint {
        match self {
            ExportKind::Buffered => Endpoint::ExportBuffered,
            ExportKind::Streamed => Endpoint::ExportStreamed,
        }
    }

    fn file_prefix(self) -> &'static str {
        match self {
            ExportKind::Buffered => "users_transaction_no_stream",
            ExportKind::Streamed => "users_transaction_stream",
        }
    }
}

pub fn export_file_name(kind: ExportKind, date_stamp: &str) -> String {
    format!("{}_{}.csv", kind.file_prefix(), date_stamp)
}

/// Where an export landed and how much it contained.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReceipt {
    pub kind: ExportKind,
    pub path: PathBuf,
    pub bytes: u64,
    pub rows: Option<usize>,
}

impl ExportReceipt {
    pub fn summary(&self) -> String {
        let name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        match self.rows {
            Some(rows) => format!("Saved {rows} rows to {name}"),
            None => format!(
                "Saved {} to {name}",
                crate::utils::format_size(self.bytes)
            ),
        }
    }
}

impl ApiClient {
    pub async fn export(&self, kind: ExportKind, download_dir: &Path) -> Result<ExportReceipt> {
        match kind {
            ExportKind::Buffered => self.export_buffered(download_dir).await,
            ExportKind::Streamed => self.export_streamed(download_dir).await,
        }
    }

    /// Download the full CSV payload, then write it to the download directory.
    pub async fn export_buffered(&self, download_dir: &Path) -> Result<ExportReceipt> {
        let url = self.url_for(&ExportKind::Buffered.endpoint());
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = ensure_success(&url, response)?;
        let body = response.text().await?;
        let rows = count_csv_rows(&body)?;

        ensure_dir(download_dir)?;
        let path = download_dir.join(export_file_name(ExportKind::Buffered, &export_date_stamp()));
        fs::write(&path, body.as_bytes())
            .await
            .with_context(|| format!("Failed to write export to {}", path.display()))?;

        info!("Buffered export saved {} rows to {}", rows, path.display());
        Ok(ExportReceipt {
            kind: ExportKind::Buffered,
            path,
            bytes: body.len() as u64,
            rows: Some(rows),
        })
    }

    /// Copy the streaming endpoint straight into a file without holding the body.
    pub async fn export_streamed(&self, download_dir: &Path) -> Result<ExportReceipt> {
        let url = self.url_for(&ExportKind::Streamed.endpoint());
        debug!("GET {} (streaming)", url);

        let response = self.client.get(&url).send().await?;
        let response = ensure_success(&url, response)?;

        ensure_dir(download_dir)?;
        let path = download_dir.join(export_file_name(ExportKind::Streamed, &export_date_stamp()));
        let partial = path.with_extension("csv.part");

        match copy_body(response, &partial).await {
            Ok(bytes) => {
                fs::rename(&partial, &path).await.with_context(|| {
                    format!("Failed to move {} into place", partial.display())
                })?;
                info!("Streamed export saved {} bytes to {}", bytes, path.display());
                Ok(ExportReceipt {
                    kind: ExportKind::Streamed,
                    path,
                    bytes,
                    rows: None,
                })
            }
            Err(err) => {
                if let Err(cleanup) = fs::remove_file(&partial).await {
                    warn!(
                        "Could not remove partial export {}: {}",
                        partial.display(),
                        cleanup
                    );
                }
                Err(err)
            }
        }
    }
}

async fn copy_body(response: reqwest::Response, target: &Path) -> Result<u64> {
    let mut file = File::create(target)
        .await
        .with_context(|| format!("Failed to create {}", target.display()))?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}

/// Number of data rows (header excluded) in a CSV payload.
pub fn count_csv_rows(body: &str) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = 0;
    for record in reader.records() {
        record?;
        rows += 1;
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::fetch::test_server::{serve, CannedResponse};

    const CSV_BODY: &str = "_id,name,amount,address\nt1,Alice,10.5,\"1 Main St, Springfield\"\nt2,Bob,7,2 Side Rd\n";

    #[test]
    fn names_files_with_date_stamp() {
        assert_eq!(
            export_file_name(ExportKind::Buffered, "2024-05-01"),
            "users_transaction_no_stream_2024-05-01.csv"
        );
        assert_eq!(
            export_file_name(ExportKind::Streamed, "2024-05-01"),
            "users_transaction_stream_2024-05-01.csv"
        );
    }

    #[test]
    fn counts_rows_with_quoted_fields() {
        assert_eq!(count_csv_rows(CSV_BODY).expect("valid csv"), 2);
        assert_eq!(count_csv_rows("").expect("empty csv"), 0);
    }

    #[tokio::test]
    async fn buffered_export_writes_file() {
        let tmp = TempDir::new().expect("temp dir");
        let dir = tmp.path().join("downloads");
        let (base, requests) = serve(vec![CannedResponse::csv(CSV_BODY)]).await;
        let client = ApiClient::new(base, Duration::from_secs(5)).expect("client");

        let receipt = client.export_buffered(&dir).await.expect("export succeeds");

        assert_eq!(receipt.rows, Some(2));
        assert_eq!(std::fs::read_to_string(&receipt.path).expect("read"), CSV_BODY);
        assert!(receipt
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("users_transaction_no_stream_")));
        assert_eq!(
            requests.await.expect("server"),
            vec!["GET /export-csv-no-stream".to_string()]
        );
    }

    #[tokio::test]
    async fn streamed_export_writes_file() {
        let tmp = TempDir::new().expect("temp dir");
        let dir = tmp.path().join("downloads");
        let (base, requests) = serve(vec![CannedResponse::csv(CSV_BODY)]).await;
        let client = ApiClient::new(base, Duration::from_secs(5)).expect("client");

        let receipt = client.export_streamed(&dir).await.expect("export succeeds");

        assert_eq!(receipt.bytes, CSV_BODY.len() as u64);
        assert_eq!(std::fs::read_to_string(&receipt.path).expect("read"), CSV_BODY);
        assert_eq!(
            requests.await.expect("server"),
            vec!["GET /export-csv".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_export_leaves_no_file() {
        let tmp = TempDir::new().expect("temp dir");
        let dir = tmp.path().join("downloads");
        let (base, _requests) =
            serve(vec![CannedResponse::text(503, "Service Unavailable", "down")]).await;
        let client = ApiClient::new(base, Duration::from_secs(5)).expect("client");

        assert!(client.export_streamed(&dir).await.is_err());
        assert!(crate::utils::list_csv_files(&dir).is_empty());
    }
}
