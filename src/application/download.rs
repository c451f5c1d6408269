use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::domain::{AppError, TerminalStatus};
use crate::utils::unix_timestamp;

/// Handle issued when a download is enqueued.
pub type DownloadId = u64;

/// A single transfer request. The policy flags mirror the platform download
/// settings; on desktop they are advisory and only logged.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: Url,
    pub file_name: String,
    pub requires_charging: bool,
    pub allowed_over_metered: bool,
    pub allowed_over_roaming: bool,
}

impl DownloadRequest {
    pub fn new(url: Url, file_name: String) -> Self {
        Self {
            url,
            file_name,
            requires_charging: false,
            allowed_over_metered: true,
            allowed_over_roaming: true,
        }
    }
}

/// The one completion signal observed per download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadEvent {
    Completed(DownloadId),
}

/// Download collaborator injected into the application. `enqueue` issues a
/// handle and the event stream that ends with the completion signal;
/// `status` queries the terminal record for a handle afterwards.
pub trait DownloadService {
    fn enqueue(&self, request: DownloadRequest) -> (DownloadId, BoxStream<'static, DownloadEvent>);

    fn status(&self, id: DownloadId) -> Option<TerminalStatus>;
}

/// Streams the requested URL into the download directory with reqwest and
/// records the terminal status per handle.
#[derive(Clone)]
pub struct HttpDownloadService {
    client: Client,
    download_dir: PathBuf,
    next_id: Arc<AtomicU64>,
    records: Arc<Mutex<HashMap<DownloadId, TerminalStatus>>>,
}

impl HttpDownloadService {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            client: Client::new(),
            download_dir,
            next_id: Arc::new(AtomicU64::new(1)),
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl DownloadService for HttpDownloadService {
    fn enqueue(&self, request: DownloadRequest) -> (DownloadId, BoxStream<'static, DownloadEvent>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            id,
            url = %request.url,
            requires_charging = request.requires_charging,
            allowed_over_metered = request.allowed_over_metered,
            allowed_over_roaming = request.allowed_over_roaming,
            "download enqueued"
        );

        let client = self.client.clone();
        let download_dir = self.download_dir.clone();
        let records = Arc::clone(&self.records);

        let events = futures::stream::once(async move {
            let status = match transfer(&client, &request, &download_dir).await {
                Ok(path) => {
                    tracing::info!(id, path = %path.display(), "download finished");
                    TerminalStatus::Successful
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "download failed");
                    TerminalStatus::Failed
                }
            };

            records
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .insert(id, status);

            DownloadEvent::Completed(id)
        })
        .boxed();

        (id, events)
    }

    fn status(&self, id: DownloadId) -> Option<TerminalStatus> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&id)
            .copied()
    }
}

async fn transfer(
    client: &Client,
    request: &DownloadRequest,
    download_dir: &Path,
) -> Result<PathBuf, AppError> {
    let response = client
        .get(request.url.clone())
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AppError::Http(e.to_string()))?;

    tokio::fs::create_dir_all(download_dir)
        .await
        .map_err(|e| AppError::Io(e.to_string()))?;

    let path = free_path(download_dir, &request.file_name);
    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(|e| AppError::Io(format!("failed to create file: {}", e)))?;

    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk: bytes::Bytes = chunk.map_err(|e| AppError::Http(e.to_string()))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Io(format!("write error: {}", e)))?;
    }

    file.sync_all()
        .await
        .map_err(|e| AppError::Io(format!("failed to sync file: {}", e)))?;

    Ok(path)
}

/// Never overwrite an earlier download with the same name.
fn free_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stamped = match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}-{}.{}", stem, unix_timestamp(), ext),
        None => format!("{}-{}", file_name, unix_timestamp()),
    };
    dir.join(stamped)
}
