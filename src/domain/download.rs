//! Fetching the whole source video to local disk.

use super::errors::DownloadError;
use super::tool_output::{status_text, stderr_tail};
use crate::ports::tools::Downloader;
use std::path::Path;
use std::time::Duration;

/// Download `url` to `dest`, failing unless the tool succeeds and the file exists.
pub async fn fetch_source<D: Downloader + ?Sized>(
    downloader: &D,
    url: &str,
    dest: &Path,
    timeout: Duration,
) -> Result<(), DownloadError> {
    let output = tokio::time::timeout(timeout, downloader.download(url, dest))
        .await
        .map_err(|_| DownloadError::Timeout(timeout))?
        .map_err(DownloadError::Spawn)?;

    if !output.status.success() {
        return Err(DownloadError::ToolFailed {
            status: status_text(&output),
            stderr: stderr_tail(&output),
        });
    }

    match tokio::fs::metadata(dest).await {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(DownloadError::MissingOutput(dest.to_path_buf())),
    }
}
