use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Output;

/// Reads structured metadata for a remote media URL without downloading it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Run the metadata tool once. Stdout is expected to hold one JSON document.
    async fn fetch_metadata(&self, url: &str) -> io::Result<Output>;
}

/// Materializes a remote media URL as a local file.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str, dest: &Path) -> io::Result<Output>;
}

/// Cuts `[start, end)` seconds out of a local file by stream copy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscodeExecutor: Send + Sync {
    async fn cut(&self, source: &Path, start: f64, end: f64, dest: &Path) -> io::Result<Output>;
}
