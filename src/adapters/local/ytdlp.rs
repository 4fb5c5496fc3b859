//! `yt-dlp` backed metadata probe and downloader.

use crate::ports::tools::{Downloader, MetadataFetcher};
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Output, Stdio};
use tokio::process::Command as TokioCommand;

#[derive(Clone, Debug)]
pub struct YtDlp {
    bin: String,
    format: String,
}

impl YtDlp {
    pub fn new(bin: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            format: format.into(),
        }
    }

    /// Arguments for a metadata-only run. The URL always follows `--`.
    pub fn probe_args(url: &str) -> Vec<OsString> {
        [
            "--skip-download",
            "--dump-json",
            "--no-playlist",
            "--no-warnings",
            "--",
            url,
        ]
        .into_iter()
        .map(OsString::from)
        .collect()
    }

    pub fn download_args(&self, url: &str, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-f", self.format.as_str(), "--no-playlist", "--no-part", "-o"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(dest.as_os_str().to_owned());
        args.push("--".into());
        args.push(url.into());
        args
    }

    async fn run(&self, args: Vec<OsString>) -> io::Result<Output> {
        TokioCommand::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
    }
}

#[async_trait]
impl MetadataFetcher for YtDlp {
    async fn fetch_metadata(&self, url: &str) -> io::Result<Output> {
        self.run(Self::probe_args(url)).await
    }
}

#[async_trait]
impl Downloader for YtDlp {
    async fn download(&self, url: &str, dest: &Path) -> io::Result<Output> {
        self.run(self.download_args(url, dest)).await
    }
}
