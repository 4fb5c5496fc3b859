//! Environment configuration.

use crate::application::orchestrator::PipelineSettings;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("CLIP_SEGMENT_SECONDS must be a positive number, got {0}")]
    SegmentLength(f64),

    #[error("CLIP_EXTRACT_CONCURRENCY must be at least 1")]
    Concurrency,

    #[error("{0} must be at least one second")]
    Timeout(&'static str),
}

#[derive(Clone, Debug)]
pub struct ClipConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Root for transient whole-video downloads
    pub download_dir: PathBuf,
    /// Persistent clips, served under /clips
    pub clip_dir: PathBuf,
    /// Clip length in seconds
    pub segment_length: f64,
    pub extract_concurrency: usize,
    pub probe_timeout: Duration,
    pub download_timeout: Duration,
    pub extract_timeout: Duration,
    pub yt_dlp_bin: String,
    /// yt-dlp format selector
    pub download_format: String,
    pub ffmpeg_bin: String,
    /// Public address clip URLs are built from, instead of the Host header
    pub public_base_url: Option<String>,
}

impl Default for ClipConfig {
    fn default() -> Self {
        let download_dir = PathBuf::from("./downloads");
        Self {
            addr: String::from("127.0.0.1"),
            port: String::from("4000"),
            clip_dir: download_dir.join("clips"),
            download_dir,
            segment_length: 30.0,
            extract_concurrency: 1,
            probe_timeout: Duration::from_secs(60),
            download_timeout: Duration::from_secs(1800),
            extract_timeout: Duration::from_secs(300),
            yt_dlp_bin: String::from("yt-dlp"),
            download_format: String::from("best"),
            ffmpeg_bin: String::from("ffmpeg"),
            public_base_url: None,
        }
    }
}

impl ClipConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let download_dir = lookup("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.download_dir);

        Self {
            addr: lookup("ADDR").unwrap_or(defaults.addr),
            port: lookup("PORT").unwrap_or(defaults.port),
            clip_dir: download_dir.join("clips"),
            download_dir,
            segment_length: parsed(&lookup, "CLIP_SEGMENT_SECONDS", defaults.segment_length),
            extract_concurrency: parsed(
                &lookup,
                "CLIP_EXTRACT_CONCURRENCY",
                defaults.extract_concurrency,
            ),
            probe_timeout: seconds(&lookup, "PROBE_TIMEOUT_SECS", defaults.probe_timeout),
            download_timeout: seconds(&lookup, "DOWNLOAD_TIMEOUT_SECS", defaults.download_timeout),
            extract_timeout: seconds(&lookup, "EXTRACT_TIMEOUT_SECS", defaults.extract_timeout),
            yt_dlp_bin: lookup("YT_DLP_BIN").unwrap_or(defaults.yt_dlp_bin),
            download_format: lookup("YT_DLP_FORMAT").unwrap_or(defaults.download_format),
            ffmpeg_bin: lookup("FFMPEG_BIN").unwrap_or(defaults.ffmpeg_bin),
            public_base_url: lookup("PUBLIC_BASE_URL").filter(|v| !v.trim().is_empty()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.segment_length.is_finite() || self.segment_length <= 0.0 {
            return Err(ConfigError::SegmentLength(self.segment_length));
        }
        if self.extract_concurrency == 0 {
            return Err(ConfigError::Concurrency);
        }
        for (name, timeout) in [
            ("PROBE_TIMEOUT_SECS", self.probe_timeout),
            ("DOWNLOAD_TIMEOUT_SECS", self.download_timeout),
            ("EXTRACT_TIMEOUT_SECS", self.extract_timeout),
        ] {
            if timeout.is_zero() {
                return Err(ConfigError::Timeout(name));
            }
        }
        Ok(())
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            download_dir: self.download_dir.clone(),
            clip_dir: self.clip_dir.clone(),
            segment_length: self.segment_length,
            extract_concurrency: self.extract_concurrency,
            download_timeout: self.download_timeout,
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparseable setting");
            default
        }),
    }
}

fn seconds<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    Duration::from_secs(parsed(lookup, key, default.as_secs()))
}
