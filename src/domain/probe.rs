//! Source duration lookup.

use super::errors::ProbeError;
use super::tool_output::{status_text, stderr_tail};
use crate::ports::tools::MetadataFetcher;
use serde::Deserialize;
use std::time::Duration;

/// The part of the metadata document the pipeline cares about.
#[derive(Debug, Deserialize)]
struct Metadata {
    duration: Option<f64>,
}

pub struct MediaProbe<M> {
    fetcher: M,
    timeout: Duration,
}

impl<M: MetadataFetcher> MediaProbe<M> {
    pub fn new(fetcher: M, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    /// Duration of the media at `url`, in seconds. Never writes to disk.
    pub async fn probe(&self, url: &str) -> Result<f64, ProbeError> {
        let output = tokio::time::timeout(self.timeout, self.fetcher.fetch_metadata(url))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
            .map_err(ProbeError::Spawn)?;

        if !output.status.success() {
            return Err(ProbeError::ToolFailed {
                status: status_text(&output),
                stderr: stderr_tail(&output),
            });
        }

        parse_duration(&output.stdout)
    }
}

/// Extract a positive duration from a JSON metadata document.
pub fn parse_duration(stdout: &[u8]) -> Result<f64, ProbeError> {
    let metadata: Metadata =
        serde_json::from_slice(stdout).map_err(ProbeError::Unparseable)?;
    match metadata.duration {
        None => Err(ProbeError::MissingDuration),
        Some(d) if d.is_finite() && d > 0.0 => Ok(d),
        Some(d) => Err(ProbeError::InvalidDuration(d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tool_output::test_support::output;
    use crate::ports::tools::MockMetadataFetcher;
    use async_trait::async_trait;
    use std::io;
    use std::process::Output;

    fn probe_with(fetcher: MockMetadataFetcher) -> MediaProbe<MockMetadataFetcher> {
        MediaProbe::new(fetcher, Duration::from_secs(5))
    }

    #[test]
    fn parses_fractional_and_integer_durations() {
        let json = br#"{"id":"abc","title":"clip","duration":95.4,"ext":"mp4"}"#;
        assert_eq!(parse_duration(json).unwrap(), 95.4);
        assert_eq!(parse_duration(b"{\"duration\": 30}\n").unwrap(), 30.0);
    }

    #[test]
    fn missing_or_null_duration_is_reported() {
        assert!(matches!(
            parse_duration(br#"{"title":"live"}"#),
            Err(ProbeError::MissingDuration)
        ));
        assert!(matches!(
            parse_duration(br#"{"duration":null}"#),
            Err(ProbeError::MissingDuration)
        ));
    }

    #[test]
    fn zero_and_negative_durations_are_rejected() {
        assert!(matches!(
            parse_duration(br#"{"duration":0}"#),
            Err(ProbeError::InvalidDuration(d)) if d == 0.0
        ));
        assert!(matches!(
            parse_duration(br#"{"duration":-3.5}"#),
            Err(ProbeError::InvalidDuration(_))
        ));
    }

    #[test]
    fn garbage_output_is_unparseable() {
        assert!(matches!(
            parse_duration(b"WARNING: something\n{"),
            Err(ProbeError::Unparseable(_))
        ));
        assert!(matches!(
            parse_duration(br#"{"duration":"95"}"#),
            Err(ProbeError::Unparseable(_))
        ));
    }

    #[tokio::test]
    async fn probe_returns_duration_from_tool_output() {
        let mut fetcher = MockMetadataFetcher::new();
        fetcher
            .expect_fetch_metadata()
            .withf(|url| url == "https://example.com/watch?v=1")
            .times(1)
            .returning(|_| Ok(output(r#"{"duration": 61.0}"#, "", true)));

        let duration = probe_with(fetcher)
            .probe("https://example.com/watch?v=1")
            .await
            .unwrap();
        assert_eq!(duration, 61.0);
    }

    #[tokio::test]
    async fn probe_reports_tool_failure_with_stderr() {
        let mut fetcher = MockMetadataFetcher::new();
        fetcher
            .expect_fetch_metadata()
            .returning(|_| Ok(output("", "ERROR: Unsupported URL: nope", false)));

        let err = probe_with(fetcher).probe("nope").await.unwrap_err();
        match err {
            ProbeError::ToolFailed { stderr, .. } => assert!(stderr.contains("Unsupported URL")),
            other => panic!("expected ToolFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn probe_reports_spawn_failure() {
        let mut fetcher = MockMetadataFetcher::new();
        fetcher
            .expect_fetch_metadata()
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "yt-dlp not found")));

        let err = probe_with(fetcher).probe("https://example.com").await.unwrap_err();
        assert!(matches!(err, ProbeError::Spawn(_)));
        assert!(!err.is_bad_input());
    }

    struct HangingFetcher;

    #[async_trait]
    impl MetadataFetcher for HangingFetcher {
        async fn fetch_metadata(&self, _url: &str) -> io::Result<Output> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(output(r#"{"duration": 10}"#, "", true))
        }
    }

    #[tokio::test]
    async fn probe_gives_up_after_timeout() {
        let probe = MediaProbe::new(HangingFetcher, Duration::from_millis(50));

        let err = probe.probe("https://example.com/slow").await.unwrap_err();
        assert!(matches!(err, ProbeError::Timeout(after) if after == Duration::from_millis(50)));
        assert!(!err.is_bad_input());
    }
}
