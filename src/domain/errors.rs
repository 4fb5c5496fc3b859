//! Error taxonomy for the clip pipeline.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain a usable duration for a source URL.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("probe tool could not be started: {0}")]
    Spawn(#[source] io::Error),

    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("probe tool exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },

    #[error("probe output is not valid metadata: {0}")]
    Unparseable(#[source] serde_json::Error),

    #[error("metadata has no duration")]
    MissingDuration,

    #[error("metadata reports an unusable duration: {0}")]
    InvalidDuration(f64),
}

impl ProbeError {
    /// True when the failure says something about the URL rather than the host.
    pub fn is_bad_input(&self) -> bool {
        !matches!(self, ProbeError::Spawn(_) | ProbeError::Timeout(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("segment length must be positive and finite, got {0}")]
    InvalidSegmentLength(f64),

    #[error("plan produced no segments")]
    Empty,

    #[error("plan would need {0} segments, more than {max}", max = crate::domain::plan::MAX_SEGMENTS)]
    TooManySegments(f64),
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("download tool could not be started: {0}")]
    Spawn(#[source] io::Error),

    #[error("download timed out after {0:?}")]
    Timeout(Duration),

    #[error("download tool exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },

    #[error("download finished but {0} does not exist")]
    MissingOutput(PathBuf),
}

/// Failure to cut one segment out of the source file.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("transcoder could not be started for segment {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },

    #[error("segment {index} timed out after {after:?}")]
    Timeout { index: usize, after: Duration },

    #[error("transcoder exited with {status} for segment {index}: {stderr}")]
    ToolFailed {
        index: usize,
        status: String,
        stderr: String,
    },

    #[error("segment {index} produced no output at {path}")]
    EmptyOutput { index: usize, path: PathBuf },

    #[error("segment {index} skipped after an earlier segment failed")]
    Skipped { index: usize },
}

/// Non-fatal filesystem problem during cleanup. Logged, never surfaced.
#[derive(Error, Debug)]
#[error("could not remove {path}: {source}")]
pub struct CleanupWarning {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Terminal failure of one job.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("url must not be empty")]
    EmptyUrl,

    #[error("probe failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),

    #[error("clip creation failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("job workspace error: {0}")]
    Io(#[from] io::Error),
}

/// Which side of the request a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad or unprobeable input; retrying with the same URL will not help.
    Client,
    /// Tool crash, timeout or disk trouble on our side.
    Server,
}

impl JobError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            JobError::EmptyUrl => ErrorCategory::Client,
            JobError::Probe(e) if e.is_bad_input() => ErrorCategory::Client,
            _ => ErrorCategory::Server,
        }
    }

    /// Short caller-facing message for the failed stage.
    pub fn public_message(&self) -> &'static str {
        match self {
            JobError::EmptyUrl => "Missing video url",
            JobError::Probe(ProbeError::MissingDuration | ProbeError::InvalidDuration(_)) => {
                "Cannot get video duration"
            }
            JobError::Probe(_) => "Failed to get video info",
            JobError::Download(_) => "Failed to download video",
            JobError::Plan(_) | JobError::Extract(_) | JobError::Io(_) => "Failed to create clips",
        }
    }
}
