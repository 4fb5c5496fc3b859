use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Unique, monotonically assigned job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    Created,
    Probing,
    Downloading,
    Planning,
    Extracting,
    Cleaning,
    Completed,
    Failed,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

/// One request to cut one source URL into clips.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub url: String,
    /// Source duration in seconds, known once probing succeeds.
    pub duration: f64,
    /// Local copy of the whole source video.
    pub source_path: PathBuf,
    pub state: JobState,
}

impl Job {
    pub fn new(id: JobId, url: impl Into<String>, download_dir: &Path) -> Self {
        Self {
            id,
            url: url.into(),
            duration: 0.0,
            source_path: download_dir.join(source_file_name(id)),
            state: JobState::Created,
        }
    }

    /// Move to `next`. Terminal states are sticky.
    pub fn advance(&mut self, next: JobState) {
        if self.state.is_terminal() {
            return;
        }
        tracing::debug!(job_id = %self.id, from = ?self.state, to = ?next, "job state");
        self.state = next;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentState {
    Pending,
    Extracting,
    Succeeded,
    Failed,
}

impl SegmentState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SegmentState::Succeeded | SegmentState::Failed)
    }
}

/// One contiguous time range of a job's source, cut into its own file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub job_id: JobId,
    /// Segment index (0-based)
    pub index: usize,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
    /// Output path for the extracted clip
    pub output_path: PathBuf,
    pub state: SegmentState,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// File name of the clip relative to the clips directory.
    pub fn file_name(&self) -> String {
        clip_file_name(self.job_id, self.index)
    }
}

pub fn source_file_name(id: JobId) -> String {
    format!("video_{}.mp4", id)
}

pub fn clip_file_name(id: JobId, index: usize) -> String {
    format!("clip_{}_{}.mp4", id, index)
}

/// One produced clip handed to the presenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducedClip {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    /// Path relative to the clips directory.
    pub file: String,
}

/// Result of a completed job: every segment, in ascending index order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipManifest {
    pub job_id: JobId,
    pub duration: f64,
    pub clips: Vec<ProducedClip>,
}
