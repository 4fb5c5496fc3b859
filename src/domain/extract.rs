//! Cutting one segment out of a downloaded source.

use super::errors::{CleanupWarning, ExtractError};
use super::jobs::{Segment, SegmentState};
use super::tool_output::{status_text, stderr_tail};
use crate::ports::tools::TranscodeExecutor;
use std::path::Path;
use std::time::Duration;

pub struct ClipExtractor<T> {
    executor: T,
    timeout: Duration,
}

impl<T: TranscodeExecutor> ClipExtractor<T> {
    pub fn new(executor: T, timeout: Duration) -> Self {
        Self { executor, timeout }
    }

    /// Write `segment.output_path` from `source`. On failure any partial output
    /// is removed and the segment is left `Failed`.
    pub async fn extract(&self, source: &Path, segment: &mut Segment) -> Result<(), ExtractError> {
        segment.state = SegmentState::Extracting;
        tracing::debug!(
            job_id = %segment.job_id,
            segment = segment.index,
            start = segment.start,
            end = segment.end,
            path = %segment.output_path.display(),
            "extracting segment"
        );

        match self.run(source, segment).await {
            Ok(()) => {
                segment.state = SegmentState::Succeeded;
                Ok(())
            }
            Err(e) => {
                segment.state = SegmentState::Failed;
                if let Err(warning) = discard(&segment.output_path).await {
                    tracing::warn!(job_id = %segment.job_id, "{}", warning);
                }
                Err(e)
            }
        }
    }

    async fn run(&self, source: &Path, segment: &Segment) -> Result<(), ExtractError> {
        let index = segment.index;
        let cut = self
            .executor
            .cut(source, segment.start, segment.end, &segment.output_path);

        let output = tokio::time::timeout(self.timeout, cut)
            .await
            .map_err(|_| ExtractError::Timeout {
                index,
                after: self.timeout,
            })?
            .map_err(|source| ExtractError::Spawn { index, source })?;

        if !output.status.success() {
            return Err(ExtractError::ToolFailed {
                index,
                status: status_text(&output),
                stderr: stderr_tail(&output),
            });
        }

        match tokio::fs::metadata(&segment.output_path).await {
            Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
            _ => Err(ExtractError::EmptyOutput {
                index,
                path: segment.output_path.clone(),
            }),
        }
    }
}

/// Remove a file that must not be referenced anymore. A missing file is fine.
pub async fn discard(path: &Path) -> Result<(), CleanupWarning> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CleanupWarning {
            path: path.to_path_buf(),
            source,
        }),
    }
}
