use crate::domain::download::fetch_source;
use crate::domain::errors::{CleanupWarning, ExtractError, JobError};
use crate::domain::extract::{discard, ClipExtractor};
use crate::domain::jobs::{ClipManifest, Job, JobState, ProducedClip, Segment, SegmentState};
use crate::domain::plan::{plan, segments_for};
use crate::domain::probe::MediaProbe;
use crate::ports::ids::JobIdGenerator;
use crate::ports::service::ClipService;
use crate::ports::tools::{Downloader, MetadataFetcher, TranscodeExecutor};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::Instrument;

/// Everything the pipeline needs to know about its environment.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Transient whole-video downloads
    pub download_dir: PathBuf,
    /// Persistent clips, served by the HTTP layer
    pub clip_dir: PathBuf,
    /// Maximum clip length in seconds
    pub segment_length: f64,
    /// How many segments may be cut at the same time
    pub extract_concurrency: usize,
    pub download_timeout: Duration,
}

/// Runs one job end to end: probe, download, plan, extract, clean up.
pub struct ClipPipeline<M, D, T, I> {
    probe: MediaProbe<M>,
    downloader: D,
    extractor: ClipExtractor<T>,
    ids: I,
    settings: PipelineSettings,
}

impl<M, D, T, I> ClipPipeline<M, D, T, I>
where
    M: MetadataFetcher,
    D: Downloader,
    T: TranscodeExecutor,
    I: JobIdGenerator,
{
    pub fn new(
        probe: MediaProbe<M>,
        downloader: D,
        extractor: ClipExtractor<T>,
        ids: I,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            probe,
            downloader,
            extractor,
            ids,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Create the download and clip directories.
    pub async fn prepare(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.settings.download_dir).await?;
        tokio::fs::create_dir_all(&self.settings.clip_dir).await
    }

    /// Cut `url` into clips. Either every clip is returned or the job fails
    /// as a whole and none of its clips are kept.
    pub async fn run(&self, url: &str) -> Result<ClipManifest, JobError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(JobError::EmptyUrl);
        }

        let mut job = Job::new(self.ids.next_id(), url, &self.settings.download_dir);
        let mut guard = AbandonGuard::new(job.source_path.clone());
        let span = tracing::info_span!("job", job_id = %job.id);

        async {
            tracing::info!(url = %job.url, "job created");
            let result = self.drive(&mut job, &mut guard).await;
            // Every exit from drive has already cleaned up after itself.
            guard.disarm();
            match &result {
                Ok(manifest) => {
                    tracing::info!(clips = manifest.clips.len(), duration = job.duration, "job completed")
                }
                Err(e) => {
                    job.advance(JobState::Failed);
                    tracing::error!(error = %e, "job failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn drive(&self, job: &mut Job, guard: &mut AbandonGuard) -> Result<ClipManifest, JobError> {
        job.advance(JobState::Probing);
        job.duration = self.probe.probe(&job.url).await?;
        tracing::info!(duration = job.duration, "probed source");

        job.advance(JobState::Downloading);
        if let Err(e) = fetch_source(
            &self.downloader,
            &job.url,
            &job.source_path,
            self.settings.download_timeout,
        )
        .await
        {
            // The tool may leave a partial file behind.
            self.remove_source(job).await;
            return Err(e.into());
        }
        tracing::info!(path = %job.source_path.display(), "downloaded source");

        let segments = match self.plan_and_extract(job, guard).await {
            Ok(segments) => segments,
            Err(e) => {
                job.advance(JobState::Failed);
                self.remove_source(job).await;
                return Err(e);
            }
        };

        job.advance(JobState::Cleaning);
        self.remove_source(job).await;

        let manifest = ClipManifest {
            job_id: job.id,
            duration: job.duration,
            clips: segments
                .iter()
                .map(|segment| ProducedClip {
                    index: segment.index,
                    start: segment.start,
                    end: segment.end,
                    file: segment.file_name(),
                })
                .collect(),
        };
        job.advance(JobState::Completed);
        Ok(manifest)
    }

    async fn plan_and_extract(
        &self,
        job: &mut Job,
        guard: &mut AbandonGuard,
    ) -> Result<Vec<Segment>, JobError> {
        job.advance(JobState::Planning);
        let ranges = plan(job.duration, self.settings.segment_length)?;
        let mut segments = segments_for(job.id, &ranges, &self.settings.clip_dir);
        guard.track(segments.iter().map(|s| s.output_path.clone()));
        tracing::debug!(segments = segments.len(), "planned segments");

        job.advance(JobState::Extracting);
        let extracted = self.extract_all(&job.source_path, &mut segments).await;
        debug_assert!(segments.iter().all(|s| s.state.is_terminal()));
        if let Err(e) = extracted {
            discard_succeeded(&segments).await;
            return Err(e.into());
        }
        Ok(segments)
    }

    /// Extract every segment, at most `extract_concurrency` at a time. Once
    /// one fails no new extraction starts, but running ones are awaited, so
    /// all segments are terminal when this returns.
    async fn extract_all(&self, source: &Path, segments: &mut [Segment]) -> Result<(), ExtractError> {
        let aborted = AtomicBool::new(false);
        let attempts: Vec<_> = segments
            .iter_mut()
            .map(|segment| self.attempt(source, segment, &aborted))
            .collect();

        let results: Vec<Result<(), ExtractError>> = stream::iter(attempts)
            .buffered(self.settings.extract_concurrency.max(1))
            .collect()
            .await;

        let mut skipped = None;
        for error in results.into_iter().filter_map(Result::err) {
            match error {
                ExtractError::Skipped { .. } => {
                    skipped.get_or_insert(error);
                }
                cause => return Err(cause),
            }
        }
        skipped.map_or(Ok(()), Err)
    }

    async fn attempt(
        &self,
        source: &Path,
        segment: &mut Segment,
        aborted: &AtomicBool,
    ) -> Result<(), ExtractError> {
        if aborted.load(Ordering::Acquire) {
            segment.state = SegmentState::Failed;
            return Err(ExtractError::Skipped {
                index: segment.index,
            });
        }
        let result = self.extractor.extract(source, segment).await;
        if let Err(e) = &result {
            tracing::error!(segment = segment.index, error = %e, "segment failed");
            aborted.store(true, Ordering::Release);
        }
        result
    }

    async fn remove_source(&self, job: &Job) {
        if let Err(warning) = discard(&job.source_path).await {
            tracing::warn!(job_id = %job.id, "{}", warning);
        }
    }
}

/// Clips of a failed job are never referenced, so they are deleted.
async fn discard_succeeded(segments: &[Segment]) {
    for segment in segments
        .iter()
        .filter(|s| s.state == SegmentState::Succeeded)
    {
        if let Err(warning) = discard(&segment.output_path).await {
            tracing::warn!(job_id = %segment.job_id, segment = segment.index, "{}", warning);
        }
    }
}

/// Removes the files of a job whose future is dropped before it finishes,
/// e.g. when the client disconnects mid-request.
struct AbandonGuard {
    paths: Vec<PathBuf>,
    armed: bool,
}

impl AbandonGuard {
    fn new(source: PathBuf) -> Self {
        Self {
            paths: vec![source],
            armed: true,
        }
    }

    fn track(&mut self, clips: impl IntoIterator<Item = PathBuf>) {
        self.paths.extend(clips);
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!(files = self.paths.len(), "job abandoned, removing its files");
        for path in &self.paths {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    let warning = CleanupWarning {
                        path: path.clone(),
                        source,
                    };
                    tracing::warn!("{}", warning);
                }
            }
        }
    }
}

#[async_trait]
impl<M, D, T, I> ClipService for ClipPipeline<M, D, T, I>
where
    M: MetadataFetcher,
    D: Downloader,
    T: TranscodeExecutor,
    I: JobIdGenerator,
{
    async fn create_clip_job(&self, url: &str) -> Result<ClipManifest, JobError> {
        self.run(url).await
    }
}
