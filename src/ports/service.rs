use crate::domain::errors::JobError;
use crate::domain::jobs::ClipManifest;
use async_trait::async_trait;

/// The single ingress operation: turn a source URL into clips.
#[async_trait]
pub trait ClipService: Send + Sync {
    async fn create_clip_job(&self, url: &str) -> Result<ClipManifest, JobError>;
}
