//! Clipper - cuts a remote video into fixed-length clips.
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (planning, probing, extraction, jobs)
//! - ports/: Trait definitions (external tools, job ids, the clip service)
//! - adapters/: Concrete implementations (yt-dlp, ffmpeg, HTTP)
//! - application/: The pipeline orchestrator
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports for convenience
pub use application::orchestrator::{ClipPipeline, PipelineSettings};
pub use config::ClipConfig;
pub use domain::errors::{ErrorCategory, JobError};
pub use domain::jobs::ClipManifest;
