//! Clip server binary.
//!
//! Wires up:
//! - yt-dlp / ffmpeg adapters
//! - the clip pipeline
//! - HTTP ingress and static clip serving

use clipper::adapters::local::http::{self, presenter::ClipPresenter, AppState};
use clipper::adapters::local::{Ffmpeg, TimestampJobIds, YtDlp};
use clipper::domain::extract::ClipExtractor;
use clipper::domain::probe::MediaProbe;
use clipper::{ClipConfig, ClipPipeline};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClipConfig::from_env();
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 1. Adapters
    let ytdlp = YtDlp::new(&config.yt_dlp_bin, &config.download_format);
    let ffmpeg = Ffmpeg::new(&config.ffmpeg_bin);

    // 2. Pipeline
    let pipeline = ClipPipeline::new(
        MediaProbe::new(ytdlp.clone(), config.probe_timeout),
        ytdlp,
        ClipExtractor::new(ffmpeg, config.extract_timeout),
        TimestampJobIds::new(),
        config.pipeline_settings(),
    );
    if let Err(e) = pipeline.prepare().await {
        tracing::error!(
            "Failed to create {:?} / {:?}: {}",
            config.download_dir,
            config.clip_dir,
            e
        );
        std::process::exit(1);
    }

    // 3. HTTP Layer
    let state = AppState {
        service: Arc::new(pipeline),
        presenter: ClipPresenter::new(config.public_base_url.clone()),
    };
    let app = http::router(state, &config.clip_dir);

    // 4. Start Server
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.addr, config.port))
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!(
        "Listening at {}:{} (segments of {}s, clips in {:?})",
        config.addr,
        config.port,
        config.segment_length,
        config.clip_dir
    );
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
