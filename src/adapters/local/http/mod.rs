//! HTTP inbound adapter.
//!
//! `POST /clip` runs a job; `/clips/*` serves the produced files.

pub mod handlers;
pub mod presenter;

use crate::ports::service::ClipService;
use axum::{routing::post, Router};
use presenter::{ClipPresenter, CLIPS_ROUTE};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ClipService>,
    pub presenter: ClipPresenter,
}

pub fn router(state: AppState, clip_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/clip", post(handlers::create_clips))
        .nest_service(CLIPS_ROUTE, ServeDir::new(clip_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
