use super::presenter::ClipView;
use super::AppState;
use crate::domain::errors::{ErrorCategory, JobError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ClipRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ClipsResponse {
    pub clips: Vec<ClipView>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub async fn create_clips(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ClipRequest>, JsonRejection>,
) -> Result<Json<ClipsResponse>, (StatusCode, Json<ErrorBody>)> {
    let Json(request) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "rejected clip request body");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: String::from("Invalid request body"),
            }),
        )
    })?;
    tracing::info!(url = %request.url, "clip request");

    let manifest = state
        .service
        .create_clip_job(&request.url)
        .await
        .map_err(|e| error_response(&e))?;

    let host = headers.get(header::HOST).and_then(|h| h.to_str().ok());
    Ok(Json(ClipsResponse {
        clips: state.presenter.present(&manifest, host),
    }))
}

fn error_response(err: &JobError) -> (StatusCode, Json<ErrorBody>) {
    let status = match err.category() {
        ErrorCategory::Client => StatusCode::BAD_REQUEST,
        ErrorCategory::Server => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            error: err.public_message().to_string(),
        }),
    )
}
