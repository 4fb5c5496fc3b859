//! Turns produced clip files into externally reachable URLs.

use crate::domain::jobs::ClipManifest;
use serde::Serialize;

/// Mount point of the clips directory on the HTTP server.
pub const CLIPS_ROUTE: &str = "/clips";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipView {
    pub start: f64,
    pub end: f64,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClipPresenter {
    base_url: Option<String>,
}

impl ClipPresenter {
    /// `base_url` overrides the address derived from the request's Host header.
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url
                .map(|b| b.trim_end_matches('/').to_string())
                .filter(|b| !b.is_empty()),
        }
    }

    pub fn base_for(&self, host: Option<&str>) -> String {
        match (&self.base_url, host) {
            (Some(base), _) => base.clone(),
            (None, Some(host)) => format!("http://{}", host),
            (None, None) => "http://localhost".to_string(),
        }
    }

    pub fn present(&self, manifest: &ClipManifest, host: Option<&str>) -> Vec<ClipView> {
        let base = self.base_for(host);
        manifest
            .clips
            .iter()
            .map(|clip| ClipView {
                start: clip.start,
                end: clip.end,
                url: format!("{}{}/{}", base, CLIPS_ROUTE, clip.file),
            })
            .collect()
    }
}
