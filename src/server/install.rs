//! Install page

use askama::Template;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

use super::AppState;
use crate::models::MovieMetadata;

const SAMPLE_RELEASE: &str = "One.Battle.After.Another.2025.2160p.WEB-DL.DV.HDR.DDP5.1.Atmos.H265-AOC 28.67 GB 🌟 455 🌟 thepiratebay";
const SAMPLE_URL: &str = "https://download.real-debrid.com/d/sample";

#[derive(Template)]
#[template(path = "install.html")]
pub struct InstallTemplate<'a> {
    pub name: &'a str,
    pub stremio_url: String,
    pub sample: &'a str,
}

impl<'a> InstallTemplate<'a> {
    pub fn new(name: &'a str, host: &str, sample: &'a str) -> Self {
        Self {
            name,
            stremio_url: format!("stremio://stremio.xyz/app/{}/manifest.json", host),
            sample,
        }
    }
}

pub async fn install_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");

    let addon = state.addon();
    let sample = addon.render(
        &MovieMetadata::new("One Battle After Another", Some(2025)),
        &addon.describe(SAMPLE_RELEASE, Some(SAMPLE_URL)),
    );

    match InstallTemplate::new(&addon.config().addon.name, host, &sample).render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template render error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template render error").into_response()
        }
    }
}
