//! Addon route handlers

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{AppState, VERSION};
use crate::models::{MovieMetadata, ProcessedStream, ReleaseDescriptor};

/// Title parsed by `/test` when none is given
pub const SAMPLE_TITLE: &str = "[RD] Jackettio | ElfHosted (4K) One.Battle.After.Another.2025.2160p.A.MZN.VBR.WEB-DL.DDP5.1.H.265-GTM 16.83 GB 🌟 793 🌟 thepiratebay";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub background: String,
    pub resources: Vec<String>,
    pub types: Vec<String>,
    pub id_prefixes: Vec<String>,
    pub catalogs: Vec<serde_json::Value>,
}

pub async fn manifest(State(state): State<Arc<AppState>>) -> Json<Manifest> {
    let info = &state.addon().config().addon;
    Json(Manifest {
        id: info.id.clone(),
        version: VERSION.to_string(),
        name: info.name.clone(),
        description: info.description.clone(),
        logo: info.logo.clone(),
        background: info.background.clone(),
        resources: vec!["stream".to_string()],
        types: vec!["movie".to_string(), "series".to_string()],
        id_prefixes: vec!["tt".to_string()],
        catalogs: Vec::new(),
    })
}

#[derive(Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<ProcessedStream>,
}

/// `/stream/{type}/{id}.json`; always answers 200
pub async fn stream(
    State(state): State<Arc<AppState>>,
    Path((media_type, id)): Path<(String, String)>,
) -> Json<StreamsResponse> {
    let id = id.strip_suffix(".json").unwrap_or(&id);
    Json(StreamsResponse {
        streams: state.addon().streams(&media_type, id).await,
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub rd_configured: bool,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.addon().config().addon.name.clone(),
        version: VERSION.to_string(),
        rd_configured: state.addon().debrid_configured(),
    })
}

pub async fn root() -> Redirect {
    Redirect::temporary("/install")
}

#[derive(Deserialize)]
pub struct InspectParams {
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(Serialize)]
pub struct InspectResponse {
    pub original: String,
    pub parsed: ReleaseDescriptor,
    pub size: String,
    pub seeders: String,
    pub display: String,
}

/// Debug view of how a single title is parsed and rendered
pub async fn inspect(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InspectParams>,
) -> Json<InspectResponse> {
    let title = params
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| SAMPLE_TITLE.to_string());

    let parsed = state.addon().describe(&title, params.url.as_deref());
    let display = state.addon().render(&MovieMetadata::default(), &parsed);

    Json(InspectResponse {
        size: parsed.size_display(),
        seeders: parsed.seeders_display(),
        original: title,
        parsed,
        display,
    })
}
