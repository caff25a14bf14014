//! End-to-end tests
//!
//! Drives the real router in-process with TMDB and Torrentio replaced by
//! mock servers: Stremio request -> metadata + streams -> filter -> rank ->
//! render -> JSON response.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use tower::ServiceExt;

use cleanstream::{create_router, Addon, AppState, Config};

const CANONICAL: &str = "One.Battle.After.Another.2025.2160p.WEB-DL.DV.HDR.DDP5.1.Atmos.H265-AOC 28.67 GB 🌟 455 🌟 thepiratebay";

// =============================================================================
// Fixture
// =============================================================================

struct Fixture {
    router: Router,
    tmdb: ServerGuard,
    torrentio: ServerGuard,
}

impl Fixture {
    async fn new() -> Self {
        Self::with(|_| {}).await
    }

    async fn with(tweak: impl FnOnce(&mut Config)) -> Self {
        let tmdb = Server::new_async().await;
        let torrentio = Server::new_async().await;

        let mut config = Config::default();
        config.debrid.api_key = Some("RDKEY".to_string());
        config.tmdb.api_key = Some("TMDBKEY".to_string());
        config.tmdb.base_url = tmdb.url();
        config.torrentio.base_url = torrentio.url();
        config.request_timeout_secs = 5;
        tweak(&mut config);

        Self {
            router: router(config),
            tmdb,
            torrentio,
        }
    }

    async fn mock_metadata(&mut self, status: usize, body: &str) -> Mock {
        self.tmdb
            .mock("GET", "/find/tt30144839")
            .match_query(Matcher::UrlEncoded(
                "external_source".into(),
                "imdb_id".into(),
            ))
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_streams(&mut self, status: usize, body: &str) -> Mock {
        self.torrentio
            .mock("GET", "/realdebrid=RDKEY/stream/movie/tt30144839.json")
            .with_status(status)
            .with_body(body)
            .create_async()
            .await
    }
}

fn router(config: Config) -> Router {
    let addon = Addon::from_config(config).unwrap();
    create_router(Arc::new(AppState::new(addon)))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, _, body) = send(router, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn stream_entry(title: &str, url: &str) -> Value {
    json!({"name": "[RD+] Torrentio", "title": title, "url": url})
}

fn streams_body(entries: Vec<Value>) -> String {
    json!({ "streams": entries }).to_string()
}

const METADATA: &str = r#"{"movie_results": [{"title": "One Battle After Another", "release_date": "2025-09-23"}], "tv_results": []}"#;

// =============================================================================
// Stream Pipeline
// =============================================================================

#[tokio::test]
async fn test_stream_request_full_pipeline() {
    let mut fx = Fixture::new().await;
    let meta_mock = fx.mock_metadata(200, METADATA).await;
    let streams_mock = fx
        .mock_streams(
            200,
            &streams_body(vec![
                stream_entry(
                    "One.Battle.After.Another.2025.1080p.WEBRip.x264.AAC 2.1 GB 👤 80 rarbg",
                    "https://torrentio.strem.fun/realdebrid/RDKEY/abc/null/0/f.mkv",
                ),
                stream_entry(
                    "One.Battle.After.Another.2025.HDCAM.x264 1.4 GB",
                    "https://download.real-debrid.com/d/cam",
                ),
                stream_entry(CANONICAL, "https://download.real-debrid.com/d/canonical"),
            ]),
        )
        .await;

    let (status, body) = get_json(&fx.router, "/stream/movie/tt30144839.json").await;

    meta_mock.assert_async().await;
    streams_mock.assert_async().await;

    assert_eq!(status, StatusCode::OK);
    let streams = body["streams"].as_array().unwrap();
    assert_eq!(streams.len(), 2);

    assert_eq!(
        streams[0]["title"],
        "🎬 One Battle After Another (2025)\n\
         💾 28.67 GB | Dolby Vision\n\
         📽️ 2160p | 🎞️ H.265\n\
         🔊 Atmos | 🧲 ThePirateBay\n\
         ✅ Cached on RD"
    );
    assert_eq!(streams[0]["url"], "https://download.real-debrid.com/d/canonical");
    assert_eq!(streams[0]["behaviorHints"], json!({}));

    assert_eq!(
        streams[1]["title"],
        "🎬 One Battle After Another (2025)\n\
         💾 2.10 GB | SDR\n\
         📽️ 1080p | 🎞️ H.264\n\
         🔊 AAC | 🧲 RARBG\n\
         🔗 Direct Torrent"
    );
}

#[tokio::test]
async fn test_metadata_failure_still_serves_streams() {
    let mut fx = Fixture::new().await;
    let _meta = fx.mock_metadata(500, "").await;
    let body = streams_body(vec![stream_entry(CANONICAL, "https://download.real-debrid.com/d/1")]);
    let _streams = fx.mock_streams(200, &body).await;

    let (status, body) = get_json(&fx.router, "/stream/movie/tt30144839.json").await;

    assert_eq!(status, StatusCode::OK);
    let title = body["streams"][0]["title"].as_str().unwrap();
    assert!(title.starts_with("🎬 One Battle After (2025)\n💾 28.67 GB"));
}

#[tokio::test]
async fn test_upstream_failure_is_empty_list() {
    let mut fx = Fixture::new().await;
    let _meta = fx.mock_metadata(200, METADATA).await;
    let _streams = fx.mock_streams(502, "bad gateway").await;

    let (status, body) = get_json(&fx.router, "/stream/movie/tt30144839.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"streams": []}));
}

#[tokio::test]
async fn test_results_are_capped() {
    let mut fx = Fixture::new().await;
    let _meta = fx.mock_metadata(200, METADATA).await;
    let entries = (1..=25)
        .map(|i| {
            stream_entry(
                &format!("Movie.2025.1080p.WEB-DL {} GB", i),
                &format!("https://download.real-debrid.com/d/{}", i),
            )
        })
        .collect();
    let _streams = fx.mock_streams(200, &streams_body(entries)).await;

    let (_, body) = get_json(&fx.router, "/stream/movie/tt30144839.json").await;
    let streams = body["streams"].as_array().unwrap();

    assert_eq!(streams.len(), 15);
    assert_eq!(streams[0]["url"], "https://download.real-debrid.com/d/25");
    assert_eq!(streams[14]["url"], "https://download.real-debrid.com/d/11");
}

#[tokio::test]
async fn test_configured_cap_is_honored() {
    let mut fx = Fixture::with(|c| c.ranking.max_results = 3).await;
    let _meta = fx.mock_metadata(200, METADATA).await;
    let entries = (1..=10)
        .map(|i| stream_entry(&format!("Movie.720p {} GB", i), "https://x.real-debrid.com/d"))
        .collect();
    let _streams = fx.mock_streams(200, &streams_body(entries)).await;

    let (_, body) = get_json(&fx.router, "/stream/movie/tt30144839.json").await;
    assert_eq!(body["streams"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_no_debrid_key_returns_empty_without_upstream_calls() {
    let mut fx = Fixture::with(|c| c.debrid.api_key = None).await;
    let streams_mock = fx
        .torrentio
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (status, body) = get_json(&fx.router, "/stream/movie/tt30144839.json").await;

    streams_mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"streams": []}));
}

#[tokio::test]
async fn test_non_imdb_id_returns_empty() {
    let fx = Fixture::new().await;
    let (status, body) = get_json(&fx.router, "/stream/movie/kitsu:1234.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"streams": []}));
}

// =============================================================================
// Other Routes
// =============================================================================

#[tokio::test]
async fn test_manifest() {
    let fx = Fixture::new().await;
    let (status, body) = get_json(&fx.router, "/manifest.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "com.cleanstream.addon");
    assert_eq!(body["resources"], json!(["stream"]));
    assert_eq!(body["types"], json!(["movie", "series"]));
    assert_eq!(body["idPrefixes"], json!(["tt"]));
    assert_eq!(body["catalogs"], json!([]));
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_reports_debrid_state() {
    let fx = Fixture::new().await;
    let (_, body) = get_json(&fx.router, "/health").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["rd_configured"], true);

    let (_, body) = get_json(&router(Config::default()), "/health").await;
    assert_eq!(body["rd_configured"], false);
}

#[tokio::test]
async fn test_root_redirects_to_install() {
    let fx = Fixture::new().await;
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, headers, _) = send(&fx.router, request).await;

    assert!(status.is_redirection());
    assert_eq!(headers[header::LOCATION], "/install");
}

#[tokio::test]
async fn test_install_page_uses_host_header() {
    let fx = Fixture::new().await;
    let request = Request::builder()
        .uri("/install")
        .header(header::HOST, "addon.example.com")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&fx.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<a href=\"stremio:"));
    assert!(body.contains("addon.example.com"));
    assert!(body.contains("💾 28.67 GB | Dolby Vision"));
    assert!(body.contains("✅ Cached on RD"));
}

#[tokio::test]
async fn test_inspect_endpoint() {
    let fx = Fixture::new().await;

    let (_, body) = get_json(&fx.router, "/test").await;
    assert_eq!(body["parsed"]["codec"], "H.265");
    assert_eq!(body["parsed"]["audio"], "DDP5.1");
    assert_eq!(body["seeders"], "793");
    assert_eq!(body["size"], "16.83 GB");

    let (_, body) = get_json(&fx.router, "/test?title=Plain.Movie").await;
    assert_eq!(body["original"], "Plain.Movie");
    assert_eq!(body["size"], "Size N/A");
    assert_eq!(body["seeders"], "?");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let fx = Fixture::new().await;
    let request = Request::builder()
        .uri("/manifest.json")
        .header(header::ORIGIN, "https://web.stremio.com")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(&fx.router, request).await;

    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let mut fx = Fixture::new().await;
    let _meta = fx.mock_metadata(200, METADATA).await;
    let body = streams_body(vec![stream_entry(CANONICAL, "https://download.real-debrid.com/d/1")]);
    let _streams = fx.mock_streams(200, &body).await;

    let responses = futures::future::join_all(
        (0..8).map(|_| get_json(&fx.router, "/stream/movie/tt30144839.json")),
    )
    .await;

    let first = &responses[0].1;
    assert_eq!(first["streams"].as_array().unwrap().len(), 1);
    assert!(responses.iter().all(|(status, body)| *status == StatusCode::OK && body == first));
}
