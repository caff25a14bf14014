//! TMDB (The Movie Database) API client
//!
//! Resolves an IMDB id to a display title and release year.
//! API docs: https://developer.themoviedb.org/reference/find-by-id

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::MetadataLookup;
use crate::models::{ContentId, MovieMetadata};

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("No results for {0}")]
    NoResults(String),

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::with_base_url(api_key, "https://api.themoviedb.org/3", timeout)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Make an authenticated GET request. No retries: a failed call is
    /// reported to the caller, which falls back to placeholder metadata.
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| TmdbError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound),
            status => Err(TmdbError::ServerError(status.as_u16())),
        }
    }

    /// Find a movie or TV show by IMDB id
    pub async fn find_by_imdb(&self, imdb_id: &str) -> Result<MovieMetadata, TmdbError> {
        let endpoint = format!("/find/{}", urlencoding::encode(imdb_id));
        let response: FindResponse = self
            .get(&endpoint, &[("external_source", "imdb_id")])
            .await?;

        debug!(
            imdb_id,
            movies = response.movie_results.len(),
            shows = response.tv_results.len(),
            "TMDB find"
        );

        response
            .into_metadata()
            .ok_or_else(|| TmdbError::NoResults(imdb_id.to_string()))
    }
}

#[async_trait]
impl MetadataLookup for TmdbClient {
    async fn lookup(&self, id: &ContentId) -> Result<MovieMetadata, TmdbError> {
        self.find_by_imdb(&id.imdb_id).await
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    movie_results: Vec<MovieResultRaw>,
    #[serde(default)]
    tv_results: Vec<TvResultRaw>,
}

impl FindResponse {
    /// Movies take precedence over TV shows
    fn into_metadata(self) -> Option<MovieMetadata> {
        if let Some(movie) = self.movie_results.into_iter().next() {
            return Some(MovieMetadata::new(
                movie.title,
                movie.release_date.as_deref().and_then(extract_year),
            ));
        }

        self.tv_results.into_iter().next().map(|tv| {
            MovieMetadata::new(tv.name, tv.first_air_date.as_deref().and_then(extract_year))
        })
    }
}

#[derive(Debug, Deserialize)]
struct MovieResultRaw {
    title: String,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TvResultRaw {
    name: String,
    first_air_date: Option<String>,
}

/// Extract year from a date string like "2022-03-04"
fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2022-03-04"), Some(2022));
        assert_eq!(extract_year("2019-11-12"), Some(2019));
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("abc"), None);
    }

    #[test]
    fn test_find_prefers_movie_results() {
        let response: FindResponse = serde_json::from_str(
            r#"{
                "movie_results": [{"title": "Dune", "release_date": "2021-09-15"}],
                "tv_results": [{"name": "Dune Show", "first_air_date": "2000-12-03"}]
            }"#,
        )
        .unwrap();
        assert_eq!(
            response.into_metadata(),
            Some(MovieMetadata::new("Dune", Some(2021)))
        );
    }

    #[test]
    fn test_find_falls_back_to_tv() {
        let response: FindResponse = serde_json::from_str(
            r#"{"movie_results": [], "tv_results": [{"name": "Breaking Bad", "first_air_date": ""}]}"#,
        )
        .unwrap();
        assert_eq!(
            response.into_metadata(),
            Some(MovieMetadata::new("Breaking Bad", None))
        );
    }

    #[test]
    fn test_find_empty() {
        let response: FindResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_metadata().is_none());
    }
}
