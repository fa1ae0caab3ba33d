//! HTTP client for the TMDB v3 API.
//!
//! Pure I/O boundary: issues requests and maps responses into the
//! domain types; owns no browsing state. Every request carries the API
//! key and configured language, and is wrapped in a 15-second timeout.

use crate::catalog::types::{
    parse_items, CatalogItem, Genre, GenreFilter, GenreListResponse, MediaType, Page, RawPage,
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Production API root. Tests point at a wiremock server instead.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from catalog requests.
///
/// Nothing here is fatal to the running view: list failures degrade to
/// "no new items" with a retryable marker, detail failures render a
/// failed state, auxiliary detail failures degrade to empty collections.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the 15-second timeout
    #[error("Request timed out")]
    Timeout,
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Detail lookup for a nonexistent id
    #[error("Not found")]
    NotFound,
    /// Response body was not the expected JSON shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// The three carousel rows on the home view, fetched concurrently.
#[derive(Debug, Clone, Default)]
pub struct HomeRows {
    pub trending: Vec<CatalogItem>,
    pub now_playing: Vec<CatalogItem>,
    pub popular_series: Vec<CatalogItem>,
}

impl HomeRows {
    pub fn is_empty(&self) -> bool {
        self.trending.is_empty() && self.now_playing.is_empty() && self.popular_series.is_empty()
    }
}

/// TMDB API client. Cheap to clone (the inner reqwest client is
/// reference-counted), so spawned tasks take their own copy.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    language: String,
}

impl CatalogClient {
    pub fn new(api_key: SecretString, language: impl Into<String>) -> Self {
        Self::with_base_url(api_key, language, DEFAULT_BASE_URL)
    }

    /// Override the API root; used by tests to target a mock server.
    pub fn with_base_url(
        api_key: SecretString,
        language: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            language: language.into(),
        }
    }

    /// One page of the filterable discover listing, sorted by
    /// popularity descending (the fixed sort order of the grid).
    ///
    /// A payload whose `results` field is missing or not an array
    /// yields zero items rather than an error; only a body that is not
    /// JSON at all is reported as [`CatalogError::InvalidResponse`].
    pub async fn list_page(
        &self,
        media: MediaType,
        page: u32,
        filter: GenreFilter,
    ) -> Result<Page<CatalogItem>, CatalogError> {
        let path = format!("discover/{}", media.path_segment());
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("sort_by".to_string(), "popularity.desc".to_string()),
        ];
        if let Some(genres) = filter.query_value() {
            query.push(("with_genres".to_string(), genres));
        }
        let raw: RawPage = self.get_json(&path, &query).await?;
        Ok(Page {
            items: parse_items(media, raw.results),
            // A zero page count would break the has-more comparison
            total_pages: raw.total_pages.max(1),
        })
    }

    /// The genre taxonomy for one media type.
    pub async fn genre_list(&self, media: MediaType) -> Result<Vec<Genre>, CatalogError> {
        let path = format!("genre/{}/list", media.path_segment());
        let raw: GenreListResponse = self.get_json(&path, &[]).await?;
        Ok(raw.genres)
    }

    /// The home carousels: trending movies, now-playing movies, and
    /// popular series, fetched concurrently. A failed row degrades to
    /// empty with a warning; only all three failing is an error.
    pub async fn home_rows(&self) -> Result<HomeRows, CatalogError> {
        let (trending, now_playing, popular) = tokio::join!(
            self.listing(MediaType::Movie, "trending/movie/week"),
            self.listing(MediaType::Movie, "movie/now_playing"),
            self.listing(MediaType::Series, "tv/popular"),
        );

        if let (Err(e), Err(_), Err(_)) = (&trending, &now_playing, &popular) {
            return Err(CatalogError::InvalidResponse(format!(
                "all home rows failed: {e}"
            )));
        }

        Ok(HomeRows {
            trending: row_or_empty("trending", trending),
            now_playing: row_or_empty("now_playing", now_playing),
            popular_series: row_or_empty("popular_series", popular),
        })
    }

    /// Fetch an unfiltered page-shaped listing endpoint.
    pub(crate) async fn listing(
        &self,
        media: MediaType,
        path: &str,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let raw: RawPage = self.get_json(path, &[]).await?;
        Ok(parse_items(media, raw.results))
    }

    /// GET `{base_url}/{path}` with the standing query parameters and
    /// parse the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);
        let request = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.api_key.expose_secret()),
                ("language", self.language.as_str()),
            ])
            .query(query);

        let response = tokio::time::timeout(REQUEST_TIMEOUT, request.send())
            .await
            .map_err(|_| CatalogError::Timeout)?
            .map_err(CatalogError::Network)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }
        if !status.is_success() {
            return Err(CatalogError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(CatalogError::Network)?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(path = %path, error = %e, "Failed to decode response body");
            CatalogError::InvalidResponse(e.to_string())
        })
    }
}

/// Degrade one failed home row to empty.
fn row_or_empty(
    row: &'static str,
    result: Result<Vec<CatalogItem>, CatalogError>,
) -> Vec<CatalogItem> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(row = row, error = %e, "Home row failed, rendering empty");
            Vec::new()
        }
    }
}
