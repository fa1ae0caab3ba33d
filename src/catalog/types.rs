//! Wire and domain types for the TMDB catalog.
//!
//! The movie and series payloads use different field vocabularies
//! (`title`/`release_date` vs. `name`/`first_air_date`), so the two are
//! modeled as separate summary structs wrapped in the [`CatalogItem`]
//! tagged union. The media type chosen at request time selects which
//! shape a payload is parsed as, so the vocabularies never mix.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Media Type
// ============================================================================

/// Discriminant between the two catalog item shapes.
///
/// Selects endpoint paths (`/discover/movie` vs. `/discover/tv`) and
/// which wire struct a list payload deserializes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// The URL path segment TMDB uses for this media type.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "tv",
        }
    }

    /// Human-readable plural label for headings and status lines.
    pub fn plural_label(self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Series => "TV Series",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

// ============================================================================
// Genres & Filters
// ============================================================================

/// A single genre taxonomy entry as returned by `/genre/{type}/list`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Active genre filter for a browse grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreFilter {
    /// No filtering; every genre.
    All,
    /// Restrict results to a single genre code.
    Genre(u32),
}

impl GenreFilter {
    /// Value for the `with_genres` query parameter, if any.
    pub fn query_value(self) -> Option<String> {
        match self {
            Self::All => None,
            Self::Genre(code) => Some(code.to_string()),
        }
    }
}

// ============================================================================
// List Pages
// ============================================================================

/// One page of a paginated listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Server-reported page count, clamped to at least 1.
    pub total_pages: u32,
}

/// Raw paginated response envelope.
///
/// `results` is parsed leniently: a missing or non-array field yields an
/// empty list instead of a deserialization error, so a malformed payload
/// degrades to "zero new items" at the call site. Individual entries are
/// kept as raw JSON and converted per media type by [`parse_items`].
#[derive(Debug, Deserialize)]
pub(crate) struct RawPage {
    #[serde(default, deserialize_with = "lenient_array")]
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_pages: u32,
}

/// Deserialize a JSON value as an array, degrading anything else to empty.
pub(crate) fn lenient_array<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match raw {
        Some(serde_json::Value::Array(values)) => Ok(values),
        Some(other) => {
            tracing::warn!(
                kind = %json_kind(&other),
                "Expected array in results field, treating as empty"
            );
            Ok(Vec::new())
        }
        None => Ok(Vec::new()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Convert raw list entries into [`CatalogItem`]s for the given media type.
///
/// Entries that fail to parse are skipped with a debug log rather than
/// failing the page; one malformed row must not discard its neighbors.
pub(crate) fn parse_items(media: MediaType, values: Vec<serde_json::Value>) -> Vec<CatalogItem> {
    let mut items = Vec::with_capacity(values.len());
    for value in values {
        let parsed = match media {
            MediaType::Movie => {
                serde_json::from_value::<MovieSummary>(value).map(CatalogItem::Movie)
            }
            MediaType::Series => {
                serde_json::from_value::<SeriesSummary>(value).map(CatalogItem::Series)
            }
        };
        match parsed {
            Ok(item) => items.push(item),
            Err(e) => tracing::debug!(media = %media, error = %e, "Skipping malformed list entry"),
        }
    }
    items
}

// ============================================================================
// Catalog Items (list summaries)
// ============================================================================

/// Movie summary as it appears in discover/trending/similar listings.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub vote_average: f64,
}

/// Series summary as it appears in discover/popular listings.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub first_air_date: Option<NaiveDate>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub vote_average: f64,
}

/// A catalog entry: either a movie or a series, tagged by variant.
#[derive(Debug, Clone)]
pub enum CatalogItem {
    Movie(MovieSummary),
    Series(SeriesSummary),
}

impl CatalogItem {
    pub fn media_type(&self) -> MediaType {
        match self {
            Self::Movie(_) => MediaType::Movie,
            Self::Series(_) => MediaType::Series,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Movie(m) => m.id,
            Self::Series(s) => s.id,
        }
    }

    pub fn display_title(&self) -> &str {
        match self {
            Self::Movie(m) => &m.title,
            Self::Series(s) => &s.name,
        }
    }

    pub fn overview(&self) -> &str {
        match self {
            Self::Movie(m) => &m.overview,
            Self::Series(s) => &s.overview,
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            Self::Movie(m) => m.poster_path.as_deref(),
            Self::Series(s) => s.poster_path.as_deref(),
        }
    }

    /// Release date for movies, first air date for series.
    pub fn release_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Movie(m) => m.release_date,
            Self::Series(s) => s.first_air_date,
        }
    }

    pub fn genre_codes(&self) -> &[u32] {
        match self {
            Self::Movie(m) => &m.genre_ids,
            Self::Series(s) => &s.genre_ids,
        }
    }

    pub fn vote_average(&self) -> f64 {
        match self {
            Self::Movie(m) => m.vote_average,
            Self::Series(s) => s.vote_average,
        }
    }

    /// Canonical TMDB web page for this item, for opening in a browser.
    pub fn web_url(&self) -> String {
        format!(
            "https://www.themoviedb.org/{}/{}",
            self.media_type().path_segment(),
            self.id()
        )
    }
}

/// Parse a TMDB date field, treating empty or unparseable strings as None.
///
/// The API routinely returns `""` for unreleased titles; that must not
/// fail the whole payload.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()))
}

// ============================================================================
// Item Details
// ============================================================================

/// Full movie record from `/movie/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub original_language: String,
}

/// Full series record from `/tv/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesDetail {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub first_air_date: Option<NaiveDate>,
    #[serde(default)]
    pub number_of_seasons: u32,
    #[serde(default)]
    pub number_of_episodes: u32,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub original_language: String,
}

/// Core detail record, tagged by media type.
#[derive(Debug, Clone)]
pub enum ItemDetail {
    Movie(MovieDetail),
    Series(SeriesDetail),
}

impl ItemDetail {
    pub fn media_type(&self) -> MediaType {
        match self {
            Self::Movie(_) => MediaType::Movie,
            Self::Series(_) => MediaType::Series,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Movie(m) => m.id,
            Self::Series(s) => s.id,
        }
    }

    pub fn display_title(&self) -> &str {
        match self {
            Self::Movie(m) => &m.title,
            Self::Series(s) => &s.name,
        }
    }

    pub fn tagline(&self) -> &str {
        match self {
            Self::Movie(m) => &m.tagline,
            Self::Series(s) => &s.tagline,
        }
    }

    pub fn overview(&self) -> &str {
        match self {
            Self::Movie(m) => &m.overview,
            Self::Series(s) => &s.overview,
        }
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Movie(m) => m.release_date,
            Self::Series(s) => s.first_air_date,
        }
    }

    pub fn genres(&self) -> &[Genre] {
        match self {
            Self::Movie(m) => &m.genres,
            Self::Series(s) => &s.genres,
        }
    }

    pub fn vote_average(&self) -> f64 {
        match self {
            Self::Movie(m) => m.vote_average,
            Self::Series(s) => s.vote_average,
        }
    }

    pub fn vote_count(&self) -> u64 {
        match self {
            Self::Movie(m) => m.vote_count,
            Self::Series(s) => s.vote_count,
        }
    }

    pub fn web_url(&self) -> String {
        format!(
            "https://www.themoviedb.org/{}/{}",
            self.media_type().path_segment(),
            self.id()
        )
    }
}

// ============================================================================
// Auxiliary Detail Resources
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
}

/// Cast and crew from the `/credits` resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageInfo {
    pub file_path: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Backdrops and posters from the `/images` resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub backdrops: Vec<ImageInfo>,
    #[serde(default)]
    pub posters: Vec<ImageInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewAuthorDetails {
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub author_details: ReviewAuthorDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewList {
    #[serde(default)]
    pub results: Vec<Review>,
}

// ============================================================================
// Watch Providers
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    pub provider_id: u64,
    pub provider_name: String,
}

/// Offer groups for one region.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchOffers {
    #[serde(default)]
    pub flatrate: Vec<Provider>,
    #[serde(default)]
    pub rent: Vec<Provider>,
    #[serde(default)]
    pub buy: Vec<Provider>,
}

impl WatchOffers {
    pub fn is_empty(&self) -> bool {
        self.flatrate.is_empty() && self.rent.is_empty() && self.buy.is_empty()
    }
}

/// Raw `/watch/providers` response: offers keyed by ISO 3166-1 region.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct WatchProvidersResponse {
    #[serde(default)]
    pub results: HashMap<String, WatchOffers>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn movie_summary_parses_minimal_payload() {
        let json = r#"{"id": 603, "title": "The Matrix"}"#;
        let m: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, 603);
        assert_eq!(m.title, "The Matrix");
        assert!(m.release_date.is_none());
        assert!(m.genre_ids.is_empty());
    }

    #[test]
    fn series_summary_uses_its_own_field_names() {
        let json = r#"{"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20"}"#;
        let s: SeriesSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.name, "Breaking Bad");
        assert_eq!(
            s.first_air_date,
            Some(NaiveDate::from_ymd_opt(2008, 1, 20).unwrap())
        );
    }

    #[test]
    fn empty_release_date_is_none() {
        let json = r#"{"id": 1, "title": "Unreleased", "release_date": ""}"#;
        let m: MovieSummary = serde_json::from_str(json).unwrap();
        assert!(m.release_date.is_none());
    }

    #[test]
    fn garbage_release_date_is_none() {
        let json = r#"{"id": 1, "title": "Odd", "release_date": "not-a-date"}"#;
        let m: MovieSummary = serde_json::from_str(json).unwrap();
        assert!(m.release_date.is_none());
    }

    #[test]
    fn raw_page_tolerates_non_array_results() {
        let raw: RawPage = serde_json::from_str(r#"{"results": 42, "total_pages": 7}"#).unwrap();
        assert!(raw.results.is_empty());
        assert_eq!(raw.total_pages, 7);
    }

    #[test]
    fn raw_page_tolerates_missing_results() {
        let raw: RawPage = serde_json::from_str(r#"{"total_pages": 3}"#).unwrap();
        assert!(raw.results.is_empty());
    }

    #[test]
    fn parse_items_skips_malformed_entries() {
        let values = vec![
            serde_json::json!({"id": 1, "title": "Good"}),
            serde_json::json!({"title": "No id"}),
            serde_json::json!({"id": 2, "title": "Also good"}),
        ];
        let items = parse_items(MediaType::Movie, values);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), 1);
        assert_eq!(items[1].id(), 2);
    }

    #[test]
    fn catalog_item_accessors_cover_both_variants() {
        let movie = CatalogItem::Movie(MovieSummary {
            id: 1,
            title: "A".into(),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            genre_ids: vec![28],
            vote_average: 7.5,
        });
        let series = CatalogItem::Series(SeriesSummary {
            id: 2,
            name: "B".into(),
            overview: String::new(),
            poster_path: None,
            first_air_date: None,
            genre_ids: vec![18],
            vote_average: 8.0,
        });
        assert_eq!(movie.display_title(), "A");
        assert_eq!(series.display_title(), "B");
        assert_eq!(movie.genre_codes(), &[28]);
        assert_eq!(series.media_type(), MediaType::Series);
        assert_eq!(movie.web_url(), "https://www.themoviedb.org/movie/1");
        assert_eq!(series.web_url(), "https://www.themoviedb.org/tv/2");
    }

    #[test]
    fn watch_offers_empty_check() {
        let offers = WatchOffers::default();
        assert!(offers.is_empty());
        let json = r#"{"flatrate": [{"provider_id": 8, "provider_name": "Netflix"}]}"#;
        let offers: WatchOffers = serde_json::from_str(json).unwrap();
        assert!(!offers.is_empty());
    }
}
