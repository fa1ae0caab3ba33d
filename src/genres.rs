//! Genre taxonomy resolution.
//!
//! Maps the small integer genre codes carried by list items to display
//! names. Resolution never fails: before the fetched taxonomy for a
//! media type arrives the resolver answers from a built-in table, and a
//! code absent from both renders the literal `"Unknown"`.

use crate::catalog::{Genre, MediaType};
use std::collections::HashMap;

/// Fallback shown for codes absent from the taxonomy.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Built-in movie genre table (the stable TMDB movie taxonomy).
const BUILTIN_MOVIE: &[(u32, &str)] = &[
    (12, "Adventure"),
    (14, "Fantasy"),
    (16, "Animation"),
    (18, "Drama"),
    (27, "Horror"),
    (28, "Action"),
    (35, "Comedy"),
    (36, "History"),
    (37, "Western"),
    (53, "Thriller"),
    (80, "Crime"),
    (99, "Documentary"),
    (878, "Science Fiction"),
    (9648, "Mystery"),
    (10402, "Music"),
    (10749, "Romance"),
    (10751, "Family"),
    (10752, "War"),
    (10770, "TV Movie"),
];

/// Built-in TV genre table.
const BUILTIN_SERIES: &[(u32, &str)] = &[
    (16, "Animation"),
    (18, "Drama"),
    (35, "Comedy"),
    (37, "Western"),
    (80, "Crime"),
    (99, "Documentary"),
    (9648, "Mystery"),
    (10751, "Family"),
    (10759, "Action & Adventure"),
    (10762, "Kids"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
];

/// Load state of one media type's taxonomy.
#[derive(Debug)]
enum TaxonomyState {
    /// Not requested yet (or a previous load failed and may be retried).
    Idle,
    /// A fetch is in flight; further load calls share its result.
    Loading,
    /// Fetched taxonomy installed.
    Ready(HashMap<u32, String>),
}

/// Per-media-type genre taxonomies with idempotent loading.
#[derive(Debug)]
pub struct GenreResolver {
    movie: TaxonomyState,
    series: TaxonomyState,
}

impl Default for GenreResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GenreResolver {
    pub fn new() -> Self {
        Self {
            movie: TaxonomyState::Idle,
            series: TaxonomyState::Idle,
        }
    }

    fn state(&self, media: MediaType) -> &TaxonomyState {
        match media {
            MediaType::Movie => &self.movie,
            MediaType::Series => &self.series,
        }
    }

    fn state_mut(&mut self, media: MediaType) -> &mut TaxonomyState {
        match media {
            MediaType::Movie => &mut self.movie,
            MediaType::Series => &mut self.series,
        }
    }

    /// Claim the load for one media type.
    ///
    /// Returns true exactly once per load cycle: the caller that gets
    /// true spawns the taxonomy fetch; everyone else shares its result.
    pub fn begin_load(&mut self, media: MediaType) -> bool {
        match self.state(media) {
            TaxonomyState::Idle => {
                *self.state_mut(media) = TaxonomyState::Loading;
                true
            }
            TaxonomyState::Loading | TaxonomyState::Ready(_) => false,
        }
    }

    /// Install a fetched taxonomy.
    pub fn apply(&mut self, media: MediaType, genres: Vec<Genre>) {
        let map: HashMap<u32, String> = genres.into_iter().map(|g| (g.id, g.name)).collect();
        tracing::debug!(media = %media, count = map.len(), "Genre taxonomy loaded");
        *self.state_mut(media) = TaxonomyState::Ready(map);
    }

    /// A load failed: return to Idle so a later call can retry.
    pub fn load_failed(&mut self, media: MediaType) {
        if matches!(self.state(media), TaxonomyState::Loading) {
            *self.state_mut(media) = TaxonomyState::Idle;
        }
    }

    /// Display name for a genre code. Never fails.
    pub fn name_for(&self, media: MediaType, code: u32) -> &str {
        if let TaxonomyState::Ready(map) = self.state(media) {
            if let Some(name) = map.get(&code) {
                return name;
            }
            return UNKNOWN_GENRE;
        }
        builtin(media, code).unwrap_or(UNKNOWN_GENRE)
    }

    /// Names for a list item's genre codes, in order.
    pub fn names_for(&self, media: MediaType, codes: &[u32]) -> Vec<&str> {
        codes.iter().map(|&c| self.name_for(media, c)).collect()
    }

    /// The selectable genres for the filter overlay, sorted by name.
    ///
    /// Uses the fetched taxonomy when available, the built-in table
    /// otherwise, so the overlay works before (or without) the fetch.
    pub fn selectable(&self, media: MediaType) -> Vec<(u32, String)> {
        let mut genres: Vec<(u32, String)> = match self.state(media) {
            TaxonomyState::Ready(map) => {
                map.iter().map(|(&id, name)| (id, name.clone())).collect()
            }
            _ => builtin_table(media)
                .iter()
                .map(|&(id, name)| (id, name.to_string()))
                .collect(),
        };
        genres.sort_by(|a, b| a.1.cmp(&b.1));
        genres
    }
}

fn builtin_table(media: MediaType) -> &'static [(u32, &'static str)] {
    match media {
        MediaType::Movie => BUILTIN_MOVIE,
        MediaType::Series => BUILTIN_SERIES,
    }
}

fn builtin(media: MediaType, code: u32) -> Option<&'static str> {
    builtin_table(media)
        .iter()
        .find(|&&(id, _)| id == code)
        .map(|&(_, name)| name)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(id: u32, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn begin_load_is_idempotent_while_in_flight() {
        let mut resolver = GenreResolver::new();
        assert!(resolver.begin_load(MediaType::Movie));
        // Second call while the first is in flight shares, not duplicates
        assert!(!resolver.begin_load(MediaType::Movie));
        // The other media type is independent
        assert!(resolver.begin_load(MediaType::Series));
    }

    #[test]
    fn begin_load_after_ready_is_noop() {
        let mut resolver = GenreResolver::new();
        assert!(resolver.begin_load(MediaType::Movie));
        resolver.apply(MediaType::Movie, vec![genre(28, "Action")]);
        assert!(!resolver.begin_load(MediaType::Movie));
    }

    #[test]
    fn failed_load_can_be_retried() {
        let mut resolver = GenreResolver::new();
        assert!(resolver.begin_load(MediaType::Movie));
        resolver.load_failed(MediaType::Movie);
        assert!(resolver.begin_load(MediaType::Movie));
    }

    #[test]
    fn unknown_code_is_deterministic() {
        let mut resolver = GenreResolver::new();
        assert_eq!(resolver.name_for(MediaType::Movie, 424242), UNKNOWN_GENRE);
        resolver.apply(MediaType::Movie, vec![genre(28, "Action")]);
        assert_eq!(resolver.name_for(MediaType::Movie, 424242), UNKNOWN_GENRE);
        assert_eq!(resolver.name_for(MediaType::Movie, 424242), UNKNOWN_GENRE);
    }

    #[test]
    fn builtin_table_answers_before_fetch() {
        let resolver = GenreResolver::new();
        assert_eq!(resolver.name_for(MediaType::Movie, 28), "Action");
        assert_eq!(resolver.name_for(MediaType::Series, 10765), "Sci-Fi & Fantasy");
    }

    #[test]
    fn fetched_taxonomy_replaces_builtin() {
        let mut resolver = GenreResolver::new();
        resolver.apply(MediaType::Movie, vec![genre(28, "Aktion")]);
        assert_eq!(resolver.name_for(MediaType::Movie, 28), "Aktion");
        // Codes the fetched map lacks do not fall back to the builtin
        assert_eq!(resolver.name_for(MediaType::Movie, 12), UNKNOWN_GENRE);
    }

    #[test]
    fn names_for_preserves_code_order() {
        let resolver = GenreResolver::new();
        let names = resolver.names_for(MediaType::Movie, &[35, 28, 5555]);
        assert_eq!(names, vec!["Comedy", "Action", UNKNOWN_GENRE]);
    }

    #[test]
    fn selectable_is_sorted_by_name() {
        let mut resolver = GenreResolver::new();
        resolver.apply(
            MediaType::Movie,
            vec![genre(53, "Thriller"), genre(28, "Action"), genre(35, "Comedy")],
        );
        let names: Vec<String> = resolver
            .selectable(MediaType::Movie)
            .into_iter()
            .map(|(_, n)| n)
            .collect();
        assert_eq!(names, vec!["Action", "Comedy", "Thriller"]);
    }
}
