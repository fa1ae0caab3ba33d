//! Background task event processing.
//!
//! Applies fetch completions to `App`. Stale results never reach state:
//! grid pages go through the controller's epoch check, detail bundles
//! through the generation counter.

use crate::app::{App, AppEvent, DetailState};

pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::HomeLoaded(result) => {
            app.home.loading = false;
            match result {
                Ok(rows) => {
                    app.home.error = None;
                    app.home.rows = Some(rows);
                    clamp_home_selection(app);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Home rows failed to load");
                    app.home.error = Some(e.to_string());
                }
            }
        }

        AppEvent::GenresLoaded { media, result } => match result {
            Ok(genres) => app.resolver.apply(media, genres),
            Err(e) => {
                // Resolver falls back to the builtin table; retryable later
                tracing::warn!(media = %media, error = %e, "Genre taxonomy failed to load");
                app.resolver.load_failed(media);
            }
        },

        AppEvent::PageLoaded { request, result } => {
            let media = request.media;
            let failed = result.is_err();
            let applied = app.controller_mut(media).apply_page(&request, result);
            if !applied {
                return; // stale epoch, already logged by the controller
            }
            if failed {
                app.set_status("Load failed — press r to retry");
            }
            // Keep the cursor inside the (possibly replaced) item list
            let len = app.controller(media).items().len();
            if app.grid_selected(media) >= len {
                app.set_grid_selected(media, len.saturating_sub(1));
            }
        }

        AppEvent::DetailLoaded { generation, result } => {
            if generation != app.detail_generation {
                tracing::debug!(
                    stale_generation = generation,
                    generation = app.detail_generation,
                    "Discarding stale detail bundle"
                );
                return;
            }
            match result {
                Ok(bundle) => app.install_detail(bundle),
                Err(e) => {
                    if let DetailState::Loading { media, id } = app.detail {
                        app.detail = DetailState::Failed {
                            media,
                            id,
                            error: e.to_string(),
                        };
                    }
                }
            }
        }
    }
}

fn clamp_home_selection(app: &mut App) {
    let Some(rows) = &app.home.rows else { return };
    let lens = [
        rows.trending.len(),
        rows.now_playing.len(),
        rows.popular_series.len(),
    ];
    if app.home.selected_row >= lens.len() {
        app.home.selected_row = lens.len() - 1;
    }
    let row_len = lens[app.home.selected_row];
    if app.home.selected_col >= row_len {
        app.home.selected_col = row_len.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, View};
    use crate::browse::PageRequest;
    use crate::catalog::{
        CatalogClient, CatalogError, CatalogItem, GenreFilter, MediaType, MovieSummary, Page,
    };
    use crate::config::Config;
    use secrecy::SecretString;

    fn test_app() -> App {
        let client = CatalogClient::with_base_url(
            SecretString::from("test-key"),
            "en-US",
            "http://127.0.0.1:9",
        );
        App::new(client, &Config::default())
    }

    fn movie(id: u64) -> CatalogItem {
        CatalogItem::Movie(MovieSummary {
            id,
            title: format!("Movie {id}"),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            genre_ids: Vec::new(),
            vote_average: 0.0,
        })
    }

    #[test]
    fn stale_page_event_does_not_touch_state() {
        let mut app = test_app();
        app.view = View::Browse(MediaType::Movie);
        let old_request = app.movies.set_filter(GenreFilter::All);
        // Filter changes before the first fetch lands
        let new_request = app.movies.set_filter(GenreFilter::Genre(28));

        handle_app_event(
            &mut app,
            AppEvent::PageLoaded {
                request: old_request,
                result: Ok(Page {
                    items: vec![movie(1), movie(2)],
                    total_pages: 9,
                }),
            },
        );
        assert!(app.movies.items().is_empty());

        handle_app_event(
            &mut app,
            AppEvent::PageLoaded {
                request: new_request,
                result: Ok(Page {
                    items: vec![movie(7)],
                    total_pages: 1,
                }),
            },
        );
        assert_eq!(app.movies.items().len(), 1);
        assert_eq!(app.movies.items()[0].id(), 7);
    }

    #[test]
    fn failed_page_sets_retry_status() {
        let mut app = test_app();
        let request = app.movies.set_filter(GenreFilter::All);
        handle_app_event(
            &mut app,
            AppEvent::PageLoaded {
                request,
                result: Err(CatalogError::Timeout),
            },
        );
        assert!(app.status_message.is_some());
        assert!(app.movies.view().error.is_some());
    }

    #[test]
    fn cursor_is_clamped_when_filter_shrinks_list() {
        let mut app = test_app();
        let request = app.movies.set_filter(GenreFilter::All);
        handle_app_event(
            &mut app,
            AppEvent::PageLoaded {
                request,
                result: Ok(Page {
                    items: (0..20).map(movie).collect(),
                    total_pages: 1,
                }),
            },
        );
        app.set_grid_selected(MediaType::Movie, 19);

        let request = app.movies.set_filter(GenreFilter::Genre(18));
        handle_app_event(
            &mut app,
            AppEvent::PageLoaded {
                request,
                result: Ok(Page {
                    items: (0..3).map(movie).collect(),
                    total_pages: 1,
                }),
            },
        );
        assert_eq!(app.grid_selected(MediaType::Movie), 2);
    }

    #[test]
    fn stale_detail_generation_is_dropped() {
        let mut app = test_app();
        app.open_detail(MediaType::Movie, 100);
        let stale = app.detail_generation;
        app.open_detail(MediaType::Movie, 200);

        handle_app_event(
            &mut app,
            AppEvent::DetailLoaded {
                generation: stale,
                result: Err(CatalogError::NotFound),
            },
        );
        // Still loading item 200; the stale failure did not apply
        assert!(matches!(
            app.detail,
            crate::app::DetailState::Loading { id: 200, .. }
        ));
    }

    #[test]
    fn genre_failure_returns_resolver_to_retryable() {
        let mut app = test_app();
        assert!(app.resolver.begin_load(MediaType::Movie));
        handle_app_event(
            &mut app,
            AppEvent::GenresLoaded {
                media: MediaType::Movie,
                result: Err(CatalogError::HttpStatus(500)),
            },
        );
        assert!(app.resolver.begin_load(MediaType::Movie));
    }
}
