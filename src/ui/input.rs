//! Keyboard input handling.
//!
//! The browse grid's "sentinel" is the selection cursor: whenever a
//! navigation leaves it within the last rows of the loaded grid, the
//! controller's near-end signal fires. The signal is level-triggered
//! (it repeats on every keypress while the cursor stays near the end),
//! so the controller's single-in-flight guard does the deduplication.

use crate::app::{App, AppEvent, DetailState, View};
use crate::catalog::{GenreFilter, MediaType};
use crate::ui::tasks;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::loop_runner::Action;

/// Columns in the browse grid; must match the render layout.
pub(super) const GRID_COLS: usize = 4;

/// Trigger loading when the cursor is within this many rows of the end.
const NEAR_END_ROWS: usize = 2;

pub fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Ok(Action::Quit);
    }

    if app.show_help {
        // Any key dismisses the overlay
        app.show_help = false;
        return Ok(Action::Continue);
    }

    if app.show_filter {
        handle_filter_overlay(app, code, tx);
        return Ok(Action::Continue);
    }

    match code {
        KeyCode::Char('q') => return Ok(Action::Quit),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {name}"));
        }
        KeyCode::Char('1') => enter_home(app, tx),
        KeyCode::Char('2') => enter_browse(app, MediaType::Movie, tx),
        KeyCode::Char('3') => enter_browse(app, MediaType::Series, tx),
        KeyCode::Char('o') => open_in_browser(app),
        other => match app.view {
            View::Home => handle_home_key(app, other, tx),
            View::Browse(media) => handle_browse_key(app, media, other, tx),
            View::Detail => handle_detail_key(app, other, tx),
        },
    }

    Ok(Action::Continue)
}

// ============================================================================
// View entry
// ============================================================================

fn enter_home(app: &mut App, tx: &mpsc::Sender<AppEvent>) {
    app.view = View::Home;
    if app.home.rows.is_none() && !app.home.loading {
        app.home.loading = true;
        tasks::spawn_home(app.client.clone(), tx.clone());
    }
}

fn enter_browse(app: &mut App, media: MediaType, tx: &mpsc::Sender<AppEvent>) {
    app.view = View::Browse(media);
    if app.resolver.begin_load(media) {
        tasks::spawn_genres(app.client.clone(), media, tx.clone());
    }
    if app.controller(media).is_untouched() {
        let request = app.controller_mut(media).start();
        tasks::spawn_page(app.client.clone(), request, tx.clone());
    }
}

// ============================================================================
// Home view
// ============================================================================

fn handle_home_key(app: &mut App, code: KeyCode, tx: &mpsc::Sender<AppEvent>) {
    let Some(rows) = &app.home.rows else {
        if code == KeyCode::Char('r') && !app.home.loading {
            app.home.loading = true;
            tasks::spawn_home(app.client.clone(), tx.clone());
        }
        return;
    };
    let lens = [
        rows.trending.len(),
        rows.now_playing.len(),
        rows.popular_series.len(),
    ];

    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.home.selected_row = app.home.selected_row.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.home.selected_row = (app.home.selected_row + 1).min(lens.len() - 1);
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.home.selected_col = app.home.selected_col.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            let max = lens[app.home.selected_row].saturating_sub(1);
            app.home.selected_col = (app.home.selected_col + 1).min(max);
        }
        KeyCode::Enter => {
            if let Some(item) = app.selected_item() {
                let (media, id) = (item.media_type(), item.id());
                open_detail(app, media, id, tx);
            }
        }
        KeyCode::Char('r') => {
            if !app.home.loading {
                app.home.loading = true;
                tasks::spawn_home(app.client.clone(), tx.clone());
            }
        }
        _ => {}
    }
    // Row changes can land on a shorter row
    let max = lens[app.home.selected_row].saturating_sub(1);
    app.home.selected_col = app.home.selected_col.min(max);
}

// ============================================================================
// Browse view
// ============================================================================

fn handle_browse_key(app: &mut App, media: MediaType, code: KeyCode, tx: &mpsc::Sender<AppEvent>) {
    let len = app.controller(media).items().len();
    let selected = app.grid_selected(media);

    // Only cursor movement can approach the end of the grid, so only
    // the navigation arms check whether the next page is due.
    match code {
        KeyCode::Left | KeyCode::Char('h') => {
            app.set_grid_selected(media, selected.saturating_sub(1));
            maybe_load_more(app, media, tx);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if len > 0 {
                app.set_grid_selected(media, (selected + 1).min(len - 1));
            }
            maybe_load_more(app, media, tx);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.set_grid_selected(media, selected.saturating_sub(GRID_COLS));
            maybe_load_more(app, media, tx);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if len > 0 {
                app.set_grid_selected(media, (selected + GRID_COLS).min(len - 1));
            }
            maybe_load_more(app, media, tx);
        }
        KeyCode::Enter => {
            if let Some(item) = app.selected_item() {
                let (item_media, id) = (item.media_type(), item.id());
                open_detail(app, item_media, id, tx);
            }
        }
        KeyCode::Char('f') => {
            app.show_filter = true;
            app.filter_selected = current_filter_index(app, media);
        }
        KeyCode::Char('r') => retry_browse(app, media, tx),
        KeyCode::Esc => enter_home(app, tx),
        _ => {}
    }
}

/// Level-triggered near-end check after every navigation.
fn maybe_load_more(app: &mut App, media: MediaType, tx: &mpsc::Sender<AppEvent>) {
    let len = app.controller(media).items().len();
    if len == 0 {
        return;
    }
    let near_end = app.grid_selected(media) + NEAR_END_ROWS * GRID_COLS >= len;
    if !near_end {
        return;
    }
    if let Some(request) = app.controller_mut(media).notify_near_end() {
        tasks::spawn_page(app.client.clone(), request, tx.clone());
    }
}

fn retry_browse(app: &mut App, media: MediaType, tx: &mpsc::Sender<AppEvent>) {
    let view = app.controller(media).view();
    if view.error.is_none() {
        return;
    }
    let request = if view.items.is_empty() {
        // Initial load failed: reload page 1
        Some(app.controller_mut(media).start())
    } else {
        // Load-more failed: the controller re-requests the same page
        app.controller_mut(media).notify_near_end()
    };
    if let Some(request) = request {
        tasks::spawn_page(app.client.clone(), request, tx.clone());
    }
}

fn current_filter_index(app: &App, media: MediaType) -> usize {
    match app.controller(media).filter() {
        GenreFilter::All => 0,
        GenreFilter::Genre(code) => app
            .resolver
            .selectable(media)
            .iter()
            .position(|&(id, _)| id == code)
            .map(|i| i + 1) // slot 0 is "All Genres"
            .unwrap_or(0),
    }
}

fn handle_filter_overlay(app: &mut App, code: KeyCode, tx: &mpsc::Sender<AppEvent>) {
    let View::Browse(media) = app.view else {
        app.show_filter = false;
        return;
    };
    let genres = app.resolver.selectable(media);
    let count = genres.len() + 1; // plus "All Genres"

    match code {
        KeyCode::Esc | KeyCode::Char('f') => app.show_filter = false,
        KeyCode::Up | KeyCode::Char('k') => {
            app.filter_selected = app.filter_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.filter_selected = (app.filter_selected + 1).min(count - 1);
        }
        KeyCode::Enter => {
            // The list can shrink while the overlay is open (a fetched
            // taxonomy replacing the builtin table), so the cursor may
            // point past the end; treat that as "All Genres".
            let filter = if app.filter_selected == 0 {
                GenreFilter::All
            } else {
                genres
                    .get(app.filter_selected - 1)
                    .map(|&(code, _)| GenreFilter::Genre(code))
                    .unwrap_or(GenreFilter::All)
            };
            app.show_filter = false;
            if filter != app.controller(media).filter() {
                app.set_grid_selected(media, 0);
                let request = app.controller_mut(media).set_filter(filter);
                tasks::spawn_page(app.client.clone(), request, tx.clone());
            }
        }
        _ => {}
    }
}

// ============================================================================
// Detail view
// ============================================================================

fn handle_detail_key(app: &mut App, code: KeyCode, tx: &mpsc::Sender<AppEvent>) {
    match code {
        KeyCode::Esc | KeyCode::Backspace => app.close_detail(),
        KeyCode::Tab => {
            app.detail_tab = app.detail_tab.next();
            app.detail_scroll = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::Char('r') => {
            if let DetailState::Failed { media, id, .. } = app.detail {
                open_detail(app, media, id, tx);
            }
        }
        _ => {}
    }
}

// ============================================================================
// Shared
// ============================================================================

fn open_detail(app: &mut App, media: MediaType, id: u64, tx: &mpsc::Sender<AppEvent>) {
    let cached = app.open_detail(media, id);
    if !cached {
        tasks::spawn_detail(
            app.client.clone(),
            media,
            id,
            app.region.clone(),
            app.detail_generation,
            tx.clone(),
        );
    }
}

fn open_in_browser(app: &mut App) {
    let url = match (&app.view, &app.detail) {
        (View::Detail, DetailState::Ready(bundle)) => Some(bundle.detail.web_url()),
        (View::Detail, _) => None,
        _ => app.selected_item().map(|item| item.web_url()),
    };
    let Some(url) = url else { return };
    match open::that(&url) {
        Ok(()) => app.set_status("Opened in browser"),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to open browser");
            app.set_status("Failed to open browser");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogClient, CatalogItem, MovieSummary, Page};
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

    fn loaded_app(items: usize, total_pages: u32) -> App {
        let mut app = test_app();
        app.view = View::Browse(MediaType::Movie);
        let request = app.movies.set_filter(GenreFilter::All);
        app.movies.apply_page(
            &request,
            Ok(Page {
                items: (0..items as u64).map(movie).collect(),
                total_pages,
            }),
        );
        app
    }

    #[tokio::test]
    async fn navigation_near_end_requests_next_page_once() {
        let mut app = loaded_app(20, 3);
        let (tx, mut rx) = mpsc::channel(8);
        app.set_grid_selected(MediaType::Movie, 15);

        // Repeated navigation at the grid's end: the level-triggered
        // signal fires each time, but only one fetch is spawned.
        for _ in 0..5 {
            handle_input(&mut app, KeyCode::Down, KeyModifiers::NONE, &tx).unwrap();
        }
        assert!(app.movies.view().is_loading_more);

        // Exactly one PageLoaded arrives
        let first = rx.recv().await;
        assert!(matches!(first, Some(AppEvent::PageLoaded { request, .. }) if request.page == 2));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn navigation_far_from_end_does_not_fetch() {
        let mut app = loaded_app(20, 3);
        let (tx, mut rx) = mpsc::channel(8);
        app.set_grid_selected(MediaType::Movie, 0);

        handle_input(&mut app, KeyCode::Right, KeyModifiers::NONE, &tx).unwrap();
        assert!(!app.movies.view().is_loading_more);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn quit_keys() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel(8);
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('q'), KeyModifiers::NONE, &tx).unwrap(),
            Action::Quit
        ));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, &tx).unwrap(),
            Action::Quit
        ));
    }

    #[tokio::test]
    async fn filter_overlay_selection_resets_grid() {
        let mut app = loaded_app(20, 3);
        let (tx, mut rx) = mpsc::channel(8);
        app.set_grid_selected(MediaType::Movie, 12);

        handle_input(&mut app, KeyCode::Char('f'), KeyModifiers::NONE, &tx).unwrap();
        assert!(app.show_filter);

        // Move off "All Genres" and pick the first genre
        handle_input(&mut app, KeyCode::Down, KeyModifiers::NONE, &tx).unwrap();
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE, &tx).unwrap();

        assert!(!app.show_filter);
        assert_eq!(app.grid_selected(MediaType::Movie), 0);
        assert!(app.movies.view().is_initial_loading);
        assert!(matches!(
            app.movies.view().filter,
            GenreFilter::Genre(_)
        ));
        let event = rx.recv().await;
        assert!(matches!(event, Some(AppEvent::PageLoaded { request, .. }) if request.page == 1));
    }

    #[tokio::test]
    async fn shrunken_genre_list_falls_back_to_all() {
        use crate::catalog::Genre;

        let mut app = loaded_app(20, 3);
        let (tx, mut rx) = mpsc::channel(8);

        // Open the overlay against the builtin table and move the
        // cursor to its last entry.
        handle_input(&mut app, KeyCode::Char('f'), KeyModifiers::NONE, &tx).unwrap();
        let count = app.resolver.selectable(MediaType::Movie).len();
        for _ in 0..count {
            handle_input(&mut app, KeyCode::Down, KeyModifiers::NONE, &tx).unwrap();
        }
        assert_eq!(app.filter_selected, count);

        // A fetched taxonomy with a single genre replaces the table
        // while the overlay is still open.
        app.resolver.apply(
            MediaType::Movie,
            vec![Genre {
                id: 28,
                name: "Action".to_string(),
            }],
        );

        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE, &tx).unwrap();
        assert!(!app.show_filter);
        // The stale cursor resolves to "All Genres", which is already
        // active, so nothing is fetched.
        assert_eq!(app.movies.view().filter, GenreFilter::All);
        assert_eq!(app.movies.items().len(), 20);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn non_navigation_keys_near_end_do_not_fetch() {
        let mut app = loaded_app(20, 3);
        let (tx, mut rx) = mpsc::channel(8);
        app.set_grid_selected(MediaType::Movie, 19);

        // 'f' near the grid's end opens the overlay without spawning
        // a page fetch.
        handle_input(&mut app, KeyCode::Char('f'), KeyModifiers::NONE, &tx).unwrap();
        assert!(app.show_filter);
        assert!(!app.movies.view().is_loading_more);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn reselecting_same_filter_is_a_noop() {
        let mut app = loaded_app(20, 3);
        let (tx, mut rx) = mpsc::channel(8);

        handle_input(&mut app, KeyCode::Char('f'), KeyModifiers::NONE, &tx).unwrap();
        // "All Genres" is already active
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE, &tx).unwrap();
        assert!(!app.show_filter);
        assert_eq!(app.movies.items().len(), 20);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn help_overlay_swallows_next_key() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel(8);
        handle_input(&mut app, KeyCode::Char('?'), KeyModifiers::NONE, &tx).unwrap();
        assert!(app.show_help);
        // Even 'q' only dismisses the overlay
        let action = handle_input(&mut app, KeyCode::Char('q'), KeyModifiers::NONE, &tx).unwrap();
        assert!(matches!(action, Action::Continue));
        assert!(!app.show_help);
    }
}
