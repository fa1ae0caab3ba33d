//! Central application state and background-task events.
//!
//! `App` is owned by the event loop; background fetches run as spawned
//! tasks and deliver completions as [`AppEvent`]s over an mpsc channel,
//! so all state mutation happens on the loop's single logical thread
//! and no locks are needed. Stale results are rejected by the browse
//! controllers' filter epochs and by the detail generation counter.

use crate::browse::{BrowseController, PageRequest};
use crate::catalog::{
    CatalogClient, CatalogError, CatalogItem, DetailBundle, Genre, HomeRows, MediaType, Page,
};
use crate::config::Config;
use crate::genres::GenreResolver;
use crate::theme::{Palette, ThemeVariant};
use lru::LruCache;
use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// How many detail bundles to keep in memory. Purely an in-session
/// convenience; nothing persists across runs.
const DETAIL_CACHE_CAPACITY: usize = 32;

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(4);

// ============================================================================
// Views
// ============================================================================

/// Which screen is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Carousel rows: trending, now playing, popular series.
    Home,
    /// Infinitely-scrolling filterable grid for one media type.
    Browse(MediaType),
    /// Tabbed detail page for one item.
    Detail,
}

/// Tabs on the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Overview,
    Cast,
    Media,
    Reviews,
    Watch,
    Similar,
}

impl DetailTab {
    pub const ALL: [DetailTab; 6] = [
        Self::Overview,
        Self::Cast,
        Self::Media,
        Self::Reviews,
        Self::Watch,
        Self::Similar,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Cast,
            Self::Cast => Self::Media,
            Self::Media => Self::Reviews,
            Self::Reviews => Self::Watch,
            Self::Watch => Self::Similar,
            Self::Similar => Self::Overview,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Cast => "Cast",
            Self::Media => "Media",
            Self::Reviews => "Reviews",
            Self::Watch => "Where to Watch",
            Self::Similar => "Similar",
        }
    }
}

/// Load state of the detail view.
#[derive(Debug)]
pub enum DetailState {
    Idle,
    Loading { media: MediaType, id: u64 },
    Ready(Box<DetailBundle>),
    /// Primary detail resource failed: page-level failed state.
    Failed { media: MediaType, id: u64, error: String },
}

/// Load state of the home view.
#[derive(Debug, Default)]
pub struct HomeState {
    pub rows: Option<HomeRows>,
    pub loading: bool,
    pub error: Option<String>,
    /// Selected carousel row (0..3) and column within it.
    pub selected_row: usize,
    pub selected_col: usize,
}

// ============================================================================
// Background task events
// ============================================================================

/// Events from background fetch tasks.
pub enum AppEvent {
    /// Home carousel rows finished loading.
    HomeLoaded(Result<HomeRows, CatalogError>),
    /// Genre taxonomy finished loading for one media type.
    GenresLoaded {
        media: MediaType,
        result: Result<Vec<Genre>, CatalogError>,
    },
    /// A browse grid page finished loading. `request` echoes the
    /// controller's request so the epoch guard can validate it.
    PageLoaded {
        request: PageRequest,
        result: Result<Page<CatalogItem>, CatalogError>,
    },
    /// A detail bundle finished loading. `generation` identifies which
    /// detail navigation spawned the fetch; stale generations are
    /// dropped.
    DetailLoaded {
        generation: u64,
        result: Result<Box<DetailBundle>, CatalogError>,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
pub struct App {
    pub client: CatalogClient,
    pub region: String,

    // Theme (explicitly held; no global state)
    pub theme_variant: ThemeVariant,
    pub palette: Palette,

    // Data
    pub resolver: GenreResolver,
    pub movies: BrowseController,
    pub series: BrowseController,
    pub home: HomeState,

    // Detail view
    pub detail: DetailState,
    pub detail_tab: DetailTab,
    pub detail_scroll: u16,
    /// Bumped on every detail navigation; stale completions are dropped.
    pub detail_generation: u64,
    detail_cache: LruCache<(MediaType, u64), Box<DetailBundle>>,

    // UI state
    pub view: View,
    /// Where Esc returns to from the detail view.
    pub previous_view: View,
    pub grid_selected_movie: usize,
    pub grid_selected_series: usize,

    // Genre filter overlay
    pub show_filter: bool,
    pub filter_selected: usize,

    pub show_help: bool,
    pub needs_redraw: bool,
    pub spinner_frame: usize,

    /// Status message with expiry. Cow avoids allocation for static literals.
    pub status_message: Option<(Cow<'static, str>, Instant)>,
}

impl App {
    pub fn new(client: CatalogClient, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme in config, using dark");
            ThemeVariant::Dark
        });

        Self {
            client,
            region: config.region.clone(),
            theme_variant,
            palette: theme_variant.palette(),
            resolver: GenreResolver::new(),
            movies: BrowseController::new(MediaType::Movie),
            series: BrowseController::new(MediaType::Series),
            home: HomeState::default(),
            detail: DetailState::Idle,
            detail_tab: DetailTab::Overview,
            detail_scroll: 0,
            detail_generation: 0,
            detail_cache: LruCache::new(
                NonZeroUsize::new(DETAIL_CACHE_CAPACITY).expect("nonzero capacity"),
            ),
            view: View::Home,
            previous_view: View::Home,
            grid_selected_movie: 0,
            grid_selected_series: 0,
            show_filter: false,
            filter_selected: 0,
            show_help: false,
            needs_redraw: true,
            spinner_frame: 0,
            status_message: None,
        }
    }

    /// The browse controller for one media type.
    pub fn controller(&self, media: MediaType) -> &BrowseController {
        match media {
            MediaType::Movie => &self.movies,
            MediaType::Series => &self.series,
        }
    }

    pub fn controller_mut(&mut self, media: MediaType) -> &mut BrowseController {
        match media {
            MediaType::Movie => &mut self.movies,
            MediaType::Series => &mut self.series,
        }
    }

    /// Grid cursor position for one media type.
    pub fn grid_selected(&self, media: MediaType) -> usize {
        match media {
            MediaType::Movie => self.grid_selected_movie,
            MediaType::Series => self.grid_selected_series,
        }
    }

    pub fn set_grid_selected(&mut self, media: MediaType, index: usize) {
        match media {
            MediaType::Movie => self.grid_selected_movie = index,
            MediaType::Series => self.grid_selected_series = index,
        }
    }

    /// Currently highlighted catalog item, if any.
    pub fn selected_item(&self) -> Option<&CatalogItem> {
        match self.view {
            View::Home => {
                let rows = self.home.rows.as_ref()?;
                let row = [&rows.trending, &rows.now_playing, &rows.popular_series]
                    .into_iter()
                    .nth(self.home.selected_row)?;
                row.get(self.home.selected_col)
            }
            View::Browse(media) => self
                .controller(media)
                .items()
                .get(self.grid_selected(media)),
            View::Detail => None,
        }
    }

    /// Switch to the detail view for an item. Returns true on a cache
    /// hit; on a miss the state is set to `Loading`, the generation is
    /// bumped, and the caller must spawn the fetch.
    pub fn open_detail(&mut self, media: MediaType, id: u64) -> bool {
        self.previous_view = match self.view {
            View::Detail => self.previous_view,
            other => other,
        };
        self.view = View::Detail;
        self.detail_tab = DetailTab::Overview;
        self.detail_scroll = 0;
        self.detail_generation = self.detail_generation.wrapping_add(1);

        if let Some(bundle) = self.detail_cache.get(&(media, id)) {
            self.detail = DetailState::Ready(bundle.clone());
            return true;
        }
        self.detail = DetailState::Loading { media, id };
        false
    }

    /// Install a completed detail bundle (already generation-checked).
    pub fn install_detail(&mut self, bundle: Box<DetailBundle>) {
        let key = (bundle.detail.media_type(), bundle.detail.id());
        self.detail_cache.put(key, bundle.clone());
        self.detail = DetailState::Ready(bundle);
    }

    pub fn close_detail(&mut self) {
        self.view = self.previous_view;
        self.detail = DetailState::Idle;
    }

    /// Whether any fetch is currently in flight (drives the spinner).
    pub fn anything_loading(&self) -> bool {
        let movies = self.movies.view();
        let series = self.series.view();
        self.home.loading
            || movies.is_initial_loading
            || movies.is_loading_more
            || series.is_initial_loading
            || series.is_loading_more
            || matches!(self.detail, DetailState::Loading { .. })
    }

    pub fn cycle_theme(&mut self) -> &'static str {
        self.theme_variant = self.theme_variant.next();
        self.palette = self.theme_variant.palette();
        self.theme_variant.name()
    }

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear an expired status message. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, since)) = &self.status_message {
            if since.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
