//! Catalog access: TMDB client, wire/domain types, and detail bundles.

mod client;
mod detail;
mod types;

pub use client::{CatalogClient, CatalogError, HomeRows, DEFAULT_BASE_URL};
pub use detail::DetailBundle;
pub use types::{
    CastMember, CatalogItem, Credits, CrewMember, Genre, GenreFilter, ImageInfo, ImageSet,
    ItemDetail, MediaType, MovieDetail, MovieSummary, Page, Provider, Review, SeriesDetail,
    SeriesSummary, Video, WatchOffers,
};
