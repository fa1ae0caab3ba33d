//! Detail bundle assembly.
//!
//! A detail page is built from seven independent resources. They are
//! issued concurrently (fire-and-join) and the bundle waits for all of
//! them to settle. The core detail record failing fails the bundle;
//! every auxiliary resource degrades to an empty collection through the
//! same [`or_empty`] policy so one dead endpoint never kills the page.

use crate::catalog::client::{CatalogClient, CatalogError};
use crate::catalog::types::{
    parse_items, CatalogItem, Credits, ImageSet, ItemDetail, MediaType, MovieDetail, RawPage,
    Review, ReviewList, SeriesDetail, Video, VideoList, WatchOffers, WatchProvidersResponse,
};

/// Everything a detail view renders, assembled from seven sub-requests.
#[derive(Debug, Clone)]
pub struct DetailBundle {
    pub detail: ItemDetail,
    pub credits: Credits,
    pub videos: Vec<Video>,
    pub images: ImageSet,
    pub similar: Vec<CatalogItem>,
    /// Offers for the configured region only.
    pub providers: WatchOffers,
    pub reviews: Vec<Review>,
}

impl CatalogClient {
    /// Fetch the full detail bundle for one item.
    ///
    /// Fails only if the core `/{media}/{id}` request fails (a 404
    /// surfaces as [`CatalogError::NotFound`]). The other six resources
    /// degrade to empty on failure.
    pub async fn detail_bundle(
        &self,
        media: MediaType,
        id: u64,
        region: &str,
    ) -> Result<DetailBundle, CatalogError> {
        let seg = media.path_segment();

        // The paths must outlive the join: the futures borrow them
        // until they are polled to completion.
        let credits_path = format!("{seg}/{id}/credits");
        let videos_path = format!("{seg}/{id}/videos");
        let images_path = format!("{seg}/{id}/images");
        let providers_path = format!("{seg}/{id}/watch/providers");
        let reviews_path = format!("{seg}/{id}/reviews");

        let (detail, credits, videos, images, similar, providers, reviews) = tokio::join!(
            self.core_detail(media, id),
            self.get_json::<Credits>(&credits_path, &[]),
            self.get_json::<VideoList>(&videos_path, &[]),
            self.get_json::<ImageSet>(&images_path, &[]),
            self.similar(media, id),
            self.get_json::<WatchProvidersResponse>(&providers_path, &[]),
            self.get_json::<ReviewList>(&reviews_path, &[]),
        );

        let detail = detail?;

        let mut providers = or_empty("watch_providers", providers);
        let offers = providers.results.remove(region).unwrap_or_default();

        Ok(DetailBundle {
            detail,
            credits: or_empty("credits", credits),
            videos: or_empty("videos", videos).results,
            images: or_empty("images", images),
            similar: or_empty("similar", similar),
            providers: offers,
            reviews: or_empty("reviews", reviews).results,
        })
    }

    async fn core_detail(&self, media: MediaType, id: u64) -> Result<ItemDetail, CatalogError> {
        let path = format!("{}/{}", media.path_segment(), id);
        match media {
            MediaType::Movie => Ok(ItemDetail::Movie(
                self.get_json::<MovieDetail>(&path, &[]).await?,
            )),
            MediaType::Series => Ok(ItemDetail::Series(
                self.get_json::<SeriesDetail>(&path, &[]).await?,
            )),
        }
    }

    async fn similar(
        &self,
        media: MediaType,
        id: u64,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let path = format!("{}/{}/similar", media.path_segment(), id);
        let raw: RawPage = self.get_json(&path, &[]).await?;
        Ok(parse_items(media, raw.results))
    }
}

/// Uniform degrade policy for auxiliary detail resources.
fn or_empty<T: Default>(resource: &'static str, result: Result<T, CatalogError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(
                resource = resource,
                error = %e,
                "Auxiliary detail resource failed, substituting empty"
            );
            T::default()
        }
    }
}
