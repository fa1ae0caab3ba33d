//! Spawning background fetch tasks.
//!
//! Every fetch runs as a detached tokio task and reports back through
//! the `AppEvent` channel; the event loop owns all state mutation.
//! Nothing here blocks the UI.

use crate::app::AppEvent;
use crate::browse::PageRequest;
use crate::catalog::{CatalogClient, MediaType};
use tokio::sync::mpsc;

/// Fetch the home carousel rows.
pub fn spawn_home(client: CatalogClient, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let result = client.home_rows().await;
        if tx.send(AppEvent::HomeLoaded(result)).await.is_err() {
            tracing::warn!("Failed to send home rows (receiver dropped)");
        }
    });
}

/// Fetch the genre taxonomy for one media type.
///
/// Callers must hold the resolver's load claim (`begin_load` returned
/// true) so concurrent calls share one request.
pub fn spawn_genres(client: CatalogClient, media: MediaType, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let result = client.genre_list(media).await;
        let event = AppEvent::GenresLoaded { media, result };
        if tx.send(event).await.is_err() {
            tracing::warn!(media = %media, "Failed to send genre taxonomy (receiver dropped)");
        }
    });
}

/// Fetch one browse grid page described by a controller request.
pub fn spawn_page(client: CatalogClient, request: PageRequest, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let result = client
            .list_page(request.media, request.page, request.filter)
            .await;
        let event = AppEvent::PageLoaded { request, result };
        if tx.send(event).await.is_err() {
            tracing::warn!(page = request.page, "Failed to send page result (receiver dropped)");
        }
    });
}

/// Fetch a detail bundle. `generation` lets the event handler drop the
/// result if the user has navigated away in the meantime.
pub fn spawn_detail(
    client: CatalogClient,
    media: MediaType,
    id: u64,
    region: String,
    generation: u64,
    tx: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        let result = client
            .detail_bundle(media, id, &region)
            .await
            .map(Box::new);
        let event = AppEvent::DetailLoaded { generation, result };
        if tx.send(event).await.is_err() {
            tracing::warn!(id = id, "Failed to send detail bundle (receiver dropped)");
        }
    });
}
