//! End-to-end paging flow: the browse controller driving the real
//! client against a mock server.

use flicks::browse::BrowseController;
use flicks::catalog::{CatalogClient, GenreFilter, MediaType};
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> CatalogClient {
    CatalogClient::with_base_url(SecretString::from("test-key"), "en-US", server.uri())
}

fn page_body(start_id: u64, count: u64, total_pages: u32) -> serde_json::Value {
    let results: Vec<_> = (start_id..start_id + count)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Movie {id}"),
                "overview": "",
                "genre_ids": [28],
                "vote_average": 7.0
            })
        })
        .collect();
    json!({ "results": results, "total_pages": total_pages })
}

async fn mount_page(server: &MockServer, page: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("page", page.to_string()))
        // Unfiltered pages only; a genre-filtered request must not
        // fall through to these mocks.
        .and(query_param_is_missing("with_genres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn controller_accumulates_pages_through_the_client() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(0, 20, 3)).await;
    mount_page(&server, 2, page_body(20, 20, 3)).await;
    mount_page(&server, 3, page_body(40, 12, 3)).await;

    let client = client(&server);
    let mut ctl = BrowseController::new(MediaType::Movie);

    let req = ctl.start();
    let result = client.list_page(req.media, req.page, req.filter).await;
    assert!(ctl.apply_page(&req, result));
    assert_eq!(ctl.items().len(), 20);

    let req = ctl.notify_near_end().unwrap();
    let result = client.list_page(req.media, req.page, req.filter).await;
    assert!(ctl.apply_page(&req, result));
    assert_eq!(ctl.items().len(), 40);

    let req = ctl.notify_near_end().unwrap();
    let result = client.list_page(req.media, req.page, req.filter).await;
    assert!(ctl.apply_page(&req, result));
    assert_eq!(ctl.items().len(), 52);

    // Last page reached: no further requests
    assert!(ctl.notify_near_end().is_none());
    assert!(!ctl.view().has_more);

    // Items arrived in server order with no duplicates
    let ids: Vec<u64> = ctl.items().iter().map(|i| i.id()).collect();
    assert_eq!(ids, (0..52).collect::<Vec<u64>>());
}

#[tokio::test]
async fn filter_change_mid_flight_discards_the_stale_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(0, 20, 5)).await;
    mount_page(&server, 2, page_body(20, 20, 5)).await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("with_genres", "878"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1000, 5, 1)))
        .mount(&server)
        .await;

    let client = client(&server);
    let mut ctl = BrowseController::new(MediaType::Movie);

    let req = ctl.start();
    let result = client.list_page(req.media, req.page, req.filter).await;
    ctl.apply_page(&req, result);

    // Page 2 goes out...
    let stale_req = ctl.notify_near_end().unwrap();
    let stale_result = client
        .list_page(stale_req.media, stale_req.page, stale_req.filter)
        .await;

    // ...but the user switches filters before it lands
    let fresh_req = ctl.set_filter(GenreFilter::Genre(878));
    assert!(ctl.items().is_empty());

    assert!(!ctl.apply_page(&stale_req, stale_result));
    assert!(ctl.items().is_empty());

    let fresh_result = client
        .list_page(fresh_req.media, fresh_req.page, fresh_req.filter)
        .await;
    assert!(ctl.apply_page(&fresh_req, fresh_result));
    assert_eq!(ctl.items().len(), 5);
    assert_eq!(ctl.items()[0].id(), 1000);
}

#[tokio::test]
async fn server_error_marks_retryable_without_losing_items() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(0, 20, 3)).await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut ctl = BrowseController::new(MediaType::Movie);

    let req = ctl.start();
    let result = client.list_page(req.media, req.page, req.filter).await;
    ctl.apply_page(&req, result);

    let req = ctl.notify_near_end().unwrap();
    let result = client.list_page(req.media, req.page, req.filter).await;
    assert!(ctl.apply_page(&req, result));

    let view = ctl.view();
    assert_eq!(view.items.len(), 20);
    assert!(view.error.is_some());
    assert!(!view.is_loading_more);

    // The retry re-requests page 2, not page 3
    let retry = ctl.notify_near_end().unwrap();
    assert_eq!(retry.page, 2);
}
