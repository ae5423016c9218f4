use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use turbo_browse::{BrowseConfig, BrowseSession, RecordingUrlSink, ResourceStatus};
use turbo_catalog::HttpCatalogClient;
use turbo_filter::FacetKind;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn catalog_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/facets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [{"id": "c1", "name": "Tyres"}],
            "brands": [{"id": "B1", "name": "Acme"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(query_param("brand", "B1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "M1", "name": "Roadster", "year": 2019},
            {"id": "M2", "name": "Tourer", "year": 2021}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "p1", "slug": "a", "name": "A", "price": "10.00"},
                {"id": "p2", "slug": "b", "name": "B", "price": "12.50"},
                {"id": "p1", "slug": "a", "name": "A", "price": "10.00"}
            ],
            "totalCount": 40,
            "totalPages": 4
        })))
        .mount(&server)
        .await;
    server
}

fn fast_config(base_url: String) -> BrowseConfig {
    let mut config = BrowseConfig::default();
    config.catalog.base_url = base_url;
    config.debounce.url_ms = 20;
    config.debounce.search_ms = 20;
    config
}

#[tokio::test]
async fn browses_a_live_catalog() {
    let server = catalog_server().await;
    let config = fast_config(server.uri());
    let client = HttpCatalogClient::new(&config.catalog.base_url)
        .unwrap()
        .with_policy(config.catalog.fetch_policy())
        .unwrap();
    let sink = Arc::new(RecordingUrlSink::new());

    let session = BrowseSession::builder(Arc::new(client))
        .with_config(config)
        .with_url_sink(sink.clone())
        .open("/shop?brand=B1&page=3")
        .await;

    assert_eq!(session.status(), ResourceStatus::Settled);
    assert_eq!(session.models()[1].label(), "Tourer (2021)");
    let display = session.display().unwrap();
    assert_eq!(display.products.len(), 2);
    assert_eq!(display.pagination.total_pages, 4);

    session.select_facet(FacetKind::Model, "M2").await;
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(session.state().page, 1);
    assert_eq!(sink.current().as_deref(), Some("?brand=B1&model=M2"));
}

#[tokio::test]
async fn degrades_when_catalog_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = HttpCatalogClient::new(server.uri()).unwrap();
    let session = BrowseSession::builder(Arc::new(client))
        .with_config(fast_config(server.uri()))
        .open("?brand=B1")
        .await;

    assert!(session.facets().is_empty());
    assert!(session.models().is_empty());
    assert!(session.status().is_error());
    assert!(session.display().is_none());
}
