//! Integration tests for the scraper
//!
//! These tests use wiremock to stand in for the store directory and the
//! per-store search pages, and drive full scrape runs end-to-end.

use shelf_scout::batch::{parse_search_terms, scrape_terms, ScrapeResponse};
use shelf_scout::config::Config;
use shelf_scout::output::{open_writers, ResultSink};
use shelf_scout::{ProductRecord, Scraper, SearchTerm};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing every endpoint at the mock server
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.endpoints.store_list_url = format!("{}/api/stores", server.uri());
    config.endpoints.search_base_url = server.uri();
    config.scraper.base_delay_ms = 20;
    config.scraper.request_timeout_secs = 5;
    config
}

fn product_page(names: &[&str]) -> String {
    let cards: String = names
        .iter()
        .map(|name| {
            format!(
                r#"<div class="product-card-container">
                     <h3 class="_text_f6lbl_1 _text--m_f6lbl_23">{}</h3>
                   </div>"#,
                name
            )
        })
        .collect();
    format!("<html><body><main>{}</main></body></html>", cards)
}

async fn mount_directory(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/api/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

async fn mount_search(server: &MockServer, store_id: &str, names: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/stores/{}/search", store_id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(names)))
        .mount(server)
        .await;
}

fn milk() -> SearchTerm {
    SearchTerm::new("milk").unwrap()
}

#[tokio::test]
async fn test_two_store_milk_scenario() {
    let server = MockServer::start().await;
    mount_directory(
        &server,
        r#"[{"accountId": "A", "name": "Store A", "storeFormat": "Supermarket"},
            {"accountId": "B", "name": "Store B", "storeFormat": "Express"}]"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/stores/A/search"))
        .and(query_param("q", "milk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(&["Milk 1L"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stores/B/search"))
        .and(query_param("q", "milk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = Scraper::from_config(&create_test_config(&server)).unwrap();
    let records = scraper.scrape(&milk()).await;

    assert_eq!(
        records,
        vec![ProductRecord::new("Store A", "Supermarket", "Milk 1L")]
    );

    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"Storename": "Store A", "storeFormat": "Supermarket", "ProductName": "Milk 1L"}
        ])
    );
}

#[tokio::test]
async fn test_directory_failure_yields_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stores"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let scraper = Scraper::from_config(&create_test_config(&server)).unwrap();
    let records = scraper.scrape(&milk()).await;

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_every_store_failing_yields_empty_result() {
    let server = MockServer::start().await;
    mount_directory(
        &server,
        r#"[{"accountId": "A", "name": "Store A", "storeFormat": "Supermarket"},
            {"accountId": "B", "name": "Store B", "storeFormat": "Express"},
            {"accountId": "C", "name": "Store C", "storeFormat": "Nära"}]"#,
    )
    .await;
    // Three stores, three attempts each
    Mock::given(method("GET"))
        .and(path_regex_search())
        .respond_with(ResponseTemplate::new(503))
        .expect(9)
        .mount(&server)
        .await;

    let scraper = Scraper::from_config(&create_test_config(&server)).unwrap();
    let report = scraper
        .scrape_into(&milk(), Arc::new(ResultSink::new()))
        .await;

    assert!(report.records.is_empty());
    assert_eq!(report.stats.stores_failed, 3);
}

fn path_regex_search() -> wiremock::matchers::PathRegexMatcher {
    wiremock::matchers::path_regex(r"^/stores/[^/]+/search$")
}

#[tokio::test]
async fn test_ten_stores_capacity_five() {
    let server = MockServer::start().await;

    let stores: Vec<String> = (0..10)
        .map(|i| {
            format!(
                r#"{{"accountId": "{i}", "name": "Store {i}", "storeFormat": "Format {}"}}"#,
                i % 3
            )
        })
        .collect();
    mount_directory(&server, &format!("[{}]", stores.join(","))).await;

    for i in 0..10 {
        let name = format!("Milk from {}", i);
        Mock::given(method("GET"))
            .and(path(format!("/stores/{}/search", i)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(product_page(&[name.as_str()]))
                    .set_delay(Duration::from_millis(100)),
            )
            .mount(&server)
            .await;
    }

    let mut config = create_test_config(&server);
    config.scraper.concurrency = 5;
    let scraper = Scraper::from_config(&config).unwrap();

    let started = Instant::now();
    let records = scraper.scrape(&milk()).await;
    let elapsed = started.elapsed();

    assert_eq!(records.len(), 10);

    let stores_seen: HashSet<String> = records.iter().map(|r| r.store_name.clone()).collect();
    let expected: HashSet<String> = (0..10).map(|i| format!("Store {}", i)).collect();
    assert_eq!(stores_seen, expected);

    // Every record's name/format pair comes from the directory
    for record in &records {
        let i: usize = record.store_name["Store ".len()..].parse().unwrap();
        assert_eq!(record.store_format, format!("Format {}", i % 3));
        assert_eq!(record.product_name, format!("Milk from {}", i));
    }

    // Ten 100ms searches, five at a time, need at least two rounds
    assert!(
        elapsed >= Duration::from_millis(200),
        "searches were not bounded: {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_store_recovering_on_third_attempt() {
    let server = MockServer::start().await;
    mount_directory(
        &server,
        r#"[{"accountId": "A", "name": "Store A", "storeFormat": "Supermarket"}]"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/stores/A/search"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_search(&server, "A", &["Milk 1L", "Milk 3%"]).await;

    let mut config = create_test_config(&server);
    config.scraper.base_delay_ms = 100;
    let scraper = Scraper::from_config(&config).unwrap();

    let started = Instant::now();
    let mut records = scraper.scrape(&milk()).await;
    let elapsed = started.elapsed();

    records.sort();
    assert_eq!(
        records,
        vec![
            ProductRecord::new("Store A", "Supermarket", "Milk 1L"),
            ProductRecord::new("Store A", "Supermarket", "Milk 3%"),
        ]
    );
    assert!(elapsed >= Duration::from_millis(100 + 200));
}

#[tokio::test]
async fn test_multi_term_batch_appends_to_csv() {
    let server = MockServer::start().await;
    mount_directory(
        &server,
        r#"[{"accountId": 1, "name": "Store A", "storeFormat": "Supermarket"},
            {"accountId": 2, "name": "Store B", "storeFormat": "Express"}]"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/stores/1/search"))
        .and(query_param("q", "milk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(&["Milk 1L"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stores/2/search"))
        .and(query_param("q", "milk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(&["Milk 1L"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stores/1/search"))
        .and(query_param("q", "bread"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(&["Rye Bread"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stores/2/search"))
        .and(query_param("q", "bread"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(&[])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("results.csv");

    let mut config = create_test_config(&server);
    config.output.csv_path = Some(csv_path.display().to_string());

    let terms = parse_search_terms(Some("milk, bread")).unwrap();
    let scraper = Scraper::from_config(&config).unwrap();
    let writer = open_writers(&config.output, "test", &terms).unwrap();

    let report = scrape_terms(&scraper, &terms, writer).await;
    let response = ScrapeResponse::completed(report.records);

    assert_eq!(response.message, "Scraping completed");
    assert_eq!(response.results.len(), 3);
    assert_eq!(report.stats.stores_total, 4);
    assert_eq!(report.stats.stores_empty, 1);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Storename", "storeFormat", "ProductName"]
    );

    let mut persisted: Vec<ProductRecord> = reader
        .deserialize::<ProductRecord>()
        .map(|r| r.unwrap())
        .collect();
    let mut returned = response.results.clone();
    persisted.sort();
    returned.sort();
    assert_eq!(persisted, returned);
}

#[tokio::test]
async fn test_repeated_names_are_not_deduplicated() {
    let server = MockServer::start().await;
    mount_directory(
        &server,
        r#"[{"accountId": "A", "name": "Store A", "storeFormat": "Supermarket"}]"#,
    )
    .await;
    mount_search(&server, "A", &["Milk 1L", "Milk 1L"]).await;

    let scraper = Scraper::from_config(&create_test_config(&server)).unwrap();
    let records = scraper.scrape(&milk()).await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0], records[1]);
}
