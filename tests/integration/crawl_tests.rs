//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use asset_crawler::config::{Config, FetchFailurePolicy};
use asset_crawler::crawler::{Coordinator, VisitRecord};
use asset_crawler::output::save_results;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves an HTML page at `page_path` for both GET and HEAD
async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(server)
        .await;
}

/// Serves a static asset at `asset_path`
async fn mount_asset(server: &MockServer, asset_path: &str, content_type: &str) {
    Mock::given(method("HEAD"))
        .and(path(asset_path))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", content_type))
        .mount(server)
        .await;
}

fn test_config(max_pages: i64) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;
    config.http.timeout_secs = 5;
    config.http.connect_timeout_secs = 2;
    config
}

#[tokio::test]
async fn test_full_crawl_same_host() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/a">A</a><img src="/img.png"></body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/a",
        r#"<html><body><a href="/b">B</a><a href="/">Home</a></body></html>"#,
    )
    .await;
    mount_page(&mock_server, "/b", "<html><body>leaf</body></html>").await;
    mount_asset(&mock_server, "/img.png", "image/png").await;

    let records = asset_crawler::crawl(&test_config(3), &base_url)
        .await
        .expect("Crawl failed");

    assert_eq!(
        records,
        vec![
            VisitRecord::new(base_url.clone(), vec![format!("{}img.png", base_url)]),
            VisitRecord::new(format!("{}a", base_url), vec![]),
            VisitRecord::new(format!("{}b", base_url), vec![]),
        ]
    );
}

#[tokio::test]
async fn test_asset_redirect_resolved_to_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    mount_page(&mock_server, "/", r#"<img src="/old.png">"#).await;

    Mock::given(method("HEAD"))
        .and(path("/old.png"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}new.png", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_asset(&mock_server, "/new.png", "image/png").await;

    let records = asset_crawler::crawl(&test_config(1), &base_url)
        .await
        .expect("Crawl failed");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].assets, vec![format!("{}new.png", base_url)]);
}

#[tokio::test]
async fn test_page_budget_bounds_visits() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    mount_page(&mock_server, "/", r#"<a href="/p1"></a>"#).await;
    mount_page(&mock_server, "/p1", r#"<a href="/p2"></a>"#).await;
    mount_page(&mock_server, "/p2", r#"<a href="/p3"></a>"#).await;
    mount_page(&mock_server, "/p3", "").await;

    let records = asset_crawler::crawl(&test_config(2), &base_url)
        .await
        .expect("Crawl failed");

    let urls: Vec<String> = records.into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![base_url.clone(), format!("{}p1", base_url)]);
}

#[tokio::test]
async fn test_unreachable_start_yields_single_empty_record() {
    // Nothing listens on port 1
    let start = "http://127.0.0.1:1/";

    let records = asset_crawler::crawl(&test_config(5), start)
        .await
        .expect("Crawl should tolerate an unreachable start URL");

    assert_eq!(records, vec![VisitRecord::new(start, vec![])]);
}

#[tokio::test]
async fn test_start_not_found_skipped_under_skip_policy() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut config = test_config(5);
    config.crawler.fetch_failure_policy = FetchFailurePolicy::Skip;

    let records = asset_crawler::crawl(&config, &base_url)
        .await
        .expect("Crawl failed");
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_head_not_allowed_falls_back_to_get() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    mount_page(&mock_server, "/", r#"<a href="/get-only">G</a>"#).await;

    Mock::given(method("HEAD"))
        .and(path("/get-only"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/get-only"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>ok</p>", "text/html"))
        .mount(&mock_server)
        .await;

    let records = asset_crawler::crawl(&test_config(5), &base_url)
        .await
        .expect("Crawl failed");

    let urls: Vec<String> = records.into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![base_url.clone(), format!("{}get-only", base_url)]);
}

#[tokio::test]
async fn test_other_hosts_never_requested() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    mount_page(
        &mock_server,
        "/",
        &format!(r#"<a href="{}/elsewhere">x</a><img src="{}/pic.png">"#, other_server.uri(), other_server.uri()),
    )
    .await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&other_server)
        .await;

    let records = asset_crawler::crawl(&test_config(5), &base_url)
        .await
        .expect("Crawl failed");

    assert_eq!(records, vec![VisitRecord::new(base_url, vec![])]);
}

#[tokio::test]
async fn test_report_and_saved_output() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    mount_page(
        &mock_server,
        "/",
        r#"<link href="/style.css"><img src="/missing.png"><a href="/a"></a>"#,
    )
    .await;
    mount_page(&mock_server, "/a", r#"<a href="/"></a>"#).await;
    mount_asset(&mock_server, "/style.css", "text/css").await;

    Mock::given(method("HEAD"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::from_config(&test_config(5)).expect("Failed to build coordinator");
    let report = coordinator
        .crawl_with_report(&base_url, 5)
        .await
        .expect("Crawl failed");

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].assets, vec![format!("{}style.css", base_url)]);
    assert_eq!(report.probe_failures, 1);

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("results.json");
    save_results(&output_path, &report.records, true).expect("Failed to save results");

    let content = std::fs::read_to_string(&output_path).expect("Failed to read results");
    let saved: Vec<VisitRecord> = serde_json::from_str(&content).expect("Invalid JSON");
    assert_eq!(saved, report.records);
}
