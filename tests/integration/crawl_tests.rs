//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use mirrorline::config::{Config, ExtractorKind, HttpConfig};
use mirrorline::crawler::{crawl, CrawlRun, HttpFetcher, RunState};
use mirrorline::storage::FsStore;
use mirrorline::CrawlVariant;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a plain-http configuration pointing at the mock server
fn create_test_config(server: &MockServer, output_dir: &Path) -> Config {
    // e.g. "127.0.0.1:12345" from "http://127.0.0.1:12345"
    let domain = server
        .uri()
        .trim_start_matches("http://")
        .to_string();

    let mut config = Config::new(domain);
    config.crawl.preferred_host = String::new();
    config.crawl.preferred_protocol = "http".to_string();
    config.crawl.output_directory = output_dir.to_string_lossy().into_owned();
    config.http = HttpConfig {
        request_timeout_secs: Some(10),
        connect_timeout_secs: Some(5),
    };
    config
}

/// Directory the mock server's pages land in for `variant`
fn site_dir(run_root: &Path, server: &MockServer, variant: CrawlVariant) -> PathBuf {
    let netloc = server
        .uri()
        .trim_start_matches("http://")
        .replace('.', "_");
    run_root.join(variant.name()).join(netloc)
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="/page1">Page 1</a>
            <a href="{}/page2">Page 2</a>
            <a href="https://other.example.org/away">Away</a>
            </body></html>"#,
            base_url
        )),
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        html(r#"<html><body><a href="/">Home</a><a href="/blog/">Blog</a></body></html>"#),
    )
    .await;
    mount_page(
        &mock_server,
        "/page2",
        html(r#"<html><body><a href="/page1">Page 1</a></body></html>"#),
    )
    .await;
    mount_page(&mock_server, "/blog/", html("<html><body>Blog</body></html>")).await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, temp_dir.path());
    let run_root = temp_dir.path().join("run");

    let fetcher = HttpFetcher::new(&config.http).unwrap();
    let mut run = CrawlRun::with_output_root(&config, run_root.clone(), fetcher, FsStore::new())
        .expect("Failed to create crawl run");
    let stats = run.run().await.expect("Crawl failed");

    assert_eq!(run.state(), RunState::Done);
    assert_eq!(stats.urls_visited, 4);
    assert_eq!(stats.documents_persisted, 4);
    assert_eq!(stats.total_errors(), 0);

    let site = site_dir(&run_root, &mock_server, CrawlVariant::Default);
    let root_file = site.with_extension("html");
    assert!(root_file.exists(), "missing {}", root_file.display());
    assert!(std::fs::read_to_string(&root_file).unwrap().contains("<title>Home</title>"));
    assert!(site.join("page1.html").exists());
    assert!(site.join("page2.html").exists());
    assert!(site.join("blog.html").exists());
}

#[tokio::test]
async fn test_blocked_page_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/guarded">Guarded</a><a href="/open">Open</a>"#),
    )
    .await;
    mount_page(
        &mock_server,
        "/guarded",
        ResponseTemplate::new(403)
            .set_body_raw(
                r#"<html><script src="/cdn-cgi/challenge-platform/h/g/orchestrate/jsch/v1"></script></html>"#,
                "text/html",
            ),
    )
    .await;
    mount_page(&mock_server, "/open", html("open")).await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, temp_dir.path());
    let run_root = temp_dir.path().join("run");

    let fetcher = HttpFetcher::new(&config.http).unwrap();
    let mut run =
        CrawlRun::with_output_root(&config, run_root.clone(), fetcher, FsStore::new()).unwrap();
    let stats = run.run().await.unwrap();

    assert_eq!(stats.blocked, 1);
    let site = site_dir(&run_root, &mock_server, CrawlVariant::Default);
    assert!(!site.join("guarded.html").exists());
    assert!(site.join("open.html").exists());
}

#[tokio::test]
async fn test_errors_and_non_html_do_not_stop_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        html(
            r#"<a href="/gone">Gone</a>
               <a href="/moved">Moved</a>
               <a href="/logo.png">Logo</a>
               <a href="/last">Last</a>"#,
        ),
    )
    .await;
    mount_page(&mock_server, "/gone", ResponseTemplate::new(404)).await;
    mount_page(
        &mock_server,
        "/moved",
        ResponseTemplate::new(301).insert_header("location", "/elsewhere"),
    )
    .await;
    mount_page(
        &mock_server,
        "/logo.png",
        ResponseTemplate::new(200).set_body_raw("not really a png", "image/png"),
    )
    .await;
    mount_page(&mock_server, "/last", html("last")).await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(html("never"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, temp_dir.path());
    let run_root = temp_dir.path().join("run");

    let fetcher = HttpFetcher::new(&config.http).unwrap();
    let mut run =
        CrawlRun::with_output_root(&config, run_root.clone(), fetcher, FsStore::new()).unwrap();
    let stats = run.run().await.unwrap();

    assert_eq!(stats.unexpected_status, 2);
    assert_eq!(stats.unsupported_content, 1);
    assert_eq!(stats.documents_persisted, 2);

    let site = site_dir(&run_root, &mock_server, CrawlVariant::Default);
    assert!(!site.join("logo.png").exists());
    assert!(site.join("last.html").exists());
}

#[tokio::test]
async fn test_all_variants_with_html_extractor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href=/news?page=2&sort=new>News</a>"#))
        .expect(3)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(html("news"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, temp_dir.path());
    config.crawl.link_extractor = ExtractorKind::Html;
    config.variants.mobile_ios = true;
    config.variants.mobile_android = true;
    let run_root = temp_dir.path().join("run");

    let fetcher = HttpFetcher::new(&config.http).unwrap();
    let mut run =
        CrawlRun::with_output_root(&config, run_root.clone(), fetcher, FsStore::new()).unwrap();
    let stats = run.run().await.unwrap();

    assert_eq!(stats.urls_visited, 2);
    assert_eq!(stats.fetches, 6);

    for variant in CrawlVariant::all() {
        let site = site_dir(&run_root, &mock_server, variant);
        let page = site.join("news-page_2-sort_new.html");
        assert_eq!(std::fs::read_to_string(&page).unwrap(), "news");
    }
}

#[tokio::test]
async fn test_crawl_entry_point_creates_run_directory() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", html("<p>only page</p>")).await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, temp_dir.path());

    let stats = crawl(&config).await.expect("Crawl failed");
    assert_eq!(stats.documents_persisted, 1);

    let runs: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(runs.len(), 1);

    let site = site_dir(&runs[0], &mock_server, CrawlVariant::Default);
    assert!(site.with_extension("html").exists());
}
