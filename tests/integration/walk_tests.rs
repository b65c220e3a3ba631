//! Integration tests for the walker
//!
//! These tests use wiremock to serve sitemap documents and run the full
//! fetch, classify, flush cycle end-to-end.

use sitemap_frontier::config::{Config, HttpConfig, OutputConfig, WalkerConfig};
use sitemap_frontier::output::{OutputResult, RotatingCsvWriter, UrlSink};
use sitemap_frontier::walker::{build_http_client, fetch_sitemap, walk, FetchResult, Walker};
use sitemap_frontier::FrontierError;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Sink that keeps every flushed batch in memory
#[derive(Default)]
struct RecordingSink {
    batches: Vec<Vec<String>>,
}

impl UrlSink for RecordingSink {
    fn write_batch(&mut self, urls: &[String]) -> OutputResult<usize> {
        if !urls.is_empty() {
            self.batches.push(urls.to_vec());
        }
        Ok(urls.len())
    }

    fn files_written(&self) -> u32 {
        u32::from(!self.batches.is_empty())
    }
}

fn sitemap_index(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <sitemap><loc>{}</loc></sitemap>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sitemapindex xmlns=\"{}\">\n{}</sitemapindex>",
        NS, entries
    )
}

fn urlset(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <url><loc>{}</loc></url>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{}\">\n{}</urlset>",
        NS, entries
    )
}

fn page_urls(prefix: &str, count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| format!("https://shop.example.com/{}/{}", prefix, i))
        .collect()
}

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

/// Resolves once the mock server has seen a request for `route`
async fn wait_for_request(server: &MockServer, route: &str) {
    loop {
        let requests = server.received_requests().await.unwrap_or_default();
        if requests.iter().any(|request| request.url.path() == route) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Creates a config whose seed file and output live in `dir`
fn create_test_config(dir: &TempDir, seeds: &[String], batch_size: usize, max_lines: u64) -> Config {
    let seed_path = dir.path().join("sitemap.xml");
    std::fs::write(&seed_path, sitemap_index(seeds)).expect("Failed to write seed file");

    let mut config = Config::default();
    config.input.seed_path = seed_path.to_string_lossy().into_owned();
    config.walker = WalkerConfig {
        batch_size,
        max_lines_per_file: max_lines,
    };
    config.output = OutputConfig {
        directory: dir.path().join("out").to_string_lossy().into_owned(),
        file_prefix: "all_sitemap_urls".to_string(),
    };
    config
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read output file")
        .lines()
        .map(str::to_string)
        .collect()
}

fn output_file(dir: &TempDir, index: u32) -> std::path::PathBuf {
    dir.path()
        .join("out")
        .join(format!("all_sitemap_urls_{}.csv", index))
}

#[tokio::test]
async fn test_two_leaf_sitemaps_in_seed_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let a_urls = page_urls("a", 2);
    let b_urls = page_urls("b", 3);
    mount_xml(&mock_server, "/sitemap-a.xml", urlset(&a_urls)).await;
    mount_xml(&mock_server, "/sitemap-b.xml", urlset(&b_urls)).await;

    let dir = TempDir::new().unwrap();
    let seeds = vec![
        format!("{}/sitemap-a.xml", base_url),
        format!("{}/sitemap-b.xml", base_url),
    ];
    let config = create_test_config(&dir, &seeds, 1000, 1_000_000);

    let stats = walk(&config, &CancellationToken::new())
        .await
        .expect("Walk failed");

    let mut expected = vec!["URL".to_string()];
    expected.extend(a_urls);
    expected.extend(b_urls);
    assert_eq!(read_lines(&output_file(&dir, 1)), expected);

    assert_eq!(stats.files_written, 1);
    assert_eq!(stats.leaf_documents, 2);
    assert_eq!(stats.urls_written, 5);
    assert!(!output_file(&dir, 2).exists());
    assert!(!stats.interrupted);
}

#[tokio::test]
async fn test_nested_index_is_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let d_urls = page_urls("d", 4);
    mount_xml(
        &mock_server,
        "/sitemap-c.xml",
        sitemap_index(&[format!("{}/sitemap-d.xml", base_url)]),
    )
    .await;
    mount_xml(&mock_server, "/sitemap-d.xml", urlset(&d_urls)).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir, &[format!("{}/sitemap-c.xml", base_url)], 1000, 1_000_000);

    let stats = walk(&config, &CancellationToken::new())
        .await
        .expect("Walk failed");

    let lines = read_lines(&output_file(&dir, 1));
    assert_eq!(lines.len(), 1 + 4);
    assert_eq!(&lines[1..], &d_urls[..]);

    assert_eq!(stats.index_documents, 1);
    assert_eq!(stats.nested_sitemaps_found, 1);
    assert_eq!(stats.leaf_documents, 1);
    assert_eq!(stats.sitemaps_processed, 2);
}

#[tokio::test]
async fn test_failed_sitemap_does_not_abort_walk() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap-e.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    let f_urls = page_urls("f", 2);
    mount_xml(&mock_server, "/sitemap-f.xml", urlset(&f_urls)).await;

    let dir = TempDir::new().unwrap();
    let seeds = vec![
        format!("{}/sitemap-e.xml", base_url),
        format!("{}/sitemap-f.xml", base_url),
    ];
    let config = create_test_config(&dir, &seeds, 1000, 1_000_000);

    let stats = walk(&config, &CancellationToken::new())
        .await
        .expect("Walk failed");

    let lines = read_lines(&output_file(&dir, 1));
    assert_eq!(&lines[1..], &f_urls[..]);
    assert_eq!(stats.failed_fetches, 1);
    assert_eq!(stats.files_written, 1);
    assert!(!stats.interrupted);
}

#[tokio::test]
async fn test_server_error_and_malformed_xml_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/broken-server.xml"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    mount_xml(
        &mock_server,
        "/broken-xml.xml",
        format!("<urlset xmlns=\"{}\"><url><loc>https://x</url>", NS),
    )
    .await;
    let ok_urls = page_urls("ok", 1);
    mount_xml(&mock_server, "/ok.xml", urlset(&ok_urls)).await;

    let dir = TempDir::new().unwrap();
    let seeds = vec![
        format!("{}/broken-server.xml", base_url),
        format!("{}/broken-xml.xml", base_url),
        format!("{}/ok.xml", base_url),
    ];
    let config = create_test_config(&dir, &seeds, 1000, 1_000_000);

    let stats = walk(&config, &CancellationToken::new())
        .await
        .expect("Walk failed");

    assert_eq!(stats.failed_fetches, 1);
    // The malformed document was fetched, so it counts as an empty leaf
    assert_eq!(stats.leaf_documents, 2);
    assert_eq!(read_lines(&output_file(&dir, 1)), vec!["URL", ok_urls[0].as_str()]);
}

#[tokio::test]
async fn test_batches_flush_at_threshold() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let mut seeds = Vec::new();
    for name in ["one", "two", "three"] {
        mount_xml(
            &mock_server,
            &format!("/{}.xml", name),
            urlset(&page_urls(name, 2)),
        )
        .await;
        seeds.push(format!("{}/{}.xml", base_url, name));
    }

    let config = WalkerConfig {
        batch_size: 3,
        max_lines_per_file: 1_000_000,
    };
    let client = build_http_client(&HttpConfig::default()).unwrap();
    let mut walker = Walker::new(config, client, RecordingSink::default(), seeds);

    let stats = walker.run(&CancellationToken::new()).await.expect("Walk failed");

    // 2 buffered, then 4 >= 3 flushes, then the final flush takes the rest
    let sizes: Vec<usize> = walker.sink().batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![4, 2]);
    assert_eq!(stats.flushes, 2);
    assert_eq!(stats.urls_written, 6);
}

#[tokio::test]
async fn test_rotation_checks_after_each_flush() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let mut seeds = Vec::new();
    for name in ["p1", "p2", "p3"] {
        mount_xml(
            &mock_server,
            &format!("/{}.xml", name),
            urlset(&page_urls(name, 2)),
        )
        .await;
        seeds.push(format!("{}/{}.xml", base_url, name));
    }

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir, &seeds, 2, 3);

    let stats = walk(&config, &CancellationToken::new())
        .await
        .expect("Walk failed");

    // File 1 takes two batches (4 rows, one over the cap) before rolling over
    assert_eq!(read_lines(&output_file(&dir, 1)).len(), 1 + 4);
    assert_eq!(read_lines(&output_file(&dir, 2)).len(), 1 + 2);
    assert!(!output_file(&dir, 3).exists());
    assert_eq!(stats.files_written, 2);
}

#[tokio::test]
async fn test_duplicate_references_are_processed_twice() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(&mock_server, "/dup.xml", urlset(&page_urls("dup", 2))).await;

    let dir = TempDir::new().unwrap();
    let reference = format!("{}/dup.xml", base_url);
    let config = create_test_config(&dir, &[reference.clone(), reference], 1000, 1_000_000);

    let stats = walk(&config, &CancellationToken::new())
        .await
        .expect("Walk failed");

    assert_eq!(stats.sitemaps_processed, 2);
    assert_eq!(read_lines(&output_file(&dir, 1)).len(), 1 + 4);
}

#[tokio::test]
async fn test_stale_first_file_is_replaced() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let urls = page_urls("fresh", 1);
    mount_xml(&mock_server, "/fresh.xml", urlset(&urls)).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir, &[format!("{}/fresh.xml", base_url)], 1000, 1_000_000);

    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::write(output_file(&dir, 1), "URL\nhttps://stale.example.com/\n").unwrap();

    walk(&config, &CancellationToken::new())
        .await
        .expect("Walk failed");

    assert_eq!(read_lines(&output_file(&dir, 1)), vec!["URL", urls[0].as_str()]);
}

#[tokio::test]
async fn test_missing_seed_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.input.seed_path = dir.path().join("missing.xml").to_string_lossy().into_owned();
    config.output.directory = dir.path().join("out").to_string_lossy().into_owned();

    let result = walk(&config, &CancellationToken::new()).await;
    assert!(matches!(result, Err(FrontierError::SeedRead { .. })));
    assert!(!output_file(&dir, 1).exists());
}

#[tokio::test]
async fn test_interrupt_flushes_buffered_urls_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let buffered = page_urls("buffered", 500);
    mount_xml(&mock_server, "/first.xml", urlset(&buffered)).await;

    // Never answers within the test; the walk is cancelled while waiting on it
    Mock::given(method("GET"))
        .and(path("/slow.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(urlset(&page_urls("slow", 10)))
                .set_delay(Duration::from_secs(60)),
        )
        .mount(&mock_server)
        .await;

    let seeds = vec![
        format!("{}/first.xml", base_url),
        format!("{}/slow.xml", base_url),
        format!("{}/never-reached.xml", base_url),
    ];
    let client = build_http_client(&HttpConfig::default()).unwrap();
    let mut walker = Walker::new(WalkerConfig::default(), client, RecordingSink::default(), seeds);

    let cancel = CancellationToken::new();
    let cancel_on_slow_fetch = async {
        wait_for_request(&mock_server, "/slow.xml").await;
        cancel.cancel();
    };

    let (result, ()) = tokio::time::timeout(
        Duration::from_secs(30),
        async { tokio::join!(walker.run(&cancel), cancel_on_slow_fetch) },
    )
    .await
    .expect("Walk did not stop after cancellation");
    let stats = result.expect("Walk failed");

    assert!(stats.interrupted);
    assert_eq!(walker.sink().batches.len(), 1);
    assert_eq!(walker.sink().batches[0], buffered);
    assert_eq!(stats.urls_written, 500);
    assert_eq!(stats.files_written, 1);
    assert_eq!(walker.state().frontier.len(), 1);
    assert_eq!(walker.state().buffered(), 0);
}

#[tokio::test]
async fn test_interrupt_writes_csv_through_rotating_writer() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let buffered = page_urls("partial", 3);
    mount_xml(&mock_server, "/partial.xml", urlset(&buffered)).await;
    Mock::given(method("GET"))
        .and(path("/hang.xml"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(60)))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = OutputConfig {
        directory: dir.path().to_string_lossy().into_owned(),
        file_prefix: "all_sitemap_urls".to_string(),
    };
    let writer = RotatingCsvWriter::create(&output, 1_000_000).unwrap();
    let client = build_http_client(&HttpConfig::default()).unwrap();
    let seeds = vec![
        format!("{}/partial.xml", base_url),
        format!("{}/hang.xml", base_url),
    ];
    let mut walker = Walker::new(WalkerConfig::default(), client, writer, seeds);

    let cancel = CancellationToken::new();
    let cancel_on_hang = async {
        wait_for_request(&mock_server, "/hang.xml").await;
        cancel.cancel();
    };

    let (result, ()) = tokio::time::timeout(
        Duration::from_secs(30),
        async { tokio::join!(walker.run(&cancel), cancel_on_hang) },
    )
    .await
    .expect("Walk did not stop after cancellation");
    let stats = result.expect("Walk failed");
    assert!(stats.interrupted);

    let lines = read_lines(&dir.path().join("all_sitemap_urls_1.csv"));
    assert_eq!(lines[0], "URL");
    assert_eq!(&lines[1..], &buffered[..]);
}

#[tokio::test]
async fn test_fetch_follows_redirect_and_reports_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old-sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/sitemap-pages.xml", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_xml(
        &mock_server,
        "/sitemap-pages.xml",
        urlset(&page_urls("moved", 2)),
    )
    .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let result = fetch_sitemap(&client, &format!("{}/old-sitemap.xml", base_url)).await;

    match result {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            assert_eq!(final_url, format!("{}/sitemap-pages.xml", base_url));
            assert_eq!(status_code, 200);
            assert!(String::from_utf8_lossy(&body).contains("https://shop.example.com/moved/2"));
        }
        other => panic!("Expected a successful fetch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_summary_counts_files_with_rows_after_final_rotation() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let pages = page_urls("exact", 3);
    mount_xml(&mock_server, "/exact.xml", urlset(&pages)).await;

    let dir = TempDir::new().unwrap();
    let output = OutputConfig {
        directory: dir.path().to_string_lossy().into_owned(),
        file_prefix: "all_sitemap_urls".to_string(),
    };
    let writer = RotatingCsvWriter::create(&output, 3).unwrap();
    let client = build_http_client(&HttpConfig::default()).unwrap();
    let mut walker = Walker::new(
        WalkerConfig::default(),
        client,
        writer,
        vec![format!("{}/exact.xml", base_url)],
    );

    let stats = walker.run(&CancellationToken::new()).await.expect("Walk failed");

    // The final flush filled file 1, so the writer already points at file 2
    assert_eq!(walker.sink().state().file_index, 2);
    assert_eq!(stats.files_written, 1);
    assert_eq!(read_lines(&dir.path().join("all_sitemap_urls_1.csv")).len(), 4);
    assert!(!dir.path().join("all_sitemap_urls_2.csv").exists());
}
