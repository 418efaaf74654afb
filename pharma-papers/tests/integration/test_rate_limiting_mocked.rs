//! Verifies that consecutive client requests are spaced by the configured
//! rate limit, using a mock server so no real API is hit.

use std::time::{Duration, Instant};

use pharma_papers::{ClientConfig, PubMedClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMPTY_SET: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
</PubmedArticleSet>"#;

#[tokio::test]
async fn test_consecutive_fetches_respect_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_SET))
        .expect(3)
        .mount(&mock_server)
        .await;

    // 20 req/s -> at least 50ms between consecutive requests.
    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_rate_limit(20.0);
    let client = PubMedClient::with_config(config);

    let start = Instant::now();
    for pmid in ["111", "222", "333"] {
        let result = client.fetch_paper(pmid).await.unwrap();
        assert!(result.is_none());
    }

    // Two enforced waits of 50ms each, with scheduling tolerance.
    assert!(
        start.elapsed() >= Duration::from_millis(90),
        "requests were not spaced: {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn test_rate_limit_applies_across_search_and_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"esearchresult": {"count": "1", "idlist": ["111"]}}"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_SET))
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_rate_limit(10.0);
    let client = PubMedClient::with_config(config);

    let start = Instant::now();
    let papers = client.collect_papers("genomics", 5).await;
    assert!(papers.is_empty());

    // One search plus one fetch -> one enforced 100ms gap.
    assert!(
        start.elapsed() >= Duration::from_millis(90),
        "search and fetch shared no rate limit clock: {:?}",
        start.elapsed()
    );
}
