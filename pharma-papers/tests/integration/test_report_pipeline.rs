//! End-to-end pipeline tests: mocked search and fetch through to the CSV
//! report on disk.

use pharma_papers::{ClientConfig, PubMedClient, build_rows, filter_papers, write_csv};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ESEARCH_TWO_IDS: &str = r#"{
    "esearchresult": {
        "count": "2",
        "retmax": "2",
        "retstart": "0",
        "idlist": ["1001", "1002"]
    }
}"#;

/// Record 1001: one industry author with an email in the affiliation text
/// and an explicit corresponding marker.
const EFETCH_INDUSTRY_RECORD: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
    <PubmedArticle>
        <MedlineCitation>
            <PMID Version="1">1001</PMID>
            <Article>
                <Journal>
                    <Title>Test Journal</Title>
                    <JournalIssue>
                        <PubDate>
                            <Year>2024</Year>
                            <Month>Jun</Month>
                            <Day>15</Day>
                        </PubDate>
                    </JournalIssue>
                </Journal>
                <ArticleTitle>Industry-backed study</ArticleTitle>
                <AuthorList>
                    <Author>
                        <LastName>Prof</LastName>
                        <ForeName>Alice</ForeName>
                        <AffiliationInfo>
                            <Affiliation>Metropolitan University, Springfield</Affiliation>
                        </AffiliationInfo>
                    </Author>
                    <Author CorrespondingAuthorYN="Y">
                        <LastName>Dev</LastName>
                        <ForeName>Bob</ForeName>
                        <AffiliationInfo>
                            <Affiliation>Acme Therapeutics Inc, Boston, MA. bob.dev@acme.example.com</Affiliation>
                        </AffiliationInfo>
                    </Author>
                </AuthorList>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
</PubmedArticleSet>"#;

/// Record 1002: academic authors only; filtered out of the report.
const EFETCH_ACADEMIC_RECORD: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
    <PubmedArticle>
        <MedlineCitation>
            <PMID Version="1">1002</PMID>
            <Article>
                <Journal>
                    <Title>Test Journal</Title>
                    <JournalIssue>
                        <PubDate>
                            <Year>2024</Year>
                        </PubDate>
                    </JournalIssue>
                </Journal>
                <ArticleTitle>Campus-only study</ArticleTitle>
                <AuthorList>
                    <Author>
                        <LastName>Scholar</LastName>
                        <ForeName>Carol</ForeName>
                        <AffiliationInfo>
                            <Affiliation>Department of Biology, State University</Affiliation>
                        </AffiliationInfo>
                    </Author>
                </AuthorList>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
</PubmedArticleSet>"#;

fn create_test_client(base_url: &str) -> PubMedClient {
    let config = ClientConfig::new()
        .with_base_url(base_url)
        .with_rate_limit(100.0)
        .with_tool("test-client");
    PubMedClient::with_config(config)
}

#[tokio::test]
async fn test_pipeline_writes_filtered_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH_TWO_IDS))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "1001"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_INDUSTRY_RECORD))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "1002"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_ACADEMIC_RECORD))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let papers = client.collect_papers("covid vaccine", 10).await;
    assert_eq!(papers.len(), 2);

    let matching = filter_papers(papers);
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].pmid(), "1001");

    let rows = build_rows(&matching);
    assert_eq!(rows.len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.csv");
    write_csv(&report_path, &rows).unwrap();

    let contents = std::fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "PubmedID,Title,Publication Date,Non-academic Author(s),\
         Company Affiliation(s),Corresponding Author Email"
    );
    assert_eq!(
        lines[1],
        "1001,Industry-backed study,2024-06-15,Bob Dev,\
         \"Acme Therapeutics Inc, Boston, MA. bob.dev@acme.example.com\",\
         bob.dev@acme.example.com"
    );
}

#[tokio::test]
#[traced_test]
async fn test_pipeline_with_all_fetches_failing_yields_header_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH_TWO_IDS))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let papers = client.collect_papers("covid vaccine", 10).await;
    assert!(papers.is_empty());

    // Each failed fetch leaves a warning in the log.
    assert!(logs_contain("fetch failed"));

    let rows = build_rows(&filter_papers(papers));
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.csv");
    write_csv(&report_path, &rows).unwrap();

    let contents = std::fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1, "header only, no data rows");
    assert!(lines[0].starts_with("PubmedID,"));
}

#[tokio::test]
#[traced_test]
async fn test_pipeline_with_search_failure_yields_header_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let papers = client.collect_papers("covid vaccine", 10).await;

    assert!(papers.is_empty());
    assert!(logs_contain("search failed"));
}
