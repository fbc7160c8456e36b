//! ESearch, ESummary and EFetch against a mock server

use std::fs;
use std::path::PathBuf;

use pubmed_entrez::pubmed::TranslationStackEntry;
use pubmed_entrez::{ClientConfig, PubMedClient, PubMedError};
use tracing_test::traced_test;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_rate_limit(100.0);

    PubMedClient::with_config(config)
}

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/integration/test_data")
        .join(name);
    fs::read_to_string(path).unwrap()
}

#[tokio::test]
#[traced_test]
async fn test_search_parses_counts_and_translation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", "asthma"))
        .and(query_param("retstart", "20"))
        .and(query_param("retmax", "2"))
        .and(query_param("retmode", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "header": {"type": "esearch", "version": "0.3"},
            "esearchresult": {
                "count": "1523",
                "retmax": "2",
                "retstart": "20",
                "idlist": ["39123456", "39123455"],
                "translationset": [{"from": "asthma", "to": "\"asthma\"[MeSH Terms]"}],
                "translationstack": [
                    {"term": "\"asthma\"[MeSH Terms]", "field": "MeSH Terms", "count": "170000", "explode": "Y"},
                    "GROUP"
                ],
                "querytranslation": "\"asthma\"[MeSH Terms]"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client.search("pubmed", "asthma", 20, 2).await.unwrap();

    assert_eq!(result.count, 1523);
    assert_eq!(result.ret_start, 20);
    assert_eq!(result.ids, vec!["39123456", "39123455"]);
    assert_eq!(result.header.response_type, "esearch");
    assert!(result.has_more());
    assert_eq!(result.translation_set[0].from, "asthma");
    assert_eq!(
        result.translation_stack[1],
        TranslationStackEntry::Operator("GROUP".to_string())
    );
}

#[tokio::test]
#[traced_test]
async fn test_search_ids_returns_first_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("retstart", "0"))
        .and(query_param("retmax", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "esearchresult": {
                "count": "40",
                "retmax": "3",
                "retstart": "0",
                "idlist": ["3", "2", "1"]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let ids = client.search_ids("covid-19", 3).await.unwrap();
    assert_eq!(ids, vec!["3", "2", "1"]);
}

#[tokio::test]
#[traced_test]
async fn test_search_non_numeric_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "esearchresult": {"count": "many", "retmax": "0", "retstart": "0", "idlist": []}
        })))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client.search("pubmed", "asthma", 0, 20).await.unwrap_err();

    match err {
        PubMedError::MalformedField { path, value, .. } => {
            assert_eq!(path, "esearchresult/count");
            assert_eq!(value, "many");
        }
        other => panic!("expected malformed count, got {:?}", other),
    }
}

#[tokio::test]
#[traced_test]
async fn test_search_error_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "esearchresult": {"ERROR": "Invalid query"}
        })))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client.search("pubmed", "((", 0, 20).await.unwrap_err();
    assert!(matches!(err, PubMedError::SchemaViolation { .. }));
}

#[tokio::test]
#[traced_test]
async fn test_summary_separates_failed_uids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/esummary.fcgi"))
        .and(body_string_contains("id=25186301%2C0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "header": {"type": "esummary", "version": "0.3"},
            "result": {
                "uids": ["25186301", "0"],
                "25186301": {
                    "uid": "25186301",
                    "pubdate": "2014 Dec 15",
                    "source": "Bioinformatics",
                    "authors": [
                        {"name": "Narzisi G", "authtype": "Author", "clusterid": ""},
                        {"name": "Schatz MC", "authtype": "Author", "clusterid": ""}
                    ],
                    "title": "Accurate detection of de novo and transmitted INDELs within exome-capture data using micro-assembly.",
                    "volume": "30",
                    "pages": "3508-10",
                    "articleids": [
                        {"idtype": "pubmed", "idtypen": 1, "value": "25186301"},
                        {"idtype": "doi", "idtypen": 3, "value": "10.1093/bioinformatics/btu573"},
                        {"idtype": "pmc", "idtypen": 8, "value": "PMC4253828"}
                    ],
                    "pmcrefcount": "",
                    "nlmuniqueid": "9808944",
                    "availablefromurl": ""
                },
                "0": {"uid": "0", "error": "cannot get document summary"}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client.summary("pubmed", &["25186301", "0"]).await.unwrap();

    assert_eq!(result.uids, vec!["25186301", "0"]);
    assert_eq!(result.failed_uids, vec!["0"]);
    assert_eq!(result.docs.len(), 1);

    let doc = result.get("25186301").unwrap();
    assert_eq!(doc.pub_date, "2014 Dec 15");
    assert_eq!(doc.authors[1].name, "Schatz MC");
    assert_eq!(doc.doi(), Some("10.1093/bioinformatics/btu573"));
    assert_eq!(doc.pmcid(), Some("PMC4253828"));
    assert_eq!(doc.pmc_ref_count, None);
    assert!(doc.extra.contains_key("availablefromurl"));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_article_from_fixture() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/efetch.fcgi"))
        .and(body_string_contains("id=25186301"))
        .and(body_string_contains("retmode=xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixture("pubmed_25186301.xml")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let article = client.fetch_article("25186301").await.unwrap();

    assert_eq!(article.pmid(), "25186301");
    assert_eq!(article.doi(), Some("10.1093/bioinformatics/btu573"));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_article_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<?xml version=\"1.0\" ?>\n<PubmedArticleSet></PubmedArticleSet>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client.fetch_article("99999999").await.unwrap_err();

    match err {
        PubMedError::ArticleNotFound { pmid } => assert_eq!(pmid, "99999999"),
        other => panic!("expected not found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_without_ids_sends_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let set = client.fetch_articles(&[]).await.unwrap();
    assert!(set.is_empty());
}
