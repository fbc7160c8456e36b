//! Dispatcher behaviour against a mock E-utilities server
//!
//! Covers identification parameters, HTTP failures, timeouts and the
//! recent-query log.

use std::time::Duration;

use pubmed_entrez::pubmed::{HttpMethod, QUERY_LOG_CAPACITY, RequestSpec};
use pubmed_entrez::{ClientConfig, PubMedClient, PubMedError, TransportError};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const EMPTY_SEARCH: &str = r#"{
    "header": {"type": "esearch", "version": "0.3"},
    "esearchresult": {"count": "0", "retmax": "0", "retstart": "0", "idlist": []}
}"#;

fn create_mock_client(mock_server: &MockServer, config: ClientConfig) -> PubMedClient {
    PubMedClient::with_config(
        config
            .with_base_url(mock_server.uri())
            .with_id_converter_url(format!("{}/idconv/", mock_server.uri()))
            .with_rate_limit(100.0),
    )
}

fn query_pairs(request: &Request) -> Vec<(String, String)> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn form_pairs(request: &Request) -> Vec<(String, String)> {
    let body = String::from_utf8_lossy(&request.body);
    reqwest::Url::parse(&format!("http://form.invalid/?{}", body))
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn keys(pairs: &[(String, String)]) -> Vec<&str> {
    pairs.iter().map(|(k, _)| k.as_str()).collect()
}

async fn mount_empty_search(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_SEARCH))
        .mount(mock_server)
        .await;
}

#[tokio::test]
#[traced_test]
async fn test_api_key_replaces_email_and_tool() {
    let mock_server = MockServer::start().await;
    mount_empty_search(&mock_server).await;

    let client = create_mock_client(
        &mock_server,
        ClientConfig::new()
            .with_api_key("secret-key")
            .with_email("someone@example.org"),
    );
    client.search("pubmed", "asthma", 0, 20).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let params = query_pairs(&requests[0]);
    assert!(params.contains(&("api_key".to_string(), "secret-key".to_string())));
    assert!(!keys(&params).contains(&"email"));
    assert!(!keys(&params).contains(&"tool"));
}

#[tokio::test]
#[traced_test]
async fn test_email_and_tool_without_api_key() {
    let mock_server = MockServer::start().await;
    mount_empty_search(&mock_server).await;

    let client = create_mock_client(
        &mock_server,
        ClientConfig::new()
            .with_email("someone@example.org")
            .with_tool("review-bot"),
    );
    client.search("pubmed", "asthma", 0, 20).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let params = query_pairs(&requests[0]);
    assert!(params.contains(&("email".to_string(), "someone@example.org".to_string())));
    assert!(params.contains(&("tool".to_string(), "review-bot".to_string())));
    assert!(!keys(&params).contains(&"api_key"));
}

#[tokio::test]
#[traced_test]
async fn test_id_converter_never_receives_api_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/idconv/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"status": "ok", "records": [{"pmid": "23193287", "pmcid": "PMC3531190"}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(
        &mock_server,
        ClientConfig::new()
            .with_api_key("secret-key")
            .with_email("someone@example.org"),
    );
    client.pmids_to_pmcids(&["23193287"]).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let params = form_pairs(&requests[0]);
    assert!(!keys(&params).contains(&"api_key"));
    assert!(params.contains(&("email".to_string(), "someone@example.org".to_string())));
    assert!(keys(&params).contains(&"tool"));
}

#[tokio::test]
#[traced_test]
async fn test_non_success_status_is_transport_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(429).set_body_string("API rate limit exceeded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server, ClientConfig::new());
    let err = client.search("pubmed", "asthma", 0, 20).await.unwrap_err();

    assert_eq!(err.status(), Some(429));
    match err {
        PubMedError::Transport(TransportError::Status { body, .. }) => {
            assert_eq!(body, "API rate limit exceeded");
        }
        other => panic!("expected status error, got {:?}", other),
    }

    let record = client.recent_queries().pop().unwrap();
    assert_eq!(record.status, 429);
    assert_eq!(record.parse_time, None);
}

#[tokio::test]
#[traced_test]
async fn test_server_error_body_never_reaches_parser() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server, ClientConfig::new());
    let err = client.fetch_articles(&["1"]).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
#[traced_test]
async fn test_timeout_is_reported_as_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(EMPTY_SEARCH)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = create_mock_client(
        &mock_server,
        ClientConfig::new().with_timeout(Duration::from_millis(200)),
    );
    let err = client.search("pubmed", "slow", 0, 20).await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
    assert_eq!(err.status(), None);
}

#[tokio::test]
#[traced_test]
async fn test_query_log_redacts_key_and_is_bounded() {
    let mock_server = MockServer::start().await;
    mount_empty_search(&mock_server).await;

    let client = create_mock_client(&mock_server, ClientConfig::new().with_api_key("secret-key"));
    for i in 0..(QUERY_LOG_CAPACITY + 2) {
        client
            .search("pubmed", &format!("query {}", i), 0, 20)
            .await
            .unwrap();
    }

    let records = client.recent_queries();
    assert_eq!(records.len(), QUERY_LOG_CAPACITY);

    let newest = records.last().unwrap();
    assert_eq!(newest.method, HttpMethod::Get);
    assert_eq!(newest.status, 200);
    assert!(newest.parse_time.is_some());
    assert!(
        newest
            .params
            .contains(&("api_key".to_string(), "REDACTED".to_string()))
    );
    assert!(
        newest
            .params
            .contains(&("term".to_string(), format!("query {}", QUERY_LOG_CAPACITY + 1)))
    );
    assert!(!format!("{:?}", records).contains("secret-key"));
}

#[tokio::test]
#[traced_test]
async fn test_clones_share_query_log() {
    let mock_server = MockServer::start().await;
    mount_empty_search(&mock_server).await;

    let client = create_mock_client(&mock_server, ClientConfig::new());
    let clone = client.clone();
    clone.search("pubmed", "shared", 0, 20).await.unwrap();

    assert_eq!(client.recent_queries().len(), 1);
}

#[tokio::test]
#[traced_test]
async fn test_custom_request_through_dispatch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/espell.fcgi"))
        .and(query_param("term", "asthmaa"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<eSpellResult/>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server, ClientConfig::new());
    let spec = RequestSpec::get(client.endpoint("espell.fcgi"))
        .param("db", "pubmed")
        .param("term", "asthmaa");

    let (body, tag) = client
        .dispatch(spec, |response, tag: &str| Ok((response.body, tag.to_string())), "spell")
        .await
        .unwrap();

    assert_eq!(body, "<eSpellResult/>");
    assert_eq!(tag, "spell");
}
