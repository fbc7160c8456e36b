//! EInfo against a mock server

use pubmed_entrez::{ClientConfig, PubMedClient, PubMedError};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PUBMED_INFO: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<!DOCTYPE eInfoResult PUBLIC "-//NLM//DTD einfo 20190110//EN" "https://eutils.ncbi.nlm.nih.gov/eutils/dtd/20190110/einfo.dtd">
<eInfoResult>
  <DbInfo>
    <DbName>pubmed</DbName>
    <MenuName>PubMed</MenuName>
    <Description>PubMed bibliographic record</Description>
    <DbBuild>Build-2025.01.01.05.25</DbBuild>
    <Count>37654321</Count>
    <LastUpdate>2025/01/01 05:25</LastUpdate>
    <FieldList>
      <Field>
        <Name>ALL</Name><FullName>All Fields</FullName>
        <Description>All terms from all searchable fields</Description>
        <TermCount>312345678</TermCount>
        <IsDate>N</IsDate><IsNumerical>N</IsNumerical><SingleToken>N</SingleToken>
        <Hierarchy>N</Hierarchy><IsHidden>N</IsHidden><IsTruncatable>Y</IsTruncatable>
        <IsRangable>N</IsRangable>
      </Field>
      <Field>
        <Name>PDAT</Name><FullName>Publication Date</FullName>
        <Description>Date of publication</Description>
        <IsDate>Y</IsDate><IsNumerical>N</IsNumerical><SingleToken>Y</SingleToken>
        <Hierarchy>N</Hierarchy><IsHidden>N</IsHidden><IsTruncatable>N</IsTruncatable>
        <IsRangable>Y</IsRangable>
      </Field>
    </FieldList>
    <LinkList>
      <Link>
        <Name>pubmed_pmc</Name><Menu>PMC Articles</Menu>
        <Description>Free full text articles in PMC</Description>
        <DbTo>pmc</DbTo>
      </Link>
    </LinkList>
  </DbInfo>
</eInfoResult>"#;

fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_rate_limit(100.0);

    PubMedClient::with_config(config)
}

#[tokio::test]
#[traced_test]
async fn test_database_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/einfo.fcgi"))
        .and(query_param("retmode", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "header": {"type": "einfo", "version": "0.3"},
            "einforesult": {"dblist": ["pubmed", "protein", "nuccore", "pmc"]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let databases = client.database_list().await.unwrap();

    assert_eq!(databases, vec!["pubmed", "protein", "nuccore", "pmc"]);
}

#[tokio::test]
#[traced_test]
async fn test_database_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/einfo.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("version", "2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PUBMED_INFO))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let info = client.database_info("pubmed").await.unwrap();

    assert_eq!(info.db_name, "pubmed");
    assert_eq!(info.count, Some(37_654_321));
    assert_eq!(info.fields.len(), 2);
    assert_eq!(info.links[0].db_to, "pmc");

    let all = info.field("ALL").unwrap();
    assert_eq!(all.term_count.as_deref(), Some("312345678"));
    assert!(all.is_truncatable);
    assert!(!all.is_rangeable);

    let pdat = info.field("PDAT").unwrap();
    assert!(pdat.is_date);
    assert!(pdat.is_rangeable);
    assert_eq!(pdat.term_count, None);
}

#[tokio::test]
#[traced_test]
async fn test_unknown_database() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/einfo.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="UTF-8" ?>
<eInfoResult><ERROR>Can not retrieve DbInfo for db=nosuchdb</ERROR></eInfoResult>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client.database_info("nosuchdb").await.unwrap_err();

    match err {
        PubMedError::UnknownDatabase { name } => assert_eq!(name, "nosuchdb"),
        other => panic!("expected unknown database, got {:?}", other),
    }
}

#[tokio::test]
#[traced_test]
async fn test_malformed_flag_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/einfo.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PUBMED_INFO.replacen(
            "<IsDate>Y</IsDate>",
            "<IsDate>yes</IsDate>",
            1,
        )))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client.database_info("pubmed").await.unwrap_err();

    assert!(matches!(
        err,
        PubMedError::MalformedField {
            expected: "Y or N",
            ..
        }
    ));
}
