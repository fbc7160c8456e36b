//! Parsing tests against stored EFetch responses
//!
//! These run without network access; every document comes from
//! `tests/integration/test_data/` or is built inline.

use std::fs;
use std::path::PathBuf;

use pubmed_entrez::PubMedError;
use pubmed_entrez::pubmed::{
    ArticleIdType, ArticleLocation, AuthorName, PubDate, parse_article_results, parse_article_set,
};
use rstest::rstest;
use tracing_test::traced_test;

fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/integration/test_data")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {}", path.display(), e))
}

fn minimal_article(pmid: &str, extra_citation: &str) -> String {
    format!(
        r#"<PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
        <PMID Version="1">{pmid}</PMID>
        <Article PubModel="Print">
            <Journal>
                <JournalIssue CitedMedium="Print"><PubDate><MedlineDate>1998 Dec-1999 Jan</MedlineDate></PubDate></JournalIssue>
            </Journal>
            <ArticleTitle>Article {pmid}</ArticleTitle>
            <Pagination><MedlinePgn>1-5</MedlinePgn></Pagination>
            <Language>eng</Language>
            <PublicationTypeList><PublicationType UI="D016428">Journal Article</PublicationType></PublicationTypeList>
        </Article>
        <MedlineJournalInfo><MedlineTA>Test J</MedlineTA></MedlineJournalInfo>
        {extra_citation}
    </MedlineCitation>
</PubmedArticle>"#
    )
}

fn wrap_set(body: &str) -> String {
    format!("<?xml version=\"1.0\" ?>\n<PubmedArticleSet>{}</PubmedArticleSet>", body)
}

#[test]
fn test_known_fields_of_fixture_record() {
    let set = parse_article_set(&load_fixture("pubmed_25186301.xml")).unwrap();
    assert_eq!(set.len(), 1);

    let article = &set.articles[0];
    assert_eq!(article.pmid(), "25186301");
    assert_eq!(
        article.title(),
        "Accurate detection of de novo and transmitted INDELs within exome-capture data using micro-assembly."
    );
    assert_eq!(article.doi(), Some("10.1093/bioinformatics/btu573"));
    assert_eq!(article.pmcid(), Some("PMC4253828"));

    let citation = &article.medline_citation;
    let journal = &citation.article.journal;
    assert_eq!(journal.issn_electronic.as_deref(), Some("1367-4811"));
    assert_eq!(journal.issn_print, None);
    assert_eq!(journal.journal_issue.pub_date.year(), Some("2014"));
    assert_eq!(
        citation.medline_journal_info.issn_linking.as_deref(),
        Some("1367-4803")
    );

    let authors: Vec<String> = citation
        .article
        .authors
        .iter()
        .map(|author| author.full_name())
        .collect();
    assert_eq!(
        authors,
        vec!["Giuseppe Narzisi", "Jason A O'Rawe", "Michael C Schatz"]
    );
    assert_eq!(citation.article.authors[2].identifiers[0].source, "ORCID");

    let mesh: Vec<(&str, bool)> = citation
        .mesh_headings
        .iter()
        .map(|heading| (heading.descriptor_name.as_str(), heading.major_topic))
        .collect();
    assert_eq!(
        mesh,
        vec![
            ("Gene Deletion", false),
            ("Humans", false),
            ("INDEL Mutation", true),
            ("Software", false),
        ]
    );
    assert!(citation.mesh_headings[3].is_major());
}

#[test]
fn test_fixture_processing_metadata() {
    let set = parse_article_set(&load_fixture("pubmed_25186301.xml")).unwrap();

    assert_eq!(set.xml_info.doc_type.as_deref(), Some("PubmedArticleSet"));
    assert_eq!(
        set.xml_info.dtd_url.as_deref(),
        Some("https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_190101.dtd")
    );

    let data = set.articles[0].pubmed_data.as_ref().unwrap();
    assert_eq!(data.publication_status, "ppublish");
    assert_eq!(data.article_ids.get(ArticleIdType::Pii), Some("btu573"));
    let pubmed_date = data.history_date("pubmed").unwrap();
    assert_eq!(pubmed_date.month, "9");
    assert_eq!(pubmed_date.hour.as_deref(), Some("6"));

    let article = &set.articles[0].medline_citation.article;
    match &article.location {
        ArticleLocation::Paginated { pagination, elocation_ids } => {
            assert_eq!(pagination.start_page.as_deref(), Some("3508"));
            assert_eq!(elocation_ids.len(), 1);
        }
        other => panic!("expected paginated location, got {:?}", other),
    }
    let abstract_section = article.abstract_section.as_ref().unwrap();
    assert_eq!(abstract_section.texts.len(), 2);
    assert_eq!(abstract_section.texts[0].label.as_deref(), Some("MOTIVATION"));
}

#[test]
fn test_parsing_twice_gives_equal_sets() {
    let xml = load_fixture("pubmed_25186301.xml");
    assert_eq!(
        parse_article_set(&xml).unwrap(),
        parse_article_set(&xml).unwrap()
    );
}

const ORDERED_RECORD: &str = r#"<PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
        <PMID Version="1">5</PMID>
        <Article PubModel="Print">
            <Journal>
                <ISSN IssnType="Print">0000-0001</ISSN>
                <JournalIssue CitedMedium="Print"><Volume>7</Volume><PubDate><Year>2001</Year></PubDate></JournalIssue>
                <Title>Test Journal</Title>
            </Journal>
            <ArticleTitle>Ordered record</ArticleTitle>
            <Pagination><MedlinePgn>1-5</MedlinePgn></Pagination>
            <Language>eng</Language>
            <PublicationTypeList><PublicationType UI="D016428">Journal Article</PublicationType></PublicationTypeList>
        </Article>
        <MedlineJournalInfo><MedlineTA>Test J</MedlineTA></MedlineJournalInfo>
    </MedlineCitation>
    <PubmedData>
        <PublicationStatus>ppublish</PublicationStatus>
        <ArticleIdList>
            <ArticleId IdType="pubmed">5</ArticleId>
            <ArticleId IdType="doi">10.1/x</ArticleId>
        </ArticleIdList>
    </PubmedData>
</PubmedArticle>"#;

const SHUFFLED_RECORD: &str = r#"<PubmedArticle>
    <FutureThing/>
    <PubmedData>
        <ArticleIdList>
            <ArticleId IdType="pubmed">5</ArticleId>
            <ArticleId IdType="doi">10.1/x</ArticleId>
        </ArticleIdList>
        <NewStatusBlock kind="test">ignored</NewStatusBlock>
        <PublicationStatus>ppublish</PublicationStatus>
    </PubmedData>
    <MedlineCitation Owner="NLM" Status="MEDLINE">
        <MedlineJournalInfo><MedlineTA>Test J</MedlineTA></MedlineJournalInfo>
        <NewElement2030><Nested>value</Nested></NewElement2030>
        <Article PubModel="Print">
            <PublicationTypeList><PublicationType UI="D016428">Journal Article</PublicationType></PublicationTypeList>
            <Language>eng</Language>
            <UnknownArticleField>x</UnknownArticleField>
            <Pagination><MedlinePgn>1-5</MedlinePgn></Pagination>
            <ArticleTitle>Ordered record</ArticleTitle>
            <Journal>
                <Title>Test Journal</Title>
                <JournalIssue CitedMedium="Print"><PubDate><Year>2001</Year></PubDate><Volume>7</Volume></JournalIssue>
                <ISSN IssnType="Print">0000-0001</ISSN>
            </Journal>
        </Article>
        <PMID Version="1">5</PMID>
    </MedlineCitation>
</PubmedArticle>"#;

#[test]
fn test_unknown_elements_and_order_do_not_change_result() {
    let ordered = parse_article_set(&wrap_set(ORDERED_RECORD)).unwrap();
    let shuffled = parse_article_set(&wrap_set(SHUFFLED_RECORD)).unwrap();

    let article = &shuffled.articles[0];
    assert_eq!(article.pmid(), "5");
    assert_eq!(article.doi(), Some("10.1/x"));
    assert_eq!(article.title(), "Ordered record");
    assert_eq!(
        article.medline_citation.article.journal.issn_print.as_deref(),
        Some("0000-0001")
    );
    assert_eq!(ordered, shuffled);
}

#[test]
fn test_medline_date_and_collective_author() {
    let extra = "";
    let body = minimal_article("100", extra).replace(
        "<Language>",
        r#"<AuthorList><Author><CollectiveName>COVID Study Group</CollectiveName></Author></AuthorList><Language>"#,
    );
    let set = parse_article_set(&wrap_set(&body)).unwrap();
    let article = &set.articles[0].medline_citation.article;

    assert_eq!(
        article.journal.journal_issue.pub_date,
        PubDate::Medline("1998 Dec-1999 Jan".to_string())
    );
    assert_eq!(
        article.authors[0].name,
        AuthorName::Collective("COVID Study Group".to_string())
    );
    assert!(set.articles[0].pubmed_data.is_none());
}

#[rstest]
#[case::missing_language("<Language>eng</Language>", "")]
#[case::unknown_issn_type(
    "<JournalIssue",
    r#"<ISSN IssnType="Linking">0000-0000</ISSN><JournalIssue"#
)]
#[case::bad_major_topic_flag(
    "</MedlineJournalInfo>",
    r#"</MedlineJournalInfo><MeshHeadingList><MeshHeading><DescriptorName MajorTopicYN="maybe">X</DescriptorName></MeshHeading></MeshHeadingList>"#
)]
fn test_strict_parse_rejects_invalid_record(#[case] from: &str, #[case] to: &str) {
    let body = minimal_article("200", "").replacen(from, to, 1);
    let err = parse_article_set(&wrap_set(&body)).unwrap_err();

    match err {
        PubMedError::Document { index, pmid, .. } => {
            assert_eq!(index, 0);
            assert_eq!(pmid.as_deref(), Some("200"));
        }
        other => panic!("expected a document error, got {:?}", other),
    }
}

#[test]
#[traced_test]
fn test_lenient_parse_keeps_good_records() {
    let broken = minimal_article("2", "").replace("<Language>eng</Language>", "");
    let xml = wrap_set(&format!(
        "{}{}{}",
        minimal_article("1", ""),
        broken,
        minimal_article("3", "")
    ));

    let results = parse_article_results(&xml).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().pmid(), "1");
    assert!(matches!(
        results[1],
        Err(PubMedError::Document { index: 1, .. })
    ));
    assert_eq!(results[2].as_ref().unwrap().pmid(), "3");

    assert!(parse_article_set(&xml).is_err());
}

#[test]
fn test_wrong_root_element() {
    let err = parse_article_set("<eSearchResult><Count>0</Count></eSearchResult>").unwrap_err();
    assert!(matches!(err, PubMedError::SchemaViolation { .. }));
}

#[test]
fn test_malformed_xml() {
    let err = parse_article_set("<PubmedArticleSet><PubmedArticle>").unwrap_err();
    assert!(matches!(err, PubMedError::XmlError(_)));
}

#[test]
fn test_empty_set() {
    let set = parse_article_set(&wrap_set("")).unwrap();
    assert!(set.is_empty());
    assert!(set.get("1").is_none());
}
