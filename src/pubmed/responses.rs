//! Typed views over the JSON payloads of ESearch, ESummary and EInfo
//!
//! Wire structs mirror the service's JSON keys and stay private to the crate;
//! the public result types are built from them once, with counts converted to
//! integers and JSON key names mapped to Rust field names.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{PubMedError, Result};

/// `header` object shared by the JSON E-utilities responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    #[serde(rename = "type", default)]
    pub response_type: String,
    #[serde(default)]
    pub version: String,
}

// ESearch

#[derive(Debug, Deserialize)]
pub(crate) struct ESearchResponse {
    #[serde(default)]
    header: ResponseHeader,
    esearchresult: ESearchData,
}

#[derive(Debug, Deserialize)]
struct ESearchData {
    #[serde(default, rename = "ERROR")]
    error: Option<String>,
    #[serde(default)]
    count: Option<String>,
    #[serde(default)]
    retmax: Option<String>,
    #[serde(default)]
    retstart: Option<String>,
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(default)]
    querykey: Option<String>,
    #[serde(default)]
    webenv: Option<String>,
    #[serde(default)]
    querytranslation: Option<String>,
    #[serde(default)]
    translationset: Vec<Translation>,
    #[serde(default)]
    translationstack: Vec<TranslationStackEntry>,
    #[serde(default)]
    errorlist: Option<SearchErrors>,
    #[serde(default)]
    warninglist: Option<SearchWarnings>,
}

/// How one query phrase was expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSet {
    pub term: String,
    pub field: String,
    /// Kept as sent; the service reports it as a string
    pub count: String,
    pub explode: String,
}

/// Element of the postfix translation stack: a term or an operator such as `AND`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationStackEntry {
    Term(TermSet),
    Operator(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchErrors {
    #[serde(default, rename = "phrasesnotfound")]
    pub phrases_not_found: Vec<String>,
    #[serde(default, rename = "fieldsnotfound")]
    pub fields_not_found: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWarnings {
    #[serde(default, rename = "phrasesignored")]
    pub phrases_ignored: Vec<String>,
    #[serde(default, rename = "quotedphrasesnotfound")]
    pub quoted_phrases_not_found: Vec<String>,
    #[serde(default, rename = "outputmessages")]
    pub output_messages: Vec<String>,
}

/// One page of ESearch results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub header: ResponseHeader,
    /// Total number of matching records, not just this page
    pub count: u64,
    pub ret_max: u64,
    pub ret_start: u64,
    pub ids: Vec<String>,
    pub query_key: Option<String>,
    pub webenv: Option<String>,
    pub query_translation: Option<String>,
    pub translation_set: Vec<Translation>,
    pub translation_stack: Vec<TranslationStackEntry>,
    pub errors: Option<SearchErrors>,
    pub warnings: Option<SearchWarnings>,
}

impl SearchResult {
    /// Whether more results exist past this page
    pub fn has_more(&self) -> bool {
        self.ret_start + (self.ids.len() as u64) < self.count
    }
}

fn parse_count(path: &str, value: Option<&str>) -> Result<u64> {
    let value = value.ok_or_else(|| PubMedError::schema(path, "missing count field"))?;
    value
        .trim()
        .parse()
        .map_err(|_| PubMedError::MalformedField {
            path: path.to_string(),
            value: value.to_string(),
            expected: "non-negative integer",
        })
}

pub(crate) fn parse_search_response(body: &str) -> Result<SearchResult> {
    let response: ESearchResponse = serde_json::from_str(body)?;
    let data = response.esearchresult;

    if let Some(error) = data.error {
        return Err(PubMedError::schema("esearchresult/ERROR", error));
    }

    Ok(SearchResult {
        header: response.header,
        count: parse_count("esearchresult/count", data.count.as_deref())?,
        ret_max: parse_count("esearchresult/retmax", data.retmax.as_deref())?,
        ret_start: parse_count("esearchresult/retstart", data.retstart.as_deref())?,
        ids: data.idlist,
        query_key: data.querykey,
        webenv: data.webenv,
        query_translation: data.querytranslation,
        translation_set: data.translationset,
        translation_stack: data.translationstack,
        errors: data.errorlist,
        warnings: data.warninglist,
    })
}

// ESummary

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryAuthor {
    pub name: String,
    #[serde(default)]
    pub authtype: String,
    #[serde(default)]
    pub clusterid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryArticleId {
    pub idtype: String,
    #[serde(default)]
    pub idtypen: i64,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryHistory {
    pub pubstatus: String,
    pub date: String,
}

/// ESummary document; fields not listed here are kept in `extra`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub uid: String,
    #[serde(default, rename = "pubdate")]
    pub pub_date: String,
    #[serde(default, rename = "epubdate")]
    pub epub_date: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub authors: Vec<SummaryAuthor>,
    #[serde(default, rename = "lastauthor")]
    pub last_author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "sorttitle")]
    pub sort_title: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub pages: String,
    #[serde(default)]
    pub lang: Vec<String>,
    #[serde(default, rename = "nlmuniqueid")]
    pub nlm_unique_id: String,
    #[serde(default)]
    pub issn: String,
    #[serde(default)]
    pub essn: String,
    #[serde(default, rename = "pubtype")]
    pub pub_types: Vec<String>,
    #[serde(default, rename = "recordstatus")]
    pub record_status: String,
    #[serde(default, rename = "pubstatus")]
    pub pub_status: String,
    #[serde(default, rename = "articleids")]
    pub article_ids: Vec<SummaryArticleId>,
    #[serde(default)]
    pub history: Vec<SummaryHistory>,
    #[serde(default)]
    pub references: Vec<Value>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default, rename = "pmcrefcount", deserialize_with = "lenient_count")]
    pub pmc_ref_count: Option<u64>,
    #[serde(default, rename = "fulljournalname")]
    pub full_journal_name: String,
    #[serde(default, rename = "elocationid")]
    pub elocation_id: String,
    #[serde(default, rename = "doctype")]
    pub doc_type: String,
    #[serde(default, rename = "sortpubdate")]
    pub sort_pub_date: String,
    #[serde(default, rename = "sortfirstauthor")]
    pub sort_first_author: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DocumentSummary {
    /// Value of the first `articleids` entry with the given `idtype`
    pub fn article_id(&self, id_type: &str) -> Option<&str> {
        self.article_ids
            .iter()
            .find(|id| id.idtype == id_type)
            .map(|id| id.value.as_str())
    }

    pub fn doi(&self) -> Option<&str> {
        self.article_id("doi")
    }

    pub fn pmcid(&self) -> Option<&str> {
        self.article_id("pmc")
    }
}

/// The service sends `pmcrefcount` as a number, or `""` when there is none
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// ESummary result for a batch of UIDs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub header: ResponseHeader,
    pub uids: Vec<String>,
    /// Summaries in `uids` order, without the failed ones
    pub docs: Vec<DocumentSummary>,
    /// UIDs the service reported an error for
    pub failed_uids: Vec<String>,
}

impl SummaryResult {
    pub fn get(&self, uid: &str) -> Option<&DocumentSummary> {
        self.docs.iter().find(|doc| doc.uid == uid)
    }
}

#[derive(Debug, Deserialize)]
struct ESummaryResponse {
    #[serde(default)]
    header: ResponseHeader,
    #[serde(default)]
    result: Option<Map<String, Value>>,
    #[serde(default)]
    error: Option<String>,
}

pub(crate) fn parse_summary_response(body: &str) -> Result<SummaryResult> {
    let response: ESummaryResponse = serde_json::from_str(body)?;
    let mut result = match (response.result, response.error) {
        (Some(result), _) => result,
        (None, Some(error)) => return Err(PubMedError::schema("esummary/error", error)),
        (None, None) => return Err(PubMedError::schema("esummary", "missing result object")),
    };

    let uids: Vec<String> = match result.remove("uids") {
        Some(uids) => serde_json::from_value(uids)?,
        None => Vec::new(),
    };

    let mut docs = Vec::with_capacity(uids.len());
    let mut failed_uids = Vec::new();
    for uid in &uids {
        match result.remove(uid) {
            Some(doc) if doc.get("error").is_none() => docs.push(serde_json::from_value(doc)?),
            Some(doc) => {
                warn!(uid = %uid, error = %doc["error"], "ESummary reported an error for UID");
                failed_uids.push(uid.clone());
            }
            None => {
                warn!(uid = %uid, "ESummary listed UID without a document");
                failed_uids.push(uid.clone());
            }
        }
    }

    Ok(SummaryResult {
        header: response.header,
        uids,
        docs,
        failed_uids,
    })
}

// EInfo database list

#[derive(Debug, Deserialize)]
struct EInfoListResponse {
    einforesult: EInfoListResult,
}

#[derive(Debug, Deserialize)]
struct EInfoListResult {
    #[serde(default)]
    dblist: Vec<String>,
}

pub(crate) fn parse_database_list(body: &str) -> Result<Vec<String>> {
    let response: EInfoListResponse = serde_json::from_str(body)?;
    Ok(response.einforesult.dblist)
}
