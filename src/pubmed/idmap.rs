//! Reconcile ID conversion and link responses with the caller's request order
//!
//! Neither the PMC ID converter nor ELink promises to answer in submission
//! order, and both may leave out identifiers they do not know. Every mapping
//! here is looked up per requested ID, so the output always has one entry per
//! input in the same order.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::Result;

/// Identifier kinds understood by the PMC ID converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    Pmid,
    Pmcid,
    Mid,
    Doi,
}

impl IdType {
    /// Parameter value and JSON record key for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::Pmid => "pmid",
            IdType::Pmcid => "pmcid",
            IdType::Mid => "mid",
            IdType::Doi => "doi",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping result for one requested identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdLookup {
    Found(String),
    /// The service knows the identifier but has no counterpart for it
    NotLinked,
    /// The identifier does not appear in the response at all
    Missing,
}

impl IdLookup {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            IdLookup::Found(id) => Some(id),
            IdLookup::NotLinked | IdLookup::Missing => None,
        }
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            IdLookup::Found(id) => Some(id),
            IdLookup::NotLinked | IdLookup::Missing => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, IdLookup::Found(_))
    }
}

/// Order `(source, target)` pairs by `requested`
///
/// A source that appears with no target becomes [`IdLookup::NotLinked`]; a
/// requested ID with no pair at all becomes [`IdLookup::Missing`]. When a
/// source repeats, its first pair wins.
pub fn align_to_request<I>(requested: &[String], pairs: I) -> Vec<IdLookup>
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    let mut by_source: HashMap<String, Option<String>> = HashMap::new();
    for (source, target) in pairs {
        by_source.entry(source).or_insert(target);
    }

    requested
        .iter()
        .map(|id| match by_source.get(id.trim()) {
            Some(Some(target)) => IdLookup::Found(target.clone()),
            Some(None) => IdLookup::NotLinked,
            None => IdLookup::Missing,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct IdConvResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    records: Vec<Map<String, Value>>,
}

/// String form of a JSON scalar; the converter sends PMIDs as either
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a PMC ID converter JSON body into lookups aligned to `requested`
pub(crate) fn parse_id_conversion(
    body: &str,
    requested: &[String],
    from: IdType,
    to: IdType,
) -> Result<Vec<IdLookup>> {
    let response: IdConvResponse = serde_json::from_str(body)?;

    if response.status.as_deref() == Some("error") && response.records.is_empty() {
        warn!(
            message = response.message.as_deref().unwrap_or(""),
            "ID converter rejected the request"
        );
    }

    let pairs = response.records.iter().filter_map(|record| {
        // the echoed input matches even when the converter normalizes the id
        let source = record
            .get("requested-id")
            .and_then(scalar_to_string)
            .or_else(|| record.get(from.as_str()).and_then(scalar_to_string))?;
        let target = record.get(to.as_str()).and_then(scalar_to_string);
        Some((source, target))
    });

    let lookups = align_to_request(requested, pairs);
    debug!(
        requested = requested.len(),
        found = lookups.iter().filter(|l| l.is_found()).count(),
        "Aligned ID conversion records"
    );
    Ok(lookups)
}

#[derive(Debug, Deserialize)]
struct ELinkResponse {
    #[serde(default)]
    linksets: Vec<LinkSet>,
}

#[derive(Debug, Deserialize)]
struct LinkSet {
    #[serde(default)]
    ids: Vec<Value>,
    #[serde(default)]
    linksetdbs: Vec<LinkSetDb>,
}

#[derive(Debug, Deserialize)]
struct LinkSetDb {
    #[serde(default)]
    linkname: String,
    #[serde(default)]
    links: Vec<Value>,
}

/// Parse an ELink JSON body into the first `linkname` target per requested ID
///
/// Requires one linkset per source ID, which ELink produces when every ID
/// is sent as its own `id` parameter. PMC targets get their `PMC` prefix.
pub(crate) fn parse_pmc_links(
    body: &str,
    requested: &[String],
    linkname: &str,
) -> Result<Vec<IdLookup>> {
    let response: ELinkResponse = serde_json::from_str(body)?;

    let pairs = response.linksets.iter().flat_map(|linkset| {
        let target = linkset
            .linksetdbs
            .iter()
            .find(|db| db.linkname == linkname)
            .and_then(|db| db.links.first())
            .and_then(scalar_to_string)
            .map(|uid| {
                if uid.starts_with("PMC") {
                    uid
                } else {
                    format!("PMC{}", uid)
                }
            });
        linkset
            .ids
            .iter()
            .filter_map(scalar_to_string)
            .map(move |source| (source, target.clone()))
    });

    Ok(align_to_request(requested, pairs))
}
