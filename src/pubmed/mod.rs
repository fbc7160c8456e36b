//! PubMed E-utilities client, document model and response parsers
//!
//! The [`client`] module talks to the service; everything else here is pure
//! parsing and can be used on stored responses without a client.

pub mod citmatch;
pub mod client;
pub mod idmap;
pub mod models;
pub mod parser;
pub mod responses;

// Re-export public types
pub use citmatch::{CitationMatchResult, CitationMatcherEntry, MatchOutcome, fix_author_name};
pub use client::{
    HttpMethod, PubMedClient, QUERY_LOG_CAPACITY, QueryRecord, RawResponse, RequestSpec,
};
pub use idmap::{IdLookup, IdType, align_to_request};
pub use models::*;
pub use parser::{parse_article_results, parse_article_set};
pub use responses::{
    DocumentSummary, ResponseHeader, SearchErrors, SearchResult, SearchWarnings, SummaryArticleId,
    SummaryAuthor, SummaryHistory, SummaryResult, TermSet, Translation, TranslationStackEntry,
};
