//! PubMed article document model
//!
//! Each type is built from the XML subtree rooted at its own tag through
//! [`FromXml`](crate::xml::FromXml). Children are looked up by tag name, so
//! element order in the source does not matter, and unknown elements are
//! ignored. Missing required elements and unknown enumerated attribute values
//! fail with [`PubMedError::SchemaViolation`](crate::error::PubMedError).
//!
//! Free text is the flattened descendant text of its element, so inline
//! markup like `<i>` or `<sup>` does not split titles and abstracts.

mod article;
mod article_set;
mod author;
mod citation;
mod dates;
mod einfo;
mod identifiers;
mod journal;
mod mesh;
mod pubmed_data;

pub use article::{
    Abstract, AbstractText, Article, ArticleLocation, DataBank, Grant, OtherAbstract,
    PublicationType,
};
pub use article_set::{PubmedArticle, PubmedArticleSet, XmlInfo};
pub(crate) use article_set::{article_nodes, parse_indexed, set_root};
pub use author::{Author, AuthorName, Investigator, PersonalNameSubject};
pub use citation::{CommentsCorrections, GeneralNote, MedlineCitation};
pub use dates::{ArticleDate, Date, PubDate, PubMedPubDate};
pub use einfo::{DatabaseInfo, FieldInfo, LinkInfo};
pub use identifiers::{
    AffiliationInfo, ArticleId, ArticleIdType, ArticleIds, ELocationId, ELocationIdType,
    Identifier, OtherId,
};
pub use journal::{Journal, JournalIssue, MedlineJournalInfo, Pagination};
pub use mesh::{Chemical, Keyword, KeywordList, MeshHeading, QualifierName, SupplMeshName};
pub use pubmed_data::{ArticleObject, ObjectParam, PubmedData, Reference, ReferenceList};
