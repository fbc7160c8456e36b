//! # PubMed Entrez
//!
//! An async client for the NCBI E-utilities and a typed model of PubMed
//! article XML.
//!
//! ## Features
//!
//! - **E-utilities**: ESearch, EFetch, ESummary, EInfo, ELink and ECitMatch,
//!   plus the PMC ID converter
//! - **Rate limiting**: one limiter shared by every clone of a client, at 3
//!   requests per second or 10 with an API key
//! - **Document model**: strongly typed `PubmedArticleSet` records with
//!   required elements enforced
//! - **Offline parsing**: every parser works on stored responses without a
//!   client
//!
//! ## Quick Start
//!
//! ### Searching and fetching
//!
//! ```no_run
//! use pubmed_entrez::PubMedClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new();
//!
//!     let result = client.search("pubmed", "crispr cas9", 0, 10).await?;
//!     println!("{} matches, showing {}", result.count, result.ids.len());
//!
//!     let ids: Vec<&str> = result.ids.iter().map(String::as_str).collect();
//!     let set = client.fetch_articles(&ids).await?;
//!     for article in &set.articles {
//!         println!("{}: {}", article.pmid(), article.title());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Parsing stored XML
//!
//! ```
//! use pubmed_entrez::pubmed::parse_article_set;
//!
//! let xml = r#"<PubmedArticleSet>
//!   <PubmedArticle>
//!     <MedlineCitation Status="MEDLINE" Owner="NLM">
//!       <PMID Version="1">31978945</PMID>
//!       <Article PubModel="Print-Electronic">
//!         <Journal>
//!           <JournalIssue CitedMedium="Internet">
//!             <PubDate><Year>2020</Year></PubDate>
//!           </JournalIssue>
//!           <Title>The New England journal of medicine</Title>
//!         </Journal>
//!         <ArticleTitle>A Novel Coronavirus from Patients with Pneumonia in China, 2019.</ArticleTitle>
//!         <Pagination><StartPage>727</StartPage><EndPage>733</EndPage></Pagination>
//!         <Language>eng</Language>
//!         <PublicationTypeList>
//!           <PublicationType UI="D016428">Journal Article</PublicationType>
//!         </PublicationTypeList>
//!       </Article>
//!       <MedlineJournalInfo>
//!         <MedlineTA>N Engl J Med</MedlineTA>
//!         <NlmUniqueID>0255562</NlmUniqueID>
//!       </MedlineJournalInfo>
//!     </MedlineCitation>
//!   </PubmedArticle>
//! </PubmedArticleSet>"#;
//!
//! let set = parse_article_set(xml).unwrap();
//! assert_eq!(set.articles[0].pmid(), "31978945");
//! ```
//!
//! ### Configuration
//!
//! ```
//! use std::time::Duration;
//! use pubmed_entrez::{ClientConfig, PubMedClient};
//!
//! let config = ClientConfig::new()
//!     .with_email("researcher@university.edu")
//!     .with_tool("my-review-pipeline")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let client = PubMedClient::with_config(config);
//! assert_eq!(client.rate_limiter().rate(), 3.0);
//! ```

pub mod config;
pub mod error;
pub mod pubmed;
pub mod rate_limit;
pub mod time;
pub mod xml;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{PubMedError, Result, TransportError};
pub use pubmed::{PubMedClient, PubmedArticle, PubmedArticleSet};
pub use rate_limit::RateLimiter;
pub use time::{Clock, ManualClock, SystemClock};
