//! Citation matching (ECitMatch) request entries and response parsing
//!
//! ECitMatch answers one line per submitted citation:
//!
//! ```text
//! <echoed request fields>|<result token>
//! ```
//!
//! where the token is a PMID, `AMBIGUOUS` (with a citation count or a comma
//! separated PMID list), `NOT_FOUND` (optionally `;INVALID_JOURNAL`) or empty.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PubMedError, Result};

/// One citation to resolve to a PMID
///
/// Every field is optional; the service matches on whatever is given.
///
/// # Example
///
/// ```
/// use pubmed_entrez::pubmed::CitationMatcherEntry;
///
/// let entry = CitationMatcherEntry::new()
///     .with_journal("Bioinformatics")
///     .with_year("2015")
///     .with_volume("31")
///     .with_first_page("3897");
/// assert_eq!(entry.serialize(0), "Bioinformatics|2015|31|3897||key_000|");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationMatcherEntry {
    pub journal: Option<String>,
    pub year: Option<String>,
    pub volume: Option<String>,
    pub first_page: Option<String>,
    pub author: Option<String>,
    pub key: Option<String>,
}

impl CitationMatcherEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal<S: Into<String>>(mut self, journal: S) -> Self {
        self.journal = Some(journal.into());
        self
    }

    pub fn with_year<S: Into<String>>(mut self, year: S) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_volume<S: Into<String>>(mut self, volume: S) -> Self {
        self.volume = Some(volume.into());
        self
    }

    pub fn with_first_page<S: Into<String>>(mut self, first_page: S) -> Self {
        self.first_page = Some(first_page.into());
        self
    }

    /// Set the author, swapping "RA Gaunt" style names to "Gaunt RA"
    ///
    /// See [`fix_author_name`] for the exact rule.
    pub fn with_author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = Some(fix_author_name(&author.into()));
        self
    }

    /// Set the author exactly as given
    pub fn with_author_verbatim<S: Into<String>>(mut self, author: S) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Correlation key echoed back by the service
    pub fn with_key<S: Into<String>>(mut self, key: S) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Request line for this entry, `key_NNN` standing in for a missing key
    pub fn serialize(&self, index: usize) -> String {
        let default_key = format!("key_{:03}", index);
        let fields = [
            self.journal.as_deref(),
            self.year.as_deref(),
            self.volume.as_deref(),
            self.first_page.as_deref(),
            self.author.as_deref(),
            Some(self.key.as_deref().unwrap_or(&default_key)),
        ];

        let mut line = fields
            .iter()
            .map(|field| field.unwrap_or(""))
            .collect::<Vec<_>>()
            .join("|");
        line.push('|');
        line
    }
}

/// Rewrite initials-first author names to surname-first
///
/// Applies only when the name has more than 5 characters, the third is a
/// space and the first two are uppercase: `"RA Gaunt"` becomes `"Gaunt RA"`,
/// while `"Li John"` is left alone.
pub fn fix_author_name(author: &str) -> String {
    let chars: Vec<char> = author.chars().collect();
    if chars.len() > 5 && chars[2] == ' ' && chars[0].is_uppercase() && chars[1].is_uppercase() {
        let surname: String = chars[3..].iter().collect();
        let initials: String = chars[..2].iter().collect();
        format!("{} {}", surname, initials)
    } else {
        author.to_string()
    }
}

/// Request body value for a batch: one serialized entry per line
pub(crate) fn build_bdata(entries: &[CitationMatcherEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| entry.serialize(index))
        .collect::<Vec<_>>()
        .join("\r")
}

/// Classified result token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Found {
        pmid: String,
    },
    /// Several citations fit; the service gives either a count or the PMIDs
    Ambiguous {
        n_possible_matches: Option<u32>,
        possible_ids: Option<Vec<String>>,
    },
    NotFound {
        invalid_journal: bool,
    },
    /// Token in none of the known encodings; see [`CitationMatchResult::raw_line`]
    Unrecognized,
}

/// Result for one submitted [`CitationMatcherEntry`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationMatchResult {
    pub entry: CitationMatcherEntry,
    /// Full response line
    pub raw_line: String,
    /// Everything before the last `|`: the service's reading of the request
    pub interpreted_request: String,
    pub outcome: MatchOutcome,
}

impl CitationMatchResult {
    /// Classify one response line
    pub fn parse(line: &str, entry: CitationMatcherEntry) -> Self {
        let line = line.trim();
        let (interpreted_request, token) = match line.rsplit_once('|') {
            Some((request, token)) => (request, token.trim()),
            None => ("", line),
        };

        Self {
            outcome: classify_token(token, line),
            entry,
            raw_line: line.to_string(),
            interpreted_request: interpreted_request.to_string(),
        }
    }

    pub fn pmid(&self) -> Option<&str> {
        match &self.outcome {
            MatchOutcome::Found { pmid } => Some(pmid),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Found { .. })
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Ambiguous { .. })
    }

    /// Echoed request fields with the form encoding's `+` turned back into spaces
    pub fn echoed_fields(&self) -> Vec<String> {
        self.interpreted_request
            .split('|')
            .map(|field| field.replace('+', " "))
            .collect()
    }

    /// Fail with [`PubMedError::UnrecognizedMatchFormat`] for unknown tokens
    pub fn require_classified(&self) -> Result<&MatchOutcome> {
        match self.outcome {
            MatchOutcome::Unrecognized => Err(PubMedError::UnrecognizedMatchFormat {
                line: self.raw_line.clone(),
            }),
            _ => Ok(&self.outcome),
        }
    }
}

fn citation_count_regex() -> &'static Regex {
    static CITATION_COUNT: OnceLock<Regex> = OnceLock::new();
    CITATION_COUNT.get_or_init(|| {
        Regex::new(r"^\((\d+) citations?\)$").expect("Failed to compile citation count regex")
    })
}

fn classify_token(token: &str, line: &str) -> MatchOutcome {
    if token.is_empty() {
        return MatchOutcome::NotFound {
            invalid_journal: false,
        };
    }

    if token.starts_with(|c: char| c.is_ascii_digit()) {
        return MatchOutcome::Found {
            pmid: token.to_string(),
        };
    }

    if let Some(rest) = token.strip_prefix("AMBIGUOUS") {
        return classify_ambiguous(rest, line);
    }

    if token.starts_with("NOT_FOUND") {
        return MatchOutcome::NotFound {
            invalid_journal: token.contains("INVALID_JOURNAL"),
        };
    }

    warn!(line = %line, "Unrecognized citation match result");
    MatchOutcome::Unrecognized
}

/// `AMBIGUOUS` followed by nothing, a citation count or a list of PMIDs
fn classify_ambiguous(rest: &str, line: &str) -> MatchOutcome {
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        warn!(line = %line, "Unrecognized citation match result");
        return MatchOutcome::Unrecognized;
    }

    let rest = rest.trim();
    if rest.is_empty() {
        warn!(line = %line, "AMBIGUOUS citation match without count or candidates");
        return MatchOutcome::Ambiguous {
            n_possible_matches: None,
            possible_ids: None,
        };
    }

    if let Some(captures) = citation_count_regex().captures(rest) {
        return MatchOutcome::Ambiguous {
            n_possible_matches: captures[1].parse().ok(),
            possible_ids: None,
        };
    }

    let ids: Vec<&str> = rest.split(',').map(str::trim).collect();
    let all_pmids = ids
        .iter()
        .all(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()));
    if !all_pmids {
        warn!(line = %line, "Unrecognized AMBIGUOUS candidate list");
        return MatchOutcome::Unrecognized;
    }

    MatchOutcome::Ambiguous {
        n_possible_matches: u32::try_from(ids.len()).ok(),
        possible_ids: Some(ids.into_iter().map(str::to_string).collect()),
    }
}

/// Pair each response line with the entry submitted at the same position
///
/// A different number of lines than entries is a schema violation; the lines
/// cannot be attributed safely in that case.
pub(crate) fn parse_citation_matches(
    body: &str,
    entries: &[CitationMatcherEntry],
) -> Result<Vec<CitationMatchResult>> {
    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() != entries.len() {
        warn!(
            submitted = entries.len(),
            returned = lines.len(),
            "ECitMatch returned a different number of lines than submitted"
        );
        return Err(PubMedError::schema(
            "eCitMatchResult",
            format!(
                "{} citations submitted but {} result lines returned",
                entries.len(),
                lines.len()
            ),
        ));
    }

    Ok(lines
        .into_iter()
        .zip(entries.iter().cloned())
        .map(|(line, entry)| CitationMatchResult::parse(line, entry))
        .collect())
}
