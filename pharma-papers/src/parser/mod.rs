//! EFetch XML parsing into [`Paper`] records
//!
//! The parser is tolerant by design: a malformed document is an error, but
//! each `<PubmedArticle>` inside a well-formed document is converted
//! independently, and records that fail validation are logged and skipped.
//!
//! # Module Organization
//!
//! - `xml_types` - serde deserialization types for the EFetch schema plus
//!   the per-record conversion
//! - `extractors` - per-field extraction helpers (names, dates, emails)

mod extractors;
mod xml_types;

use std::sync::OnceLock;

use quick_xml::de::from_str;
use regex::Regex;
use tracing::{debug, instrument, warn};

use crate::error::{PapersError, Result};
use crate::models::Paper;
use xml_types::PubmedArticleSet;

/// Parse every record in an EFetch XML response
///
/// Returns all successfully converted records; records that fail conversion
/// (no PMID, blank title, …) are logged at warning level and skipped. A
/// record with zero extractable authors is still valid.
///
/// # Errors
///
/// Returns an error only when the document as a whole cannot be
/// deserialized.
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_papers_from_xml(xml: &str) -> Result<Vec<Paper>> {
    let cleaned = strip_inline_html_tags(xml);

    let article_set: PubmedArticleSet = from_str(&cleaned)
        .map_err(|e| PapersError::XmlError(format!("failed to deserialize EFetch response: {e}")))?;

    let papers: Vec<Paper> = article_set
        .articles
        .into_iter()
        .filter_map(|record| {
            let pmid = record
                .medline_citation
                .pmid
                .as_ref()
                .map(|p| p.value.clone())
                .unwrap_or_default();
            match record.into_paper() {
                Ok(paper) => Some(paper),
                Err(error) => {
                    warn!(%pmid, %error, "skipping record that failed conversion");
                    None
                }
            }
        })
        .collect();

    Ok(papers)
}

/// Parse the record for one PMID out of an EFetch XML response
///
/// Returns `Ok(None)` when the response holds no parseable record for that
/// id; the caller logs and skips it.
pub fn parse_paper_from_xml(xml: &str, pmid: &str) -> Result<Option<Paper>> {
    let papers = parse_papers_from_xml(xml)?;
    Ok(papers.into_iter().find(|paper| paper.pmid() == pmid))
}

/// Strip inline HTML formatting tags before deserialization
///
/// Titles and author lists can contain `<i>`, `<sup>`, `<sub>` and friends,
/// which break quick-xml's serde mapping of element text.
fn strip_inline_html_tags(xml: &str) -> String {
    static INLINE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = INLINE_TAG_REGEX.get_or_init(|| {
        Regex::new(r"</?(?:i|b|u|sup|sub|em|strong|italic|bold)>")
            .expect("Failed to compile inline tag regex")
    });

    let cleaned = re.replace_all(xml, "");
    if cleaned.len() != xml.len() {
        debug!(
            removed_bytes = xml.len() - cleaned.len(),
            "stripped inline formatting tags"
        );
    }

    cleaned.into_owned()
}
