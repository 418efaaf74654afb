//! serde deserialization types for the EFetch `PubmedArticleSet` schema
//!
//! Every field is optional at this layer; conversion extracts what is present
//! and validates once at [`Paper`] construction.

use serde::{Deserialize, Deserializer};

use super::extractors;
use crate::error::Result;
use crate::models::Paper;

/// Placeholder title used when a record carries no `<ArticleTitle>` node
pub(super) const MISSING_TITLE_PLACEHOLDER: &str = "[No title available]";

#[derive(Debug, Deserialize)]
pub(super) struct PubmedArticleSet {
    #[serde(rename = "PubmedArticle", default)]
    pub articles: Vec<PubmedArticleXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PubmedArticleXml {
    #[serde(rename = "MedlineCitation")]
    pub medline_citation: MedlineCitationXml,
}

#[derive(Debug, Deserialize)]
pub(super) struct MedlineCitationXml {
    #[serde(rename = "PMID")]
    pub pmid: Option<PmidXml>,
    #[serde(rename = "Article")]
    pub article: Option<ArticleXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PmidXml {
    #[serde(rename = "$text")]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ArticleXml {
    #[serde(rename = "ArticleTitle")]
    pub title: Option<String>,
    #[serde(rename = "Journal")]
    pub journal: Option<JournalXml>,
    #[serde(rename = "AuthorList")]
    pub author_list: Option<AuthorListXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct JournalXml {
    #[serde(rename = "JournalIssue")]
    pub journal_issue: Option<JournalIssueXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct JournalIssueXml {
    #[serde(rename = "PubDate")]
    pub pub_date: Option<PubDateXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PubDateXml {
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Month")]
    pub month: Option<String>,
    #[serde(rename = "Day")]
    pub day: Option<String>,
    /// Free-form date string used by some records instead of Year/Month/Day
    #[serde(rename = "MedlineDate")]
    pub medline_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorListXml {
    #[serde(rename = "Author", default)]
    pub authors: Vec<AuthorXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorXml {
    #[serde(rename = "LastName")]
    pub last_name: Option<String>,
    #[serde(rename = "ForeName")]
    pub fore_name: Option<String>,
    #[serde(rename = "CollectiveName")]
    pub collective_name: Option<String>,
    #[serde(rename = "AffiliationInfo", default)]
    pub affiliation_info: Vec<AffiliationInfoXml>,
    // The standard EFetch feed does not mark corresponding authors; this
    // attribute is honored on the rare records that carry one.
    #[serde(
        rename = "@CorrespondingAuthorYN",
        default,
        deserialize_with = "deserialize_bool_yn"
    )]
    pub is_corresponding: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct AffiliationInfoXml {
    #[serde(rename = "Affiliation")]
    pub affiliation: Option<String>,
}

impl PubmedArticleXml {
    /// Convert one record, validating required fields at construction
    pub(super) fn into_paper(self) -> Result<Paper> {
        let citation = self.medline_citation;
        let pmid = citation.pmid.map(|p| p.value).unwrap_or_default();
        let article = citation.article;

        let title = article
            .as_ref()
            .and_then(|a| a.title.clone())
            .unwrap_or_else(|| MISSING_TITLE_PLACEHOLDER.to_string());

        let pub_date = article
            .as_ref()
            .and_then(|a| a.journal.as_ref())
            .and_then(|j| j.journal_issue.as_ref())
            .and_then(|issue| issue.pub_date.as_ref());
        let publication_date = extractors::publication_date(pub_date);

        let authors = article
            .and_then(|a| a.author_list)
            .map(|list| extractors::authors(list.authors))
            .unwrap_or_default();

        Paper::new(pmid, title, publication_date, authors)
    }
}

/// Deserialize a boolean from the "Y"/"N" attribute convention
fn deserialize_bool_yn<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.is_some_and(|v| v == "Y"))
}
