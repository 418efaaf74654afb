//! Filtering and CSV report building
//!
//! A paper qualifies for the report when at least one author carries a
//! biotech/pharma-classified affiliation. Rows are serialized with the `csv`
//! crate; the header row is always written, even for an empty report.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::Paper;

/// Column names in report order
const HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Keep only papers with at least one biotech/pharma-affiliated author
///
/// Idempotent: filtering an already-filtered list returns the same list. A
/// paper with zero authors can never qualify.
pub fn filter_papers(papers: Vec<Paper>) -> Vec<Paper> {
    papers
        .into_iter()
        .filter(Paper::has_biotech_pharma_affiliation)
        .collect()
}

/// One CSV row of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_author_email: String,
}

impl ReportRow {
    /// Flatten one paper into its report row
    pub fn from_paper(paper: &Paper) -> Self {
        let non_academic = paper.non_academic_authors();

        let author_names = non_academic
            .iter()
            .map(|author| author.name())
            .collect::<Vec<_>>()
            .join("; ");

        // De-duplicated in first-seen order across the non-academic authors.
        let mut company_names: Vec<&str> = Vec::new();
        for author in &non_academic {
            for affiliation in author.affiliations() {
                if affiliation.is_biotech_pharma() && !company_names.contains(&affiliation.name()) {
                    company_names.push(affiliation.name());
                }
            }
        }

        Self {
            pubmed_id: paper.pmid().to_string(),
            title: paper.title().to_string(),
            publication_date: paper.publication_date().to_string(),
            non_academic_authors: author_names,
            company_affiliations: company_names.join("; "),
            corresponding_author_email: paper
                .corresponding_author_email()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Build report rows for a list of (already filtered) papers
pub fn build_rows(papers: &[Paper]) -> Vec<ReportRow> {
    papers.iter().map(ReportRow::from_paper).collect()
}

/// Write the report as UTF-8 CSV, header row included
pub fn write_csv(path: impl AsRef<Path>, rows: &[ReportRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
