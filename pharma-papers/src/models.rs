//! Value objects for retrieved bibliographic records
//!
//! All types are constructed fresh from parsed response data and never
//! mutated afterwards. Constructors validate the required string fields;
//! everything derivable (non-academic authors, corresponding email) is
//! computed on demand rather than stored.

use serde::Serialize;
use time::Date;

use crate::error::{PapersError, Result};

fn require_non_empty(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PapersError::EmptyField { field });
    }
    Ok(())
}

/// One free-text institutional affiliation with its heuristic classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affiliation {
    name: String,
    is_academic: bool,
    is_biotech_pharma: bool,
}

impl Affiliation {
    /// Construct an affiliation; the name must not be empty or
    /// whitespace-only
    pub fn new(
        name: impl Into<String>,
        is_academic: bool,
        is_biotech_pharma: bool,
    ) -> Result<Self> {
        let name = name.into();
        require_non_empty(&name, "affiliation name")?;
        Ok(Self {
            name,
            is_academic,
            is_biotech_pharma,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_academic(&self) -> bool {
        self.is_academic
    }

    pub fn is_biotech_pharma(&self) -> bool {
        self.is_biotech_pharma
    }
}

/// One author of a paper with their classified affiliations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    name: String,
    email: Option<String>,
    affiliations: Vec<Affiliation>,
    is_corresponding: bool,
}

impl Author {
    /// Construct an author; the name must not be empty or whitespace-only
    pub fn new(
        name: impl Into<String>,
        email: Option<String>,
        affiliations: Vec<Affiliation>,
        is_corresponding: bool,
    ) -> Result<Self> {
        let name = name.into();
        require_non_empty(&name, "author name")?;
        Ok(Self {
            name,
            email,
            affiliations,
            is_corresponding,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn affiliations(&self) -> &[Affiliation] {
        &self.affiliations
    }

    pub fn is_corresponding(&self) -> bool {
        self.is_corresponding
    }

    /// True when any affiliation is not classified as academic
    pub fn has_non_academic_affiliation(&self) -> bool {
        self.affiliations.iter().any(|aff| !aff.is_academic())
    }

    /// True when any affiliation is classified as biotech/pharma
    pub fn has_biotech_pharma_affiliation(&self) -> bool {
        self.affiliations.iter().any(Affiliation::is_biotech_pharma)
    }
}

/// One bibliographic record returned by the literature database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paper {
    pmid: String,
    title: String,
    publication_date: Date,
    authors: Vec<Author>,
}

impl Paper {
    /// Construct a paper; pmid and title must not be empty or
    /// whitespace-only
    pub fn new(
        pmid: impl Into<String>,
        title: impl Into<String>,
        publication_date: Date,
        authors: Vec<Author>,
    ) -> Result<Self> {
        let pmid = pmid.into();
        let title = title.into();
        require_non_empty(&pmid, "pmid")?;
        require_non_empty(&title, "title")?;
        Ok(Self {
            pmid,
            title,
            publication_date,
            authors,
        })
    }

    pub fn pmid(&self) -> &str {
        &self.pmid
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn publication_date(&self) -> Date {
        self.publication_date
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Authors with at least one non-academic affiliation
    pub fn non_academic_authors(&self) -> Vec<&Author> {
        self.authors
            .iter()
            .filter(|author| author.has_non_academic_affiliation())
            .collect()
    }

    /// Authors with at least one biotech/pharma affiliation
    pub fn biotech_pharma_authors(&self) -> Vec<&Author> {
        self.authors
            .iter()
            .filter(|author| author.has_biotech_pharma_affiliation())
            .collect()
    }

    /// True when any author carries a biotech/pharma affiliation
    pub fn has_biotech_pharma_affiliation(&self) -> bool {
        self.authors
            .iter()
            .any(Author::has_biotech_pharma_affiliation)
    }

    /// First author flagged as corresponding, if the feed marked one
    pub fn corresponding_author(&self) -> Option<&Author> {
        self.authors.iter().find(|author| author.is_corresponding())
    }

    /// Email of the corresponding author, when both are known
    pub fn corresponding_author_email(&self) -> Option<&str> {
        self.corresponding_author().and_then(Author::email)
    }
}
