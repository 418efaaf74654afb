//! Heuristic classification of free-text author affiliations
//!
//! Two fixed keyword sets and a linear case-insensitive substring scan per
//! affiliation. Volumes are small, so no trie or tokenization is needed.
//!
//! Matching is intentionally plain substring search without word boundaries:
//! "college" inside "collegetown" matches. The keyword lists are chosen to be
//! whole-word-ish, which keeps false positives rare but not impossible.
//! Changing to boundary-aware matching would change established output.

use crate::error::Result;
use crate::models::Affiliation;

/// Keywords marking an affiliation as academic
const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "school",
    "hospital",
    "clinic",
    "laboratory",
    "department",
    "faculty",
    "academy",
    "polytechnic",
    "medical center",
    "medical centre",
];

/// Keywords marking an affiliation as biotech/pharma, including common
/// legal-entity suffixes
const BIOTECH_PHARMA_KEYWORDS: &[&str] = &[
    "pharmaceutical",
    "pharma",
    "biopharma",
    "biotech",
    "biotechnology",
    "therapeutics",
    "drug",
    "genomics",
    "clinical",
    "immunotherapy",
    "oncology",
    "diagnostics",
    "biosciences",
    "inc",
    "ltd",
    "corp",
    "llc",
    "gmbh",
];

/// Classify a raw affiliation string
///
/// Classification itself has no failure mode; both flags false is a valid
/// outcome, and both true is possible when the keyword sets overlap on the
/// same text. The only error is the [`Affiliation`] construction invariant
/// for an empty or whitespace-only name.
///
/// # Example
///
/// ```
/// use pharma_papers::classify;
///
/// let affiliation = classify("Acme Therapeutics Inc, Cambridge, MA").unwrap();
/// assert!(!affiliation.is_academic());
/// assert!(affiliation.is_biotech_pharma());
/// ```
pub fn classify(affiliation_text: &str) -> Result<Affiliation> {
    let lowered = affiliation_text.to_lowercase();
    let is_academic = contains_any(&lowered, ACADEMIC_KEYWORDS);
    let is_biotech_pharma = contains_any(&lowered, BIOTECH_PHARMA_KEYWORDS);

    Affiliation::new(affiliation_text.trim(), is_academic, is_biotech_pharma)
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
