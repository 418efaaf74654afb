//! Per-field extraction helpers for record conversion
//!
//! Each helper is tolerant and returns an `Option` (or a fallback value), so
//! the conversion in `xml_types` stays a flat sequence of independently
//! skippable steps.

use std::sync::OnceLock;

use regex::Regex;
use time::{Date, Month, OffsetDateTime};
use tracing::warn;

use super::xml_types::{AuthorXml, PubDateXml};
use crate::classify::classify;
use crate::models::Author;

/// Build the publication date from `<PubDate>` content
///
/// Month and day default to 1 when absent. A record with no usable year at
/// all falls back to today's wall-clock date; that is an approximation for
/// undated records, not a meaningful publication date.
pub(super) fn publication_date(pub_date: Option<&PubDateXml>) -> Date {
    pub_date.and_then(date_from_parts).unwrap_or_else(today)
}

fn date_from_parts(pub_date: &PubDateXml) -> Option<Date> {
    let year: i32 = pub_date
        .year
        .as_deref()
        .and_then(|y| y.trim().parse().ok())
        .or_else(|| medline_date_year(pub_date.medline_date.as_deref()?))?;

    let month = pub_date
        .month
        .as_deref()
        .and_then(parse_month)
        .unwrap_or(Month::January);

    let day: u8 = pub_date
        .day
        .as_deref()
        .and_then(|d| d.trim().parse().ok())
        .unwrap_or(1);

    // An out-of-range day (e.g. "31" in a 30-day month) degrades to the 1st.
    Date::from_calendar_date(year, month, day)
        .or_else(|_| Date::from_calendar_date(year, month, 1))
        .ok()
}

/// Leading year of a free-form `<MedlineDate>` such as "2020 Jan-Feb"
fn medline_date_year(medline_date: &str) -> Option<i32> {
    medline_date.trim().get(..4)?.parse().ok()
}

/// Parse a numeric ("9") or English abbreviated ("Sep") month
fn parse_month(month: &str) -> Option<Month> {
    let month = month.trim();
    if let Ok(number) = month.parse::<u8>() {
        return Month::try_from(number).ok();
    }

    let lowered = month.to_lowercase();
    match lowered.get(..3)? {
        "jan" => Some(Month::January),
        "feb" => Some(Month::February),
        "mar" => Some(Month::March),
        "apr" => Some(Month::April),
        "may" => Some(Month::May),
        "jun" => Some(Month::June),
        "jul" => Some(Month::July),
        "aug" => Some(Month::August),
        "sep" => Some(Month::September),
        "oct" => Some(Month::October),
        "nov" => Some(Month::November),
        "dec" => Some(Month::December),
        _ => None,
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Convert `<Author>` nodes, skipping malformed ones individually
pub(super) fn authors(nodes: Vec<AuthorXml>) -> Vec<Author> {
    nodes.into_iter().filter_map(author).collect()
}

fn author(node: AuthorXml) -> Option<Author> {
    let name = full_name(node.fore_name.as_deref(), node.last_name.as_deref());

    let affiliation_text = node
        .affiliation_info
        .first()
        .and_then(|info| info.affiliation.as_deref());

    // The feed does not expose author email elsewhere, so absence of a match
    // in the affiliation text is expected.
    let email = affiliation_text.and_then(extract_email);

    let mut affiliations = Vec::new();
    for text in affiliation_text
        .into_iter()
        .chain(node.collective_name.as_deref())
    {
        match classify(text) {
            Ok(affiliation) => affiliations.push(affiliation),
            Err(error) => warn!(%error, "dropping blank affiliation text"),
        }
    }

    match Author::new(name, email, affiliations, node.is_corresponding) {
        Ok(author) => Some(author),
        Err(error) => {
            warn!(%error, "skipping author without a usable name");
            None
        }
    }
}

/// "ForeName LastName", or whichever part is present
fn full_name(fore_name: Option<&str>, last_name: Option<&str>) -> String {
    match (fore_name, last_name) {
        (Some(fore), Some(last)) => format!("{fore} {last}"),
        (Some(fore), None) => fore.to_string(),
        (None, Some(last)) => last.to_string(),
        (None, None) => String::new(),
    }
}

/// Best-effort email scan over an affiliation text block
fn extract_email(text: &str) -> Option<String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("Failed to compile email regex")
    });

    re.find(text).map(|m| m.as_str().to_string())
}
