//! Retrieve PubMed records and report papers with biotech/pharma-affiliated
//! authors.
//!
//! The pipeline is: search for PMIDs matching a query, fetch each record
//! sequentially, parse it into a [`Paper`] with classified author
//! affiliations, keep papers with at least one biotech/pharma-affiliated
//! author, and serialize the survivors to CSV.
//!
//! # Example
//!
//! ```no_run
//! use pharma_papers::{build_rows, filter_papers, write_csv, PubMedClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new();
//!     let papers = client.collect_papers("covid vaccine", 100).await;
//!     let matching = filter_papers(papers);
//!     write_csv("papers_with_non_academic_authors.csv", &build_rows(&matching))?;
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod rate_limit;
pub mod report;

pub use classify::classify;
pub use client::PubMedClient;
pub use config::ClientConfig;
pub use error::{PapersError, Result};
pub use models::{Affiliation, Author, Paper};
pub use parser::{parse_paper_from_xml, parse_papers_from_xml};
pub use rate_limit::RateLimiter;
pub use report::{build_rows, filter_papers, write_csv, ReportRow};
