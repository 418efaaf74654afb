use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pharma_papers::{ClientConfig, PubMedClient, build_rows, filter_papers, write_csv};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pharma-papers",
    about = "Find PubMed papers with biotech/pharma-affiliated authors",
    long_about = "Searches PubMed for the given query, classifies author \
                  affiliations, and writes papers with at least one \
                  biotech/pharma-affiliated author to a CSV report",
    version
)]
struct Cli {
    /// PubMed search query
    #[arg(value_name = "QUERY")]
    query: String,

    /// Output CSV path
    #[arg(
        short,
        long,
        default_value = "papers_with_non_academic_authors.csv",
        value_name = "PATH"
    )]
    file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    debug: bool,

    /// Maximum number of search results to fetch
    #[arg(short = 'm', long, default_value_t = 100)]
    max_results: usize,

    /// API key for NCBI E-utilities (raises the allowed request rate)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Contact email forwarded to NCBI (recommended)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Tool name forwarded to NCBI
    #[arg(long, env = "NCBI_TOOL", default_value = "pharma-papers")]
    tool: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = tokio::select! {
        result = run(&cli) => result,
        _ = tokio::signal::ctrl_c() => Err(anyhow::anyhow!("interrupted by user")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if cli.debug {
                error!("{err:?}");
            } else {
                error!("{err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let client = create_client(cli);

    let papers = client.collect_papers(&cli.query, cli.max_results).await;
    let matching = filter_papers(papers);
    info!(
        count = matching.len(),
        "papers with biotech/pharma-affiliated authors"
    );

    let rows = build_rows(&matching);
    write_csv(&cli.file, &rows)
        .with_context(|| format!("writing report to {}", cli.file.display()))?;
    info!(file = %cli.file.display(), rows = rows.len(), "report written");

    Ok(())
}

fn create_client(cli: &Cli) -> PubMedClient {
    let mut config = ClientConfig::new().with_tool(&cli.tool);

    if let Some(api_key) = cli.api_key.as_deref() {
        config = config.with_api_key(api_key);
    }
    if let Some(email) = cli.email.as_deref() {
        config = config.with_email(email);
    }

    PubMedClient::with_config(config)
}
