use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pubmed_pharma_papers::{ClientConfig, PubMedClient, WriteOutcome, write_table};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "get-papers-list",
    about = "Fetch PubMed papers with pharmaceutical or biotech company authors",
    long_about = "Search PubMed, keep papers with at least one company-affiliated author, and write them as CSV or print them"
)]
struct Cli {
    /// Search query for PubMed
    #[arg(value_name = "QUERY")]
    query: String,

    /// Output CSV file (prints to the console if omitted)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Print the query and fetched PMIDs, and enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "get-papers-list")]
    tool: String,

    /// Alternative E-utilities base URL
    #[arg(long, env = "NCBI_BASE_URL", hide = true)]
    base_url: Option<String>,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new().with_tool(&self.tool);

        if let Some(email) = &self.email {
            config = config.with_email(email);
        }

        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }

        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    if cli.debug {
        println!("Query: {}", cli.query);
    }

    let client = PubMedClient::with_config(cli.client_config());

    let pmids = client
        .fetch_ids(&cli.query)
        .await
        .context("Failed to search PubMed")?;
    if cli.debug {
        println!("Fetched IDs: {:?}", pmids);
    }

    let records = client
        .fetch_details(&pmids)
        .await
        .context("Failed to fetch article details")?;

    match &cli.file {
        Some(path) => {
            let outcome = write_table(&records, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if let WriteOutcome::Written { rows } = outcome {
                info!(rows, path = %path.display(), "Saved results");
            }
        }
        None => {
            for record in &records {
                println!("{}", record.to_json_line()?);
            }
        }
    }

    Ok(())
}
