//! Showcase CLI - scrape a GitHub Discussion showcase thread.

mod config;
mod progress;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use showcase::{DiscussionCoords, OctocrabTransport, ScrapeOptions, Scraper};

use crate::progress::ProgressReporter;

/// Default content-collection root the site generator reads from.
const DEFAULT_OUTPUT_DIR: &str = "src/content/showcase";

#[derive(Parser)]
#[command(name = "showcase")]
#[command(version)]
#[command(about = "Scrape a GitHub Discussion showcase thread into content records")]
#[command(
    long_about = "Showcase harvests community submissions posted as comments on a GitHub \
Discussion. Every link in every comment is classified, GitHub repository links \
are enriched with live statistics, and one JSON record per author is written \
to a content directory for the site generator."
)]
#[command(after_long_help = r#"EXAMPLES
    Scrape a showcase discussion into the default content directory:
        $ showcase acme site 2022

    Write somewhere else:
        $ showcase acme site 2022 --output build/showcase

    Resume pagination from a cursor:
        $ showcase acme site 2022 --after Y3Vyc29yOnYyOpHOAAbm2g==

CONFIGURATION
    Showcase reads configuration from:
      1. ~/.config/showcase/config.toml (or $XDG_CONFIG_HOME/showcase/config.toml)
      2. ./showcase.toml
      3. Environment variables (SHOWCASE_* prefix)

ENVIRONMENT VARIABLES
    SHOWCASE_GITHUB_TOKEN       GitHub personal access token (required)
    SHOWCASE_OUTPUT_DIRECTORY   Output directory (default: src/content/showcase)
    RUST_LOG                    Log filter, e.g. "showcase=debug"
"#)]
struct Cli {
    /// GitHub organization (or user) owning the repository
    organization: String,

    /// Repository containing the discussion
    repository: String,

    /// Discussion number to scrape
    #[arg(value_name = "NUMBER")]
    discussion: u64,

    /// Output directory for the generated records
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Resume pagination from this cursor
    #[arg(long, value_name = "CURSOR")]
    after: Option<String>,

    /// GitHub personal access token (overrides config file)
    #[arg(long, env = "SHOWCASE_GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Path to an explicit config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    // The token check runs before anything touches the network.
    let token = config::resolve_token(cli.token, &config)?;

    let output = cli
        .output
        .or(config.output.directory)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let coords = DiscussionCoords {
        organization: cli.organization,
        repository: cli.repository,
        discussion_number: cli.discussion,
    };

    let transport = Arc::new(OctocrabTransport::new(token)?);
    let scraper = Scraper::new(transport, &output);

    let reporter = Arc::new(ProgressReporter::new());
    let records = scraper
        .run(
            &coords,
            ScrapeOptions {
                starting_cursor: cli.after,
                prior_records: Vec::new(),
                on_progress: Some(progress::callback(reporter)),
            },
        )
        .await?;

    println!(
        "{} {} showcase records written to {}",
        style("✓").green().bold(),
        records.len(),
        style(output.display()).cyan()
    );

    Ok(())
}
