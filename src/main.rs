//! Ladle main entry point
//!
//! Command-line interface for the ladle recipe crawler.

use anyhow::Context;
use clap::Parser;
use ladle::config::load_config;
use ladle::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ladle: a single-site recipe crawler
///
/// Ladle crawls one recipe-publishing site starting from its /recipes
/// listing page, follows internal recipe links, and writes one structured
/// JSON record per recipe page.
#[derive(Parser, Debug)]
#[command(name = "ladle")]
#[command(version)]
#[command(about = "Crawl a recipe site and extract structured recipe records", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    tracing::info!(
        "Crawling {} (seed: {})",
        config.site.domain,
        config.site.seed_url()
    );

    let stats = crawl(config).await.context("crawl failed")?;

    println!(
        "Done: {} pages fetched, {} records written, {} fetch errors",
        stats.pages_fetched, stats.records_emitted, stats.fetch_errors
    );

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ladle=info,warn"),
            1 => EnvFilter::new("ladle=debug,info"),
            2 => EnvFilter::new("ladle=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Shows the effective configuration without crawling
fn print_dry_run(config: &ladle::config::Config) {
    println!("=== Ladle Dry Run ===\n");

    println!("Site:");
    println!("  Domain: {}", config.site.domain);
    println!("  Seed URL: {}", config.site.seed_url());

    println!("\nCrawler:");
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);

    println!("\nExtraction:");
    println!("  Fallback policy: {:?}", config.extraction.fallback_policy);
    println!(
        "  Discovery breadth: {:?}",
        config.extraction.discovery_breadth
    );

    println!("\nUser agent: {}", config.user_agent.header_value());
    println!("Records path: {}", config.output.records_path);

    println!("\n✓ Configuration is valid");
}
