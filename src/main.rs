//! Vetharvest main entry point
//!
//! This is the command-line interface for the Vetharvest article harvester.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vetharvest::config::{load_config_with_hash, validate, Config};
use vetharvest::crawler::crawl;
use vetharvest::logging::setup_logging;
use vetharvest::output::{load_statistics, print_statistics, write_outline, DEFAULT_OUTLINE_FILE};
use vetharvest::storage::open_storage;
use vetharvest::{articles, HarvestError, ShutdownFlag, StopReason};

/// Exit status after an operator interrupt
const EXIT_INTERRUPTED: u8 = 130;

/// Vetharvest: a resumable veterinary article harvester
///
/// `crawl` discovers article URLs by walking hub pages; `scrape` turns the
/// discovered articles into a JSON corpus. Both resume from the state
/// saved in the data directory.
#[derive(Parser, Debug)]
#[command(name = "vetharvest")]
#[command(version)]
#[command(about = "A resumable veterinary article harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in site profile if omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover content URLs, resuming from the saved frontier
    Crawl {
        /// Start URLs to queue before crawling
        #[arg(value_name = "URL")]
        urls: Vec<String>,
    },

    /// Scrape queued content URLs into the article corpus
    Scrape {
        /// Extra URLs to scrape
        #[arg(value_name = "URL")]
        urls: Vec<String>,
    },

    /// Write the section outline of a saved corpus
    Outline {
        /// Article corpus JSON file
        #[arg(value_name = "CORPUS")]
        corpus: PathBuf,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTLINE_FILE)]
        output: PathBuf,
    },

    /// Show statistics from the saved frontier and corpus
    Status,

    /// Validate the configuration and show what a crawl would use
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Crawl { urls } => handle_crawl(&config, &urls).await,
        Command::Scrape { urls } => handle_scrape(&config, &urls).await,
        Command::Outline { corpus, output } => handle_outline(&corpus, &output),
        Command::Status => handle_status(&config),
        Command::Check => handle_check(&config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Loads the configuration file, or validates the built-in profile
fn load(path: Option<&Path>) -> Result<Config, HarvestError> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            let config = Config::default();
            validate(&config)?;
            tracing::debug!("Using built-in configuration");
            Ok(config)
        }
    }
}

fn exit_code(stop: StopReason) -> ExitCode {
    match stop {
        StopReason::Exhausted => ExitCode::SUCCESS,
        StopReason::Interrupted => ExitCode::from(EXIT_INTERRUPTED),
    }
}

/// Handles the crawl command
async fn handle_crawl(config: &Config, urls: &[String]) -> Result<ExitCode, HarvestError> {
    tracing::info!(
        "Crawling {} ({} seeds, {} skipped path prefixes)",
        config.site.base_url,
        config.site.seeds.len(),
        config.site.skip_paths.len()
    );

    let shutdown = ShutdownFlag::new();
    let listener = shutdown.listen_for_ctrl_c();
    let result = crawl(config, urls, shutdown).await;
    listener.abort();

    Ok(exit_code(result?.stop))
}

/// Handles the scrape command
async fn handle_scrape(config: &Config, urls: &[String]) -> Result<ExitCode, HarvestError> {
    let shutdown = ShutdownFlag::new();
    let listener = shutdown.listen_for_ctrl_c();
    let result = articles::scrape(config, urls, shutdown).await;
    listener.abort();

    let report = result?;
    println!(
        "✓ Saved {} articles ({} in corpus, {} left to scrape)",
        report.saved, report.corpus_size, report.remaining
    );
    Ok(exit_code(report.stop))
}

/// Handles the outline command
fn handle_outline(corpus: &Path, output: &Path) -> Result<ExitCode, HarvestError> {
    let count = write_outline(corpus, output)?;
    println!("✓ Outlined {} articles to: {}", count, output.display());
    Ok(ExitCode::SUCCESS)
}

/// Handles the status command
fn handle_status(config: &Config) -> Result<ExitCode, HarvestError> {
    println!("Data directory: {}\n", config.storage.data_dir);

    let storage = open_storage(&config.data_dir(), &config.corpus_path())?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(ExitCode::SUCCESS)
}

/// Handles the check command: shows the effective configuration
fn handle_check(config: &Config) -> Result<ExitCode, HarvestError> {
    println!("=== Vetharvest Configuration ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Seeds ({}):", config.site.seeds.len());
    for seed in &config.site.seeds {
        println!("    * {}", seed);
    }
    println!("  Skipped path prefixes ({}):", config.site.skip_paths.len());
    for path in &config.site.skip_paths {
        println!("    - {}", path);
    }

    println!("\nSelectors:");
    println!("  Link anchors: {}", config.selectors.link_anchors);
    println!("  Main content: {}", config.selectors.main_content);
    println!("  Title: {}", config.selectors.title);

    println!("\nPacing:");
    println!(
        "  Crawl cooldown: {:?} every {} requests",
        config.crawler.cooldown(),
        config.crawler.cooldown_every
    );
    println!("  403 retry delay: {:?}", config.scraper.denied_retry());
    println!(
        "  Failure cooldown: {:?} ({:?}, max {:?})",
        config.scraper.failure_cooldown(),
        config.scraper.backoff,
        config.scraper.max_failure_cooldown()
    );
    println!("  HTTP timeout: {:?}", config.http.timeout());

    println!("\nStorage:");
    println!("  Data directory: {}", config.storage.data_dir);
    println!("  Corpus: {}", config.corpus_path().display());
    println!("  Logs: {}", config.storage.log_dir);

    println!("\n✓ Configuration is valid");
    Ok(ExitCode::SUCCESS)
}
