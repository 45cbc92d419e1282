//! Shelf-Scout main entry point
//!
//! This is the command-line interface for the Shelf-Scout scraping service.

use clap::Parser;
use shelf_scout::config::{load_config_with_hash, Config};
use shelf_scout::crawler::{HttpFetcher, Orchestrator};
use shelf_scout::jobs::JobService;
use shelf_scout::model::CrawlRequest;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Shelf-Scout: on-demand product scraping service
///
/// Serves an HTTP API that accepts crawl jobs, scrapes product pages from
/// the configured sources, and reports results by polling or callback.
#[derive(Parser, Debug)]
#[command(name = "shelf-scout")]
#[command(version)]
#[command(about = "On-demand product scraping service", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the configuration
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and print it without serving
    #[arg(long, conflicts_with = "run")]
    dry_run: bool,

    /// Run one crawl request from a JSON file and print the products
    #[arg(long, value_name = "REQUEST")]
    run: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;
    config.apply_env();
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    // overrides bypass the file-level validation in load_config
    shelf_scout::config::validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else if let Some(request_path) = cli.run {
        handle_run(&config, &request_path).await?;
    } else {
        handle_serve(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if let Ok(filter) = EnvFilter::try_from_default_env() {
        filter
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_scout=info,tower_http=warn,warn"),
            1 => EnvFilter::new("shelf_scout=debug,tower_http=debug,info"),
            2 => EnvFilter::new("shelf_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // logs go to stderr so `--run` output stays clean JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_configuration(path: Option<&Path>) -> shelf_scout::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Shelf-Scout Dry Run ===\n");

    println!("Server:");
    println!("  Bind: {}", config.server.bind);
    println!("  Allowed origins: {}", config.server.allowed_origins.join(", "));

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Accept: {}", config.fetcher.accept);
    println!("  Max redirects: {}", config.fetcher.max_redirects);

    println!("\nCallback:");
    println!("  Timeout: {}ms", config.callback.timeout_ms);

    println!("\nRequest defaults:");
    println!("  Concurrency: {}", config.defaults.concurrency);
    println!("  Request timeout: {}ms", config.defaults.request_timeout_ms);

    println!("\n✓ Configuration is valid");
}

/// Handles the --run mode: one crawl in the foreground, products to stdout
async fn handle_run(config: &Config, request_path: &Path) -> shelf_scout::Result<()> {
    tracing::info!("Reading crawl request from: {}", request_path.display());
    let raw = std::fs::read_to_string(request_path)?;
    let mut request: CrawlRequest = serde_json::from_str(&raw)?;
    request.validate()?;
    request.apply_defaults(&config.defaults);

    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let orchestrator = Orchestrator::new(Arc::new(fetcher));

    tracing::info!("Running crawl with {} sources", request.sources.len());
    let items = orchestrator.run(&request).await?;
    tracing::info!("Crawl completed: {} products", items.len());

    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

/// Handles the default mode: serve the HTTP API
async fn handle_serve(config: &Config) -> anyhow::Result<()> {
    let service = JobService::from_config(config)?;
    shelf_scout::server::serve(service, &config.server).await?;
    tracing::info!("Server stopped");
    Ok(())
}
