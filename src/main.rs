use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use discussit::cli::{Cli, Commands};
use discussit::config::Config;
use discussit::domain::{ApiVersion, SourceSelector};
use discussit::services::DiscussionService;
use discussit::sources::FetcherRegistry;
use discussit::storage::MemoryReportCache;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries the report.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Lookup {
            url,
            source,
            api_version,
            keep_query,
            pretty,
        } => {
            if let Some(version) = api_version {
                config.api_version = version.parse()?;
            }
            if keep_query {
                config.strip_query = false;
            }
            let selector: SourceSelector = source.parse()?;
            cmd_lookup(&config, &url, selector, pretty)
        }
        Commands::Sources { api_version } => {
            let version = match api_version {
                Some(version) => version.parse()?,
                None => config.api_version,
            };
            cmd_sources(version)
        }
    }
}

fn cmd_lookup(config: &Config, url: &str, selector: SourceSelector, pretty: bool) -> anyhow::Result<()> {
    let service = DiscussionService::from_config(config, MemoryReportCache::new())?;
    let report = service.lookup(url, selector)?;

    if report.is_partial() {
        tracing::warn!(errors = report.errors().len(), "some sources failed");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if pretty {
        serde_json::to_writer_pretty(&mut out, &report)
    } else {
        serde_json::to_writer(&mut out, &report)
    };
    written.context("Failed to write report")?;
    writeln!(out)?;

    Ok(())
}

fn cmd_sources(version: ApiVersion) -> anyhow::Result<()> {
    for source in FetcherRegistry::enabled_sources(version) {
        println!("{}", source);
    }

    Ok(())
}
