use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rotation_scanner::application::queries::search_queries;
use rotation_scanner::application::report_service::ReportService;
use rotation_scanner::config::AppConfig;
use rotation_scanner::domain::ports::RecordSource;
use rotation_scanner::infrastructure::collectors::{
    JsonRecordSource, RssRecordSource, SampleRecordSource,
};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Capital rotation reports from collected market chatter", long_about = None)]
struct Cli {
    /// Configuration file (defaults to $ROTATION_CONFIG, then rotation.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect records, analyze them and write the daily report
    Report {
        /// JSON file holding an array of records
        #[arg(long)]
        records: Option<PathBuf>,

        /// RSS feed to fetch (repeatable)
        #[arg(long = "rss")]
        rss_feeds: Vec<String>,

        /// Use the built-in sample records
        #[arg(long)]
        sample: bool,

        /// Report date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Print the report instead of writing any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the search queries for a date
    Queries {
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Rebuild the report index
    Index,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").context("date must be YYYY-MM-DD")
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so a dry-run report on stdout stays clean
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Queries { date } => {
            for query in search_queries(date.unwrap_or_else(today)) {
                println!("{}", query);
            }
        }
        Commands::Index => {
            let config = AppConfig::from_env(cli.config.as_deref())?;
            let service = ReportService::new(config)?;
            let path = service.rebuild_index()?;
            println!("📚 Index written to {}", path.display());
        }
        Commands::Report {
            records,
            rss_feeds,
            sample,
            date,
            dry_run,
        } => {
            let config = AppConfig::from_env(cli.config.as_deref())?;
            info!(
                "Configuration loaded: {} tickers, {} themes, reports in {:?}",
                config.tickers.len(),
                config.themes.len(),
                config.reports_dir()
            );

            let mut sources: Vec<Box<dyn RecordSource>> = Vec::new();
            if let Some(path) = records {
                sources.push(Box::new(JsonRecordSource::new(path)));
            }
            for url in &rss_feeds {
                sources.push(Box::new(RssRecordSource::new(url)));
            }
            if sample {
                sources.push(Box::new(SampleRecordSource::new()));
            }
            if sources.is_empty() {
                anyhow::bail!("No record source given: use --records, --rss or --sample");
            }

            let service = ReportService::new(config)?;
            let report = service
                .run(&sources, date.unwrap_or_else(today), dry_run)
                .await?;

            match report.report_path {
                Some(path) => println!("✅ Report written to {}", path.display()),
                None => print!("{}", report.markdown),
            }
        }
    }

    Ok(())
}
