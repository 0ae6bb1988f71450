//! One report run: collect, analyze, render, persist.

use crate::application::analysis::{AnalysisOutcome, SignalAnalyzer};
use crate::application::queries::search_queries;
use crate::application::reporting::MarkdownReport;
use crate::config::AppConfig;
use crate::domain::ports::RecordSource;
use crate::domain::record::TextRecord;
use crate::infrastructure::persistence::{
    ReportStore, ThemeEvolutionStore, ThemeSnapshot, TickerHistoryStore,
};
use anyhow::{Result, bail};
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of a report run.
#[derive(Debug)]
pub struct GeneratedReport {
    pub outcome: AnalysisOutcome,
    pub markdown: String,
    /// `None` for dry runs.
    pub report_path: Option<PathBuf>,
}

pub struct ReportService {
    config: AppConfig,
    analyzer: SignalAnalyzer,
    history: TickerHistoryStore,
    evolution: ThemeEvolutionStore,
    reports: ReportStore,
}

impl ReportService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let analyzer = SignalAnalyzer::from_config(&config)?;
        let data_dir = config.data_dir();

        Ok(Self {
            history: TickerHistoryStore::new(&data_dir),
            evolution: ThemeEvolutionStore::new(&data_dir),
            reports: ReportStore::from_config(&config),
            analyzer,
            config,
        })
    }

    /// Gathers records from every source in order. A failing source is
    /// logged and skipped; the run fails only if every source failed.
    pub async fn collect(&self, sources: &[Box<dyn RecordSource>]) -> Result<Vec<TextRecord>> {
        let mut records = Vec::new();
        let mut failures = 0;

        for source in sources {
            match source.collect().await {
                Ok(batch) => {
                    info!("{}: {} records", source.name(), batch.len());
                    records.extend(batch);
                }
                Err(e) => {
                    warn!("Record source {} failed: {:#}", source.name(), e);
                    failures += 1;
                }
            }
        }

        if !sources.is_empty() && failures == sources.len() {
            bail!("All {} record sources failed", failures);
        }
        Ok(records)
    }

    /// Analyzes `records` for `date` and renders the report. Unless
    /// `dry_run` is set the report, history logs and index are written.
    pub fn generate(
        &self,
        records: &[TextRecord],
        date: NaiveDate,
        dry_run: bool,
    ) -> Result<GeneratedReport> {
        if records.is_empty() {
            warn!("No records collected, the report will be empty");
        }

        let history = self.history.load()?;
        let outcome = self.analyzer.analyze(records, &history, date);

        let queries = search_queries(date);
        let markdown = MarkdownReport::new(
            &outcome,
            records,
            &queries,
            &self.config.momentum,
            Utc::now(),
        )
        .to_string();

        if dry_run {
            info!("Dry run: nothing written");
            return Ok(GeneratedReport {
                outcome,
                markdown,
                report_path: None,
            });
        }

        let report_path = self.reports.write_report(date, &markdown)?;
        self.history.append(date, &outcome.rollups)?;
        self.evolution
            .append(ThemeSnapshot::from_aggregates(date, &outcome.themes))?;
        self.reports.rebuild_index()?;

        Ok(GeneratedReport {
            outcome,
            markdown,
            report_path: Some(report_path),
        })
    }

    pub async fn run(
        &self,
        sources: &[Box<dyn RecordSource>],
        date: NaiveDate,
        dry_run: bool,
    ) -> Result<GeneratedReport> {
        info!("Generating report for {} from {} sources", date, sources.len());
        let records = self.collect(sources).await?;
        self.generate(&records, date, dry_run)
    }

    pub fn rebuild_index(&self) -> Result<PathBuf> {
        self.reports.rebuild_index()
    }
}
