use crate::application::analysis::momentum_comparator::MomentumComparator;
use crate::application::analysis::sentiment_classifier::SentimentClassifier;
use crate::application::analysis::text_scanner::TextScanner;
use crate::application::analysis::theme_extractor::ThemeExtractor;
use crate::application::analysis::ticker_rollup::TickerRollupBuilder;
use crate::config::AppConfig;
use crate::domain::catalog::TickerCatalog;
use crate::domain::history::TickerHistory;
use crate::domain::momentum::{MomentumReport, MomentumSpike};
use crate::domain::record::TextRecord;
use crate::domain::rollup::TickerRollups;
use crate::domain::theme::{ThemeAggregates, ThemeDefinition};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Everything one run derives from its records.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub date: NaiveDate,
    pub themes: ThemeAggregates,
    pub rollups: TickerRollups,
    pub momentum: MomentumReport,
    pub spikes: Vec<MomentumSpike>,
    /// Date of the snapshot the trend was computed against, if any.
    pub previous_date: Option<NaiveDate>,
}

/// Runs extraction, rollup and momentum comparison over one batch of records.
pub struct SignalAnalyzer {
    catalog: TickerCatalog,
    themes: Vec<ThemeDefinition>,
    scanner: TextScanner,
    classifier: SentimentClassifier,
    comparator: MomentumComparator,
    baseline_days: u32,
}

impl SignalAnalyzer {
    pub fn new(
        catalog: TickerCatalog,
        themes: Vec<ThemeDefinition>,
        classifier: SentimentClassifier,
        comparator: MomentumComparator,
        baseline_days: u32,
    ) -> Result<Self> {
        let scanner =
            TextScanner::new(&catalog).context("Failed to build ticker pattern from catalog")?;

        Ok(Self {
            catalog,
            themes,
            scanner,
            classifier,
            comparator,
            baseline_days,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.tickers.clone(),
            config.themes.clone(),
            SentimentClassifier::from_config(&config.sentiment),
            MomentumComparator::new(&config.momentum),
            config.momentum.baseline_days,
        )
    }

    pub fn catalog(&self) -> &TickerCatalog {
        &self.catalog
    }

    pub fn themes(&self) -> &[ThemeDefinition] {
        &self.themes
    }

    /// History rows dated `as_of` or later never feed the comparison, so the
    /// outcome is the same whether or not today's rows were already written.
    pub fn analyze(
        &self,
        records: &[TextRecord],
        history: &TickerHistory,
        as_of: NaiveDate,
    ) -> AnalysisOutcome {
        let themes =
            ThemeExtractor::new(&self.themes, &self.scanner, &self.classifier).extract(records);
        let rollups = TickerRollupBuilder::new(&self.catalog, &self.scanner, &self.classifier)
            .build(records, &themes);

        let previous = history.snapshot_before(as_of);
        let momentum = self.comparator.compare(&rollups, previous.as_ref());

        let baselines = history.rolling_baseline(as_of, self.baseline_days);
        let spikes = self.comparator.detect_spikes(&rollups, &baselines);

        debug!(
            "Baselines computed for {} tickers over {} days",
            baselines.len(),
            self.baseline_days
        );
        info!(
            "Analyzed {} records: {} themes, {} tickers, {} gaining, {} losing, {} spikes",
            records.len(),
            themes.len(),
            rollups.len(),
            momentum.gaining.len(),
            momentum.losing.len(),
            spikes.len()
        );

        AnalysisOutcome {
            date: as_of,
            themes,
            rollups,
            momentum,
            spikes,
            previous_date: previous.map(|s| s.date),
        }
    }
}
