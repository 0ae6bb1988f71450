//! CSV log of per-ticker mentions, one row per ticker per run.
//!
//! Rows are appended. A re-run for a date already in the log first drops
//! that date's rows, so each date holds exactly one run. The header is
//! written when the file is created and never again.

use crate::domain::errors::HistoryError;
use crate::domain::history::{HistoryRow, TickerHistory};
use crate::domain::rollup::TickerRollups;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const TICKER_HISTORY_FILE: &str = "ticker_history.csv";

/// A row as it sits on disk, before validation.
#[derive(Debug, Deserialize)]
struct RawHistoryRow {
    date: String,
    ticker: String,
    #[serde(default)]
    mentions: String,
    #[serde(default)]
    tier: String,
    #[serde(default)]
    theme: String,
    #[serde(default)]
    sentiment: String,
}

impl TryFrom<RawHistoryRow> for HistoryRow {
    type Error = HistoryError;

    fn try_from(raw: RawHistoryRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d").map_err(|_| {
            HistoryError::InvalidDate {
                value: raw.date.clone(),
            }
        })?;

        // Older logs left the count empty for tickers without mentions.
        let mentions = match raw.mentions.trim() {
            "" => 0,
            value => value
                .parse::<u32>()
                .map_err(|_| HistoryError::InvalidMentions {
                    ticker: raw.ticker.clone(),
                    value: value.to_string(),
                })?,
        };

        Ok(Self {
            date,
            ticker: raw.ticker.trim().to_uppercase(),
            mentions,
            tier: raw.tier,
            theme: raw.theme,
            sentiment: raw.sentiment.parse()?,
        })
    }
}

pub struct TickerHistoryStore {
    file_path: PathBuf,
}

impl TickerHistoryStore {
    /// Store backed by `ticker_history.csv` inside `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join(TICKER_HISTORY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads every valid row. A missing file is an empty history; rows that
    /// fail to parse are skipped with a warning.
    pub fn load(&self) -> Result<TickerHistory> {
        if !self.file_path.exists() {
            info!("No ticker history at {:?}, starting fresh", self.file_path);
            return Ok(TickerHistory::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .with_context(|| format!("Failed to open ticker history {:?}", self.file_path))?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (index, result) in reader.deserialize::<RawHistoryRow>().enumerate() {
            // Line 1 is the header.
            let line = index + 2;
            match result {
                Ok(raw) => match HistoryRow::try_from(raw) {
                    Ok(row) => rows.push(row),
                    Err(e) => {
                        warn!("Skipping ticker history line {}: {}", line, e);
                        skipped += 1;
                    }
                },
                Err(e) => {
                    warn!("Skipping unreadable ticker history line {}: {}", line, e);
                    skipped += 1;
                }
            }
        }

        info!(
            "Loaded {} ticker history rows from {:?} ({} skipped)",
            rows.len(),
            self.file_path,
            skipped
        );
        Ok(TickerHistory::new(rows))
    }

    /// Appends one row per rollup and returns how many were written. Rows
    /// already logged for `date` are replaced.
    pub fn append(&self, date: NaiveDate, rollups: &TickerRollups) -> Result<usize> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }
        self.drop_date(date)?;

        let file_exists = fs::metadata(&self.file_path)
            .map(|m| m.len() > 0)
            .unwrap_or(false);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .with_context(|| format!("Failed to open ticker history {:?}", self.file_path))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(!file_exists)
            .from_writer(file);

        let mut written = 0;
        for rollup in rollups {
            writer
                .serialize(HistoryRow::from_rollup(date, rollup))
                .context("Failed to write ticker history row")?;
            written += 1;
        }
        writer.flush().context("Failed to flush ticker history")?;

        info!(
            "Appended {} rows for {} to {:?}",
            written, date, self.file_path
        );
        Ok(written)
    }

    /// Rewrites the log without the rows for `date`. Other lines, including
    /// unreadable ones, are kept verbatim.
    fn drop_date(&self, date: NaiveDate) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read ticker history {:?}", self.file_path))?;
        let prefix = format!("{},", date.format("%Y-%m-%d"));
        let is_dated = |line: &str| line.trim_start().starts_with(&prefix);

        let removed = content.lines().filter(|l| is_dated(l)).count();
        if removed == 0 {
            return Ok(());
        }

        let mut kept = String::with_capacity(content.len());
        for line in content.lines().filter(|l| !is_dated(l)) {
            kept.push_str(line);
            kept.push('\n');
        }

        let temp_path = self.file_path.with_extension("tmp");
        fs::write(&temp_path, kept).context("Failed to write temp ticker history file")?;
        fs::rename(&temp_path, &self.file_path)
            .context("Failed to rename ticker history file")?;

        info!(
            "Replacing {} ticker history rows for {} in {:?}",
            removed, date, self.file_path
        );
        Ok(())
    }
}
