//! Persisted per-day ticker history and the comparison inputs derived from it.

use crate::domain::rollup::TickerRollup;
use crate::domain::sentiment::SentimentLabel;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One line of the ticker history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub date: NaiveDate,
    pub ticker: String,
    pub mentions: u32,
    pub tier: String,
    pub theme: String,
    pub sentiment: SentimentLabel,
}

impl HistoryRow {
    pub fn from_rollup(date: NaiveDate, rollup: &TickerRollup) -> Self {
        Self {
            date,
            ticker: rollup.symbol.clone(),
            mentions: rollup.mentions,
            tier: rollup.tier.clone(),
            theme: rollup.theme.clone(),
            sentiment: rollup.sentiment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousMentions {
    pub mentions: u32,
    pub theme: String,
    pub sentiment: SentimentLabel,
}

/// Ticker counts of the most recent recorded day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySnapshot {
    pub date: NaiveDate,
    entries: HashMap<String, PreviousMentions>,
}

impl HistorySnapshot {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, ticker: impl Into<String>, previous: PreviousMentions) {
        self.entries.insert(ticker.into(), previous);
    }

    pub fn get(&self, ticker: &str) -> Option<&PreviousMentions> {
        self.entries.get(ticker)
    }

    /// Previous mention count, 0 when the ticker was not recorded.
    pub fn mentions_for(&self, ticker: &str) -> u32 {
        self.entries.get(ticker).map_or(0, |p| p.mentions)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All persisted history rows, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerHistory {
    rows: Vec<HistoryRow>,
}

impl TickerHistory {
    pub fn new(rows: Vec<HistoryRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of the most recent date present. A ticker written twice on that
    /// date keeps its last row.
    pub fn latest_snapshot(&self) -> Option<HistorySnapshot> {
        let latest = self.rows.iter().map(|r| r.date).max()?;
        Some(self.snapshot_on(latest))
    }

    /// Most recent snapshot strictly older than `date`, so a second run on
    /// the same day still compares against the previous day.
    pub fn snapshot_before(&self, date: NaiveDate) -> Option<HistorySnapshot> {
        let latest = self
            .rows
            .iter()
            .map(|r| r.date)
            .filter(|d| *d < date)
            .max()?;
        Some(self.snapshot_on(latest))
    }

    fn snapshot_on(&self, date: NaiveDate) -> HistorySnapshot {
        let mut snapshot = HistorySnapshot::new(date);
        for row in self.rows.iter().filter(|r| r.date == date) {
            snapshot.insert(
                row.ticker.clone(),
                PreviousMentions {
                    mentions: row.mentions,
                    theme: row.theme.clone(),
                    sentiment: row.sentiment,
                },
            );
        }
        snapshot
    }

    /// Mean daily mentions per ticker over the recorded days in
    /// `[as_of - days, as_of)`.
    ///
    /// Recorded days on which a ticker has no row count as zero. Tickers
    /// without any row in the window get no baseline.
    pub fn rolling_baseline(&self, as_of: NaiveDate, days: u32) -> BTreeMap<String, f64> {
        let window_start = as_of
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        let in_window: Vec<&HistoryRow> = self
            .rows
            .iter()
            .filter(|r| r.date >= window_start && r.date < as_of)
            .collect();

        let dates: BTreeSet<NaiveDate> = in_window.iter().map(|r| r.date).collect();
        let mut daily: BTreeMap<&str, HashMap<NaiveDate, u32>> = BTreeMap::new();
        for row in &in_window {
            daily
                .entry(row.ticker.as_str())
                .or_default()
                .insert(row.date, row.mentions);
        }

        daily
            .into_iter()
            .filter_map(|(ticker, by_date)| {
                let series: Vec<f64> = dates
                    .iter()
                    .map(|d| by_date.get(d).copied().map_or(0.0, f64::from))
                    .collect();
                Data::new(series)
                    .mean()
                    .map(|mean| (ticker.to_string(), mean))
            })
            .collect()
    }
}
