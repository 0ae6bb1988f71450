//! JSON log of daily theme snapshots.

use crate::domain::sentiment::SentimentLabel;
use crate::domain::theme::ThemeAggregates;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const THEME_EVOLUTION_FILE: &str = "theme_evolution.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSummary {
    pub mentions: u32,
    pub tickers: Vec<String>,
    pub sentiment: SentimentLabel,
}

/// Theme state for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSnapshot {
    pub date: NaiveDate,
    pub themes: BTreeMap<String, ThemeSummary>,
}

impl ThemeSnapshot {
    pub fn from_aggregates(date: NaiveDate, aggregates: &ThemeAggregates) -> Self {
        let themes = aggregates
            .iter()
            .map(|(name, aggregate)| {
                (
                    name.to_string(),
                    ThemeSummary {
                        mentions: aggregate.mentions,
                        tickers: aggregate.tickers.iter().cloned().collect(),
                        sentiment: aggregate.dominant_sentiment(),
                    },
                )
            })
            .collect();

        Self { date, themes }
    }
}

pub struct ThemeEvolutionStore {
    file_path: PathBuf,
}

impl ThemeEvolutionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join(THEME_EVOLUTION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn load(&self) -> Result<Vec<ThemeSnapshot>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read theme evolution {:?}", self.file_path))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let snapshots: Vec<ThemeSnapshot> =
            serde_json::from_str(&content).context("Failed to parse theme evolution JSON")?;

        info!(
            "Loaded {} theme snapshots from {:?}",
            snapshots.len(),
            self.file_path
        );
        Ok(snapshots)
    }

    /// Appends `snapshot`, replacing an earlier snapshot of the same date.
    pub fn append(&self, snapshot: ThemeSnapshot) -> Result<()> {
        let mut snapshots = self.load()?;
        snapshots.retain(|s| s.date != snapshot.date);
        snapshots.push(snapshot);
        self.save(&snapshots)
    }

    fn save(&self, snapshots: &[ThemeSnapshot]) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(snapshots)
            .context("Failed to serialize theme evolution")?;

        // Atomic write: write to temp file then rename
        let temp_path = self.file_path.with_extension("tmp");
        fs::write(&temp_path, content).context("Failed to write temp theme evolution file")?;
        fs::rename(&temp_path, &self.file_path)
            .context("Failed to rename theme evolution file")?;

        info!(
            "Saved {} theme snapshots to {:?}",
            snapshots.len(),
            self.file_path
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::theme::ThemeAggregate;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_test_dir() -> PathBuf {
        let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "rotation_test_{}_{}_themes",
            std::process::id(),
            unique_id
        ));
        fs::create_dir_all(&temp_dir).expect("Failed to create test temp dir");
        temp_dir
    }

    fn cleanup_test_dir(temp_dir: PathBuf) {
        fs::remove_dir_all(temp_dir).ok();
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn aggregates(mentions: u32) -> ThemeAggregates {
        let aggregate = ThemeAggregate {
            mentions,
            tickers: ["RKLB".to_string(), "ASTS".to_string()].into_iter().collect(),
            sentiments: vec![SentimentLabel::Positive, SentimentLabel::Neutral],
            sources: vec!["Reddit".to_string(), "Reuters".to_string()],
        };
        vec![("Space Connectivity".to_string(), aggregate)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_snapshot_from_aggregates() {
        let snapshot = ThemeSnapshot::from_aggregates(date("2026-10-16"), &aggregates(2));
        let space = &snapshot.themes["Space Connectivity"];
        assert_eq!(space.mentions, 2);
        assert_eq!(space.tickers, vec!["ASTS", "RKLB"]);
        assert_eq!(space.sentiment, SentimentLabel::Positive);
    }

    #[test]
    fn test_append_accumulates_and_replaces_same_day() {
        let temp_dir = create_test_dir();
        let store = ThemeEvolutionStore::new(&temp_dir);

        store
            .append(ThemeSnapshot::from_aggregates(date("2026-10-15"), &aggregates(1)))
            .unwrap();
        store
            .append(ThemeSnapshot::from_aggregates(date("2026-10-16"), &aggregates(2)))
            .unwrap();
        store
            .append(ThemeSnapshot::from_aggregates(date("2026-10-16"), &aggregates(5)))
            .unwrap();

        let snapshots = store.load().unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].themes["Space Connectivity"].mentions, 5);
        assert!(!store.path().with_extension("tmp").exists());

        let json = fs::read_to_string(store.path()).unwrap();
        assert!(json.contains("\"sentiment\": \"positive\""));

        cleanup_test_dir(temp_dir);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = create_test_dir();
        let store = ThemeEvolutionStore::new(&temp_dir);
        assert!(store.load().unwrap().is_empty());
        cleanup_test_dir(temp_dir);
    }
}
