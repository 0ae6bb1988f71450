use crate::domain::sentiment::{SentimentLabel, SentimentTally};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named investment narrative and the keywords that signal it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub name: String,
    pub keywords: Vec<String>,
}

impl ThemeDefinition {
    pub fn new<S: Into<String>>(name: S, keywords: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Case-insensitive substring match of any keyword against `text`.
    pub fn matches(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let text_lower = text.to_lowercase();
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && text_lower.contains(&k.to_lowercase()))
    }

    /// Built-in theme table, in rank order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "Space Connectivity",
                ["satellite", "space", "orbital", "ASTS", "direct-to-cell", "LEO"],
            ),
            Self::new(
                "Custom AI Chips",
                [
                    "ASIC",
                    "custom chip",
                    "AI accelerator",
                    "Broadcom",
                    "AVGO",
                    "alternative to nvidia",
                ],
            ),
            Self::new(
                "Optical Interconnects",
                ["optical", "photonics", "POET", "interconnect", "data center bandwidth"],
            ),
            Self::new(
                "Nuclear Energy for AI",
                [
                    "nuclear",
                    "SMR",
                    "small modular reactor",
                    "CEG",
                    "power generation",
                    "data center power",
                ],
            ),
            Self::new(
                "Quantum Computing",
                ["quantum", "qubit", "IONQ", "RGTI", "quantum computing"],
            ),
            Self::new(
                "Reddit Platform",
                ["RDDT", "reddit stock", "social media AI", "data monetization"],
            ),
            Self::new(
                "Copper & Materials",
                ["copper", "FCX", "critical materials", "electrification"],
            ),
            Self::new(
                "Healthcare AI",
                ["biotech", "healthcare AI", "drug discovery", "NBIS"],
            ),
            Self::new(
                "Small Cap Value",
                ["small cap", "insider buying", "value rotation", "Russell 2000"],
            ),
        ]
    }
}

/// Per-theme accumulator for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeAggregate {
    pub mentions: u32,
    pub tickers: BTreeSet<String>,
    pub sentiments: Vec<SentimentLabel>,
    pub sources: Vec<String>,
}

impl ThemeAggregate {
    pub fn tally(&self) -> SentimentTally {
        self.sentiments.iter().copied().collect()
    }

    pub fn dominant_sentiment(&self) -> SentimentLabel {
        self.tally().most_common().unwrap_or_default()
    }
}

/// Theme aggregates keyed by name, kept in theme-table order.
///
/// Themes that were never hit are not present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeAggregates {
    entries: Vec<(String, ThemeAggregate)>,
}

impl ThemeAggregates {
    pub fn get(&self, name: &str) -> Option<&ThemeAggregate> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, aggregate)| aggregate)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThemeAggregate)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    /// Themes by descending mentions; equal counts keep table order.
    pub fn ranked(&self) -> Vec<(&str, &ThemeAggregate)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.mentions.cmp(&a.1.mentions));
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ThemeAggregate)> for ThemeAggregates {
    fn from_iter<T: IntoIterator<Item = (String, ThemeAggregate)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
