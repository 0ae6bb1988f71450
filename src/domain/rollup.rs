use crate::domain::sentiment::SentimentLabel;
use serde::{Deserialize, Serialize};

/// Theme label for a mentioned ticker that no theme claimed.
pub const MULTIPLE_THEMES: &str = "Multiple";

/// Per-ticker summary of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRollup {
    pub symbol: String,
    pub mentions: u32,
    pub sentiment: SentimentLabel,
    pub theme: String,
    pub tier: String,
}

/// Rollups for every ticker mentioned at least once, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerRollups {
    entries: Vec<TickerRollup>,
}

impl TickerRollups {
    pub fn get(&self, symbol: &str) -> Option<&TickerRollup> {
        self.entries.iter().find(|r| r.symbol == symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickerRollup> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TickerRollup> for TickerRollups {
    fn from_iter<T: IntoIterator<Item = TickerRollup>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TickerRollups {
    type Item = &'a TickerRollup;
    type IntoIter = std::slice::Iter<'a, TickerRollup>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
