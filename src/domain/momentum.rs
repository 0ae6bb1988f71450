use crate::domain::rollup::TickerRollup;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day-over-day direction of a ticker's mention count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MomentumTrend {
    Gaining,
    Stable,
    Losing,
}

impl fmt::Display for MomentumTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gaining => write!(f, "gaining"),
            Self::Stable => write!(f, "stable"),
            Self::Losing => write!(f, "losing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MomentumEntry {
    pub symbol: String,
    pub mentions: u32,
    pub previous: u32,
    pub rollup: TickerRollup,
}

impl MomentumEntry {
    /// Percentage change against the previous count, `None` without history.
    pub fn change_pct(&self) -> Option<f64> {
        if self.previous == 0 {
            return None;
        }
        let previous = f64::from(self.previous);
        Some((f64::from(self.mentions) - previous) / previous * 100.0)
    }
}

/// Full, untruncated buckets, each sorted by descending current mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MomentumReport {
    pub gaining: Vec<MomentumEntry>,
    pub stable: Vec<MomentumEntry>,
    pub losing: Vec<MomentumEntry>,
}

impl MomentumReport {
    pub fn bucket(&self, trend: MomentumTrend) -> &[MomentumEntry] {
        match trend {
            MomentumTrend::Gaining => &self.gaining,
            MomentumTrend::Stable => &self.stable,
            MomentumTrend::Losing => &self.losing,
        }
    }

    pub fn trend_of(&self, symbol: &str) -> Option<MomentumTrend> {
        [
            MomentumTrend::Gaining,
            MomentumTrend::Stable,
            MomentumTrend::Losing,
        ]
        .into_iter()
        .find(|&trend| self.bucket(trend).iter().any(|e| e.symbol == symbol))
    }

    pub fn len(&self) -> usize {
        self.gaining.len() + self.stable.len() + self.losing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mention count well above its rolling baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumSpike {
    pub symbol: String,
    pub current: u32,
    pub baseline: f64,
    pub ratio: f64,
}
