use crate::config::MomentumConfig;
use crate::domain::history::HistorySnapshot;
use crate::domain::momentum::{MomentumEntry, MomentumReport, MomentumSpike, MomentumTrend};
use crate::domain::rollup::TickerRollups;
use std::collections::BTreeMap;

/// Compares current mention counts against history.
///
/// Two independent signals are produced: a day-over-day trend against the
/// latest snapshot, and a spike flag against a longer rolling baseline. A
/// ticker can be stable day-over-day and spiking at the same time.
#[derive(Debug, Clone)]
pub struct MomentumComparator {
    gain_ratio: f64,
    loss_ratio: f64,
    spike_ratio: f64,
}

impl MomentumComparator {
    pub fn new(config: &MomentumConfig) -> Self {
        Self {
            gain_ratio: config.gain_ratio,
            loss_ratio: config.loss_ratio,
            spike_ratio: config.spike_ratio,
        }
    }

    /// A ticker without history (`previous == 0`) is stable, never gaining.
    pub fn classify(&self, current: u32, previous: u32) -> MomentumTrend {
        if previous == 0 {
            return MomentumTrend::Stable;
        }

        let current = f64::from(current);
        let previous = f64::from(previous);

        if current > previous * self.gain_ratio {
            MomentumTrend::Gaining
        } else if current < previous * self.loss_ratio {
            MomentumTrend::Losing
        } else {
            MomentumTrend::Stable
        }
    }

    /// Buckets every rollup; each bucket is sorted by descending mentions and
    /// left untruncated.
    pub fn compare(
        &self,
        current: &TickerRollups,
        previous: Option<&HistorySnapshot>,
    ) -> MomentumReport {
        let mut report = MomentumReport::default();

        for rollup in current {
            let prev = previous.map_or(0, |s| s.mentions_for(&rollup.symbol));
            let entry = MomentumEntry {
                symbol: rollup.symbol.clone(),
                mentions: rollup.mentions,
                previous: prev,
                rollup: rollup.clone(),
            };

            match self.classify(rollup.mentions, prev) {
                MomentumTrend::Gaining => report.gaining.push(entry),
                MomentumTrend::Stable => report.stable.push(entry),
                MomentumTrend::Losing => report.losing.push(entry),
            }
        }

        for bucket in [
            &mut report.gaining,
            &mut report.stable,
            &mut report.losing,
        ] {
            bucket.sort_by(|a, b| b.mentions.cmp(&a.mentions));
        }

        report
    }

    /// Flags `current >= spike_ratio * baseline` for a positive baseline.
    pub fn detect_spike(
        &self,
        symbol: &str,
        current: u32,
        baseline: f64,
    ) -> Option<MomentumSpike> {
        if baseline.is_nan() || baseline <= 0.0 {
            return None;
        }

        let current_f = f64::from(current);
        if current_f < self.spike_ratio * baseline {
            return None;
        }

        Some(MomentumSpike {
            symbol: symbol.to_string(),
            current,
            baseline,
            ratio: current_f / baseline,
        })
    }

    /// Spikes among the current rollups, strongest first.
    pub fn detect_spikes(
        &self,
        current: &TickerRollups,
        baselines: &BTreeMap<String, f64>,
    ) -> Vec<MomentumSpike> {
        let mut spikes: Vec<MomentumSpike> = current
            .iter()
            .filter_map(|rollup| {
                let baseline = baselines.get(&rollup.symbol)?;
                self.detect_spike(&rollup.symbol, rollup.mentions, *baseline)
            })
            .collect();
        spikes.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
        spikes
    }
}

impl Default for MomentumComparator {
    fn default() -> Self {
        Self::new(&MomentumConfig::default())
    }
}
