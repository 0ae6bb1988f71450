//! Markdown rendering of one analysis run.
//!
//! The renderer is the only place that truncates the momentum buckets; the
//! analysis outcome always carries every ticker.

use crate::application::analysis::AnalysisOutcome;
use crate::config::MomentumConfig;
use crate::domain::momentum::MomentumEntry;
use crate::domain::record::TextRecord;
use chrono::{DateTime, Utc};
use std::fmt;

const TOP_THEMES: usize = 10;
const SUMMARY_THEMES: usize = 3;
const MAX_FLAMES: u32 = 5;

pub struct MarkdownReport<'a> {
    outcome: &'a AnalysisOutcome,
    records: &'a [TextRecord],
    queries: &'a [String],
    limits: &'a MomentumConfig,
    generated_at: DateTime<Utc>,
}

impl<'a> MarkdownReport<'a> {
    pub fn new(
        outcome: &'a AnalysisOutcome,
        records: &'a [TextRecord],
        queries: &'a [String],
        limits: &'a MomentumConfig,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            outcome,
            records,
            queries,
            limits,
            generated_at,
        }
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Executive Summary")?;
        writeln!(f)?;
        writeln!(f, "- **Themes detected:** {}", self.outcome.themes.len())?;
        writeln!(f, "- **Tickers mentioned:** {}", self.outcome.rollups.len())?;
        match self.outcome.previous_date {
            Some(date) => writeln!(f, "- **Compared against:** {}", date)?,
            None => writeln!(f, "- **Compared against:** no prior history")?,
        }
        writeln!(f)?;

        let ranked = self.outcome.themes.ranked();
        if ranked.is_empty() {
            writeln!(f, "_No themes detected in this run._")?;
        } else {
            writeln!(f, "**Leading themes:**")?;
            writeln!(f)?;
            for (i, (name, aggregate)) in ranked.iter().take(SUMMARY_THEMES).enumerate() {
                writeln!(
                    f,
                    "{}. **{}** - {} mentions ({})",
                    i + 1,
                    name,
                    aggregate.mentions,
                    aggregate.dominant_sentiment().title()
                )?;
            }
        }
        writeln!(f)
    }

    fn write_themes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Top Themes")?;
        writeln!(f)?;

        let ranked = self.outcome.themes.ranked();
        if ranked.is_empty() {
            writeln!(f, "_No theme keywords matched._")?;
            return writeln!(f);
        }

        for (i, (name, aggregate)) in ranked.iter().take(TOP_THEMES).enumerate() {
            writeln!(f, "### {}. {}", i + 1, name)?;
            writeln!(f)?;
            writeln!(
                f,
                "- **Signal strength:** {} ({} mentions)",
                signal_strength(aggregate.mentions),
                aggregate.mentions
            )?;

            let tickers: Vec<&str> = aggregate.tickers.iter().map(String::as_str).collect();
            if tickers.is_empty() {
                writeln!(f, "- **Tickers:** none tracked")?;
            } else {
                writeln!(f, "- **Tickers:** {}", tickers.join(", "))?;
            }

            let tally = aggregate.tally();
            let total = tally.total();
            let breakdown: Vec<String> = tally
                .ranked()
                .into_iter()
                .map(|(label, count)| format!("{} {}", label.title(), percent(count, total)))
                .collect();
            writeln!(f, "- **Sentiment:** {}", breakdown.join(", "))?;
            writeln!(f, "- **Data points:** {}", aggregate.sources.len())?;
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_momentum(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let momentum = &self.outcome.momentum;

        writeln!(f, "## Ticker Momentum")?;
        writeln!(f)?;

        writeln!(f, "### 📈 Gaining")?;
        writeln!(f)?;
        if momentum.gaining.is_empty() {
            writeln!(f, "_No tickers gaining momentum._")?;
        } else {
            writeln!(f, "| Ticker | Mentions | Previous | Theme | Sentiment |")?;
            writeln!(f, "|--------|----------|----------|-------|-----------|")?;
            for entry in momentum.gaining.iter().take(self.limits.max_gaining) {
                writeln!(
                    f,
                    "| {} | {} | {} | {} | {} |",
                    entry.symbol,
                    entry.mentions,
                    entry.previous,
                    entry.rollup.theme,
                    entry.rollup.sentiment.title()
                )?;
            }
            write_overflow(f, &momentum.gaining, self.limits.max_gaining)?;
        }
        writeln!(f)?;

        writeln!(f, "### ➖ Stable")?;
        writeln!(f)?;
        if momentum.stable.is_empty() {
            writeln!(f, "_No stable tickers._")?;
        } else {
            writeln!(f, "| Ticker | Mentions | Theme | Sentiment |")?;
            writeln!(f, "|--------|----------|-------|-----------|")?;
            for entry in momentum.stable.iter().take(self.limits.max_stable) {
                writeln!(
                    f,
                    "| {} | {} | {} | {} |",
                    entry.symbol,
                    entry.mentions,
                    entry.rollup.theme,
                    entry.rollup.sentiment.title()
                )?;
            }
            write_overflow(f, &momentum.stable, self.limits.max_stable)?;
        }
        writeln!(f)?;

        writeln!(f, "### 📉 Losing")?;
        writeln!(f)?;
        if momentum.losing.is_empty() {
            writeln!(f, "_No tickers losing momentum._")?;
        } else {
            writeln!(f, "| Ticker | Mentions | Previous | Change |")?;
            writeln!(f, "|--------|----------|----------|--------|")?;
            for entry in momentum.losing.iter().take(self.limits.max_losing) {
                let change = entry
                    .change_pct()
                    .map_or_else(|| "N/A".to_string(), |pct| format!("{:+.0}%", pct));
                writeln!(
                    f,
                    "| {} | {} | {} | {} |",
                    entry.symbol, entry.mentions, entry.previous, change
                )?;
            }
            write_overflow(f, &momentum.losing, self.limits.max_losing)?;
        }
        writeln!(f)
    }

    fn write_spikes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Momentum Spikes")?;
        writeln!(f)?;

        if self.outcome.spikes.is_empty() {
            writeln!(
                f,
                "_No ticker reached {:.1}x its {}-day baseline._",
                self.limits.spike_ratio, self.limits.baseline_days
            )?;
            return writeln!(f);
        }

        writeln!(f, "| Ticker | Today | Baseline | Ratio |")?;
        writeln!(f, "|--------|-------|----------|-------|")?;
        for spike in &self.outcome.spikes {
            writeln!(
                f,
                "| 🚨 {} | {} | {:.1} | {:.2}x |",
                spike.symbol, spike.current, spike.baseline, spike.ratio
            )?;
        }
        writeln!(f)
    }

    fn write_risk(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Risk Management")?;
        writeln!(f)?;

        writeln!(f, "### Position Sizing")?;
        writeln!(f)?;
        writeln!(f, "- At most 5% of the portfolio in any single theme.")?;
        writeln!(f, "- At most 2% per ticker, 3% for Tier 1 names.")?;
        writeln!(f, "- Keep positions sourced from social chatter below 25% of the portfolio.")?;
        writeln!(f)?;

        writeln!(f, "### Red Flags")?;
        writeln!(f)?;
        writeln!(f, "- Hype language such as \"to the moon\" or \"can't lose\".")?;
        writeln!(f, "- Saturated mainstream coverage of a theme.")?;
        writeln!(f, "- Heavy insider selling.")?;
        writeln!(f, "- Deteriorating fundamentals behind a rising mention count.")?;
        writeln!(f)?;

        writeln!(f, "### Stop-Loss Discipline")?;
        writeln!(f)?;
        writeln!(f, "- Set stops 15-20% below entry.")?;
        writeln!(f, "- Switch to trailing stops once a position is up 50% or more.")?;
        writeln!(f, "- Re-evaluate any position down more than 30%.")?;
        writeln!(f)
    }

    fn write_sources(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Data Sources")?;
        writeln!(f)?;
        writeln!(f, "- **Records analyzed:** {}", self.records.len())?;

        let mut sources: Vec<&str> = Vec::new();
        for record in self.records {
            if !sources.contains(&record.source.as_str()) {
                sources.push(record.source.as_str());
            }
        }
        if !sources.is_empty() {
            writeln!(f, "- **Sources:** {}", sources.join(", "))?;
        }

        if !self.queries.is_empty() {
            writeln!(f, "- **Queries:**")?;
            for query in self.queries {
                writeln!(f, "  - {}", query)?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Capital Rotation Analysis - {}", self.outcome.date)?;
        writeln!(f)?;
        writeln!(
            f,
            "*Generated {} | {} records analyzed*",
            self.generated_at.format("%Y-%m-%d %H:%M UTC"),
            self.records.len()
        )?;
        writeln!(f)?;

        self.write_summary(f)?;
        self.write_themes(f)?;
        self.write_momentum(f)?;
        self.write_spikes(f)?;
        self.write_risk(f)?;
        self.write_sources(f)?;

        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(
            f,
            "*Disclaimer: generated automatically from public text for informational purposes only. \
             This is not financial advice. Online sentiment can be manipulated, so do your own research. \
             Past performance does not guarantee future results.*"
        )
    }
}

fn write_overflow(
    f: &mut fmt::Formatter<'_>,
    entries: &[MomentumEntry],
    shown: usize,
) -> fmt::Result {
    if entries.len() > shown {
        writeln!(f)?;
        writeln!(f, "_...and {} more._", entries.len() - shown)?;
    }
    Ok(())
}

/// One flame per mention, at least one and at most five.
fn signal_strength(mentions: u32) -> String {
    "🔥".repeat(mentions.clamp(1, MAX_FLAMES) as usize)
}

fn percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.0}%", count as f64 * 100.0 / total as f64)
}
