use crate::application::analysis::sentiment_classifier::SentimentClassifier;
use crate::application::analysis::text_scanner::TextScanner;
use crate::domain::catalog::TickerCatalog;
use crate::domain::record::TextRecord;
use crate::domain::rollup::{MULTIPLE_THEMES, TickerRollup, TickerRollups};
use crate::domain::sentiment::{SentimentLabel, dominant_sentiment};
use crate::domain::theme::ThemeAggregates;
use std::collections::BTreeSet;

/// Builds the per-ticker summary of a run.
pub struct TickerRollupBuilder<'a> {
    catalog: &'a TickerCatalog,
    scanner: &'a TextScanner,
    classifier: &'a SentimentClassifier,
}

impl<'a> TickerRollupBuilder<'a> {
    pub fn new(
        catalog: &'a TickerCatalog,
        scanner: &'a TextScanner,
        classifier: &'a SentimentClassifier,
    ) -> Self {
        Self {
            catalog,
            scanner,
            classifier,
        }
    }

    /// A ticker's mentions are the number of records naming it; repeats inside
    /// one record do not count. Its theme is the first aggregate, in theme
    /// table order, whose ticker set holds it.
    pub fn build(&self, records: &[TextRecord], themes: &ThemeAggregates) -> TickerRollups {
        let scanned: Vec<(BTreeSet<String>, SentimentLabel)> = records
            .iter()
            .map(|r| {
                let tickers = self.scanner.find_tickers(&r.content);
                let sentiment = if tickers.is_empty() {
                    SentimentLabel::Neutral
                } else {
                    self.classifier.classify(&r.content)
                };
                (tickers, sentiment)
            })
            .collect();

        self.catalog
            .symbols()
            .filter_map(|symbol| {
                let sentiments: Vec<SentimentLabel> = scanned
                    .iter()
                    .filter(|(tickers, _)| tickers.contains(symbol))
                    .map(|(_, sentiment)| *sentiment)
                    .collect();
                if sentiments.is_empty() {
                    return None;
                }

                let theme = themes
                    .iter()
                    .find(|(_, aggregate)| aggregate.tickers.contains(symbol))
                    .map_or(MULTIPLE_THEMES, |(name, _)| name);

                Some(TickerRollup {
                    symbol: symbol.to_string(),
                    mentions: u32::try_from(sentiments.len()).unwrap_or(u32::MAX),
                    sentiment: dominant_sentiment(&sentiments),
                    theme: theme.to_string(),
                    tier: self.catalog.tier_of(symbol).unwrap_or_default().to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analysis::theme_extractor::ThemeExtractor;
    use crate::domain::theme::ThemeDefinition;

    fn catalog() -> TickerCatalog {
        TickerCatalog::new(vec![
            ("Tier 1", vec!["ASTS", "SMR", "D"]),
            ("Tier 2", vec!["IONQ", "FCX"]),
        ])
        .unwrap()
    }

    fn build(records: &[TextRecord], themes: &[ThemeDefinition]) -> TickerRollups {
        let catalog = catalog();
        let scanner = TextScanner::new(&catalog).unwrap();
        let classifier = SentimentClassifier::new();
        let aggregates = ThemeExtractor::new(themes, &scanner, &classifier).extract(records);
        TickerRollupBuilder::new(&catalog, &scanner, &classifier).build(records, &aggregates)
    }

    #[test]
    fn test_mentions_count_records_not_occurrences() {
        let records = vec![TextRecord::new(
            "q",
            "ASTS ASTS ASTS $ASTS asts everywhere",
            "Reddit",
        )];
        let rollups = build(&records, &[]);
        assert_eq!(rollups.get("ASTS").unwrap().mentions, 1);
    }

    #[test]
    fn test_unmentioned_tickers_omitted() {
        let records = vec![
            TextRecord::new("q", "SMR permits approved", "Reuters"),
            TextRecord::new("q", "SMR and IONQ", "Reddit"),
        ];
        let rollups = build(&records, &[]);
        assert_eq!(rollups.len(), 2);
        assert_eq!(rollups.get("SMR").unwrap().mentions, 2);
        assert!(rollups.get("ASTS").is_none());
        assert!(rollups.get("D").is_none());
    }

    #[test]
    fn test_rollups_follow_catalog_order() {
        let records = vec![TextRecord::new("q", "FCX, IONQ, D and ASTS", "Reddit")];
        let rollups = build(&records, &[]);
        let symbols: Vec<&str> = rollups.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ASTS", "D", "IONQ", "FCX"]);
    }

    #[test]
    fn test_tier_and_unclaimed_theme() {
        let records = vec![TextRecord::new("q", "IONQ jumps", "Reddit")];
        let rollups = build(&records, &[ThemeDefinition::new("Space", ["satellite"])]);
        let ionq = rollups.get("IONQ").unwrap();
        assert_eq!(ionq.tier, "Tier 2");
        assert_eq!(ionq.theme, MULTIPLE_THEMES);
    }

    #[test]
    fn test_first_theme_in_table_order_wins() {
        let themes = vec![
            ThemeDefinition::new("Nuclear Energy for AI", ["nuclear"]),
            ThemeDefinition::new("Copper & Materials", ["copper"]),
        ];
        // The copper record comes first, the table order still decides.
        let records = vec![
            TextRecord::new("q", "FCX copper demand", "Reddit"),
            TextRecord::new("q", "FCX supplies nuclear builds", "Reddit"),
        ];
        let rollups = build(&records, &themes);
        assert_eq!(rollups.get("FCX").unwrap().theme, "Nuclear Energy for AI");
    }

    #[test]
    fn test_sentiment_is_stable_mode() {
        let records = vec![
            TextRecord::new("q", "SMR bearish downgrade risk", "Reddit"),
            TextRecord::new("q", "SMR bullish breakout with strong momentum", "Reddit"),
        ];
        let rollups = build(&records, &[]);
        assert_eq!(rollups.get("SMR").unwrap().sentiment, SentimentLabel::Negative);
    }
}
