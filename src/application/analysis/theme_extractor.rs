use crate::application::analysis::sentiment_classifier::SentimentClassifier;
use crate::application::analysis::text_scanner::TextScanner;
use crate::domain::record::TextRecord;
use crate::domain::theme::{ThemeAggregate, ThemeAggregates, ThemeDefinition};

/// Aggregates collected records per investment theme.
pub struct ThemeExtractor<'a> {
    themes: &'a [ThemeDefinition],
    scanner: &'a TextScanner,
    classifier: &'a SentimentClassifier,
}

impl<'a> ThemeExtractor<'a> {
    pub fn new(
        themes: &'a [ThemeDefinition],
        scanner: &'a TextScanner,
        classifier: &'a SentimentClassifier,
    ) -> Self {
        Self {
            themes,
            scanner,
            classifier,
        }
    }

    /// A record hits a theme when any of its keywords appears in the content.
    /// Each hit counts once per record, however many keywords matched.
    pub fn extract(&self, records: &[TextRecord]) -> ThemeAggregates {
        let mut slots: Vec<Option<ThemeAggregate>> = vec![None; self.themes.len()];

        for record in records {
            let content = record.content.as_str();
            let hits: Vec<usize> = self
                .themes
                .iter()
                .enumerate()
                .filter(|(_, theme)| theme.matches(content))
                .map(|(index, _)| index)
                .collect();
            if hits.is_empty() {
                continue;
            }

            let sentiment = self.classifier.classify(content);
            let tickers = self.scanner.find_tickers(content);

            for index in hits {
                let aggregate = slots[index].get_or_insert_with(ThemeAggregate::default);
                aggregate.mentions += 1;
                aggregate.sentiments.push(sentiment);
                aggregate.sources.push(record.source.clone());
                aggregate.tickers.extend(tickers.iter().cloned());
            }
        }

        self.themes
            .iter()
            .zip(slots)
            .filter_map(|(theme, slot)| slot.map(|aggregate| (theme.name.clone(), aggregate)))
            .collect()
    }
}
