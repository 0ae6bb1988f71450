use crate::domain::errors::HistoryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Capitalized form used in report prose.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" | "" => Ok(Self::Neutral),
            _ => Err(HistoryError::UnknownSentiment {
                value: s.to_string(),
            }),
        }
    }
}

/// Label counts that remember the order in which labels were first seen.
///
/// `most_common` breaks ties in favour of the earliest label, which a plain
/// hash-based counter cannot do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentTally {
    counts: Vec<(SentimentLabel, usize)>,
}

impl SentimentTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: SentimentLabel) {
        match self.counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((label, 1)),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Most frequent label; the first-seen label wins a tie.
    pub fn most_common(&self) -> Option<SentimentLabel> {
        let mut best: Option<(SentimentLabel, usize)> = None;
        for &(label, count) in &self.counts {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((label, count)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// All labels by descending count, ties in first-seen order.
    pub fn ranked(&self) -> Vec<(SentimentLabel, usize)> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl FromIterator<SentimentLabel> for SentimentTally {
    fn from_iter<T: IntoIterator<Item = SentimentLabel>>(iter: T) -> Self {
        let mut tally = Self::new();
        for label in iter {
            tally.add(label);
        }
        tally
    }
}

/// Stable mode of a label sequence, `Neutral` when empty.
pub fn dominant_sentiment(labels: &[SentimentLabel]) -> SentimentLabel {
    labels
        .iter()
        .copied()
        .collect::<SentimentTally>()
        .most_common()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use SentimentLabel::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("positive".parse::<SentimentLabel>().unwrap(), Positive);
        assert_eq!("Negative".parse::<SentimentLabel>().unwrap(), Negative);
        assert_eq!("".parse::<SentimentLabel>().unwrap(), Neutral);
        assert!("euphoric".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Positive.to_string(), "positive");
        assert_eq!(Neutral.title(), "Neutral");
    }

    #[test]
    fn test_most_common_prefers_first_seen_on_tie() {
        assert_eq!(dominant_sentiment(&[Positive, Neutral]), Positive);
        assert_eq!(dominant_sentiment(&[Neutral, Positive]), Neutral);
        assert_eq!(
            dominant_sentiment(&[Negative, Positive, Positive, Negative]),
            Negative
        );
    }

    #[test]
    fn test_most_common_clear_winner() {
        assert_eq!(
            dominant_sentiment(&[Neutral, Positive, Positive, Negative]),
            Positive
        );
    }

    #[test]
    fn test_empty_is_neutral() {
        assert_eq!(dominant_sentiment(&[]), Neutral);
        assert!(SentimentTally::new().most_common().is_none());
    }

    #[test]
    fn test_ranked_is_stable() {
        let tally: SentimentTally = [Negative, Positive, Neutral, Positive].into_iter().collect();
        assert_eq!(tally.total(), 4);
        assert_eq!(
            tally.ranked(),
            vec![(Positive, 2), (Negative, 1), (Neutral, 1)]
        );
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Negative).unwrap(), "\"negative\"");
    }
}
