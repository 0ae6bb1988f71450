//! Keyword-count sentiment classification for collected text.
//!
//! A text is positive only when its distinct positive keywords outnumber the
//! distinct negative ones by more than two (and symmetrically for negative).
//! A single incidental keyword therefore never flips the label.
//!
//! # Example
//! ```rust,ignore
//! use rotation_scanner::application::analysis::SentimentClassifier;
//! use rotation_scanner::domain::sentiment::SentimentLabel;
//!
//! let classifier = SentimentClassifier::new();
//! let label = classifier.classify("Bullish breakout, strong rally ahead");
//! assert_eq!(label, SentimentLabel::Positive);
//! ```

use crate::config::SentimentConfig;
use crate::domain::sentiment::SentimentLabel;

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "bullish",
    "surge",
    "gain",
    "growth",
    "momentum",
    "upgrade",
    "strong",
    "rally",
    "breakout",
    "buy",
    "opportunity",
    "catalyst",
    "outperform",
    "beating",
    "revenue growth",
    "partnership",
];

pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "bearish",
    "decline",
    "loss",
    "drop",
    "downgrade",
    "weak",
    "risk",
    "concern",
    "warning",
    "overvalued",
    "sell",
    "miss",
];

/// Required lead of one side over the other.
const MARGIN: usize = 2;

#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl SentimentClassifier {
    /// Classifier with the built-in financial keyword lists.
    pub fn new() -> Self {
        Self::with_keywords(
            POSITIVE_KEYWORDS.iter().copied(),
            NEGATIVE_KEYWORDS.iter().copied(),
        )
    }

    pub fn with_keywords<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Self {
            positive: normalize(positive),
            negative: normalize(negative),
        }
    }

    pub fn from_config(config: &SentimentConfig) -> Self {
        let positive = match &config.positive {
            Some(words) => normalize(words),
            None => normalize(POSITIVE_KEYWORDS.iter().copied()),
        };
        let negative = match &config.negative {
            Some(words) => normalize(words),
            None => normalize(NEGATIVE_KEYWORDS.iter().copied()),
        };
        Self { positive, negative }
    }

    /// Number of distinct positive and negative keywords contained in `text`.
    pub fn keyword_counts(&self, text: &str) -> (usize, usize) {
        let text_lower = text.to_lowercase();
        let count = |words: &[String]| {
            words
                .iter()
                .filter(|w| text_lower.contains(w.as_str()))
                .count()
        };
        (count(&self.positive), count(&self.negative))
    }

    pub fn classify(&self, text: &str) -> SentimentLabel {
        if text.trim().is_empty() {
            return SentimentLabel::Neutral;
        }

        let (positive, negative) = self.keyword_counts(text);
        if positive > negative + MARGIN {
            SentimentLabel::Positive
        } else if negative > positive + MARGIN {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-cases, drops blanks and repeats so every keyword counts once.
fn normalize<I>(words: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for word in words {
        let word = word.as_ref().trim().to_lowercase();
        if !word.is_empty() && !out.contains(&word) {
            out.push(word);
        }
    }
    out
}
