// Text matching and classification
pub mod sentiment_classifier;
pub mod text_scanner;

// Aggregation per theme and per ticker
pub mod theme_extractor;
pub mod ticker_rollup;

// Day-over-day trend and spike detection
pub mod momentum_comparator;

// Full analysis run
pub mod signal_analyzer;

pub use momentum_comparator::MomentumComparator;
pub use sentiment_classifier::SentimentClassifier;
pub use signal_analyzer::{AnalysisOutcome, SignalAnalyzer};
pub use text_scanner::TextScanner;
pub use theme_extractor::ThemeExtractor;
pub use ticker_rollup::TickerRollupBuilder;
