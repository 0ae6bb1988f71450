use chrono::NaiveDate;
use rotation_scanner::application::analysis::{
    MomentumComparator, SentimentClassifier, SignalAnalyzer, TextScanner, ThemeExtractor,
    TickerRollupBuilder,
};
use rotation_scanner::domain::catalog::TickerCatalog;
use rotation_scanner::domain::history::{HistoryRow, TickerHistory};
use rotation_scanner::domain::momentum::MomentumTrend;
use rotation_scanner::domain::record::TextRecord;
use rotation_scanner::domain::sentiment::SentimentLabel;
use rotation_scanner::domain::theme::ThemeDefinition;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn catalog() -> TickerCatalog {
    TickerCatalog::new(vec![
        ("Tier 1", vec!["ASTS", "RKLB", "D"]),
        ("Tier 2", vec!["SMR", "POET"]),
    ])
    .unwrap()
}

#[test]
fn test_two_record_asts_scenario() {
    let catalog = catalog();
    let themes = vec![ThemeDefinition::new("Space Connectivity", ["satellite"])];
    let scanner = TextScanner::new(&catalog).unwrap();
    let classifier = SentimentClassifier::new();
    let records = vec![
        TextRecord::new("q", "ASTS surged on bullish satellite news", "A"),
        TextRecord::new("q", "ASTS faces bearish downgrade risk", "B"),
    ];

    // "surged" and "bullish" are two positive terms, one short of the margin.
    assert_eq!(
        classifier.classify(&records[0].content),
        SentimentLabel::Neutral
    );
    // "bearish", "downgrade" and "risk" are three negative terms.
    assert_eq!(
        classifier.classify(&records[1].content),
        SentimentLabel::Negative
    );

    let aggregates = ThemeExtractor::new(&themes, &scanner, &classifier).extract(&records);
    let space = aggregates.get("Space Connectivity").unwrap();
    assert_eq!(space.mentions, 1);
    assert_eq!(space.sources, vec!["A"]);
    assert!(space.tickers.contains("ASTS"));

    let rollups =
        TickerRollupBuilder::new(&catalog, &scanner, &classifier).build(&records, &aggregates);
    let asts = rollups.get("ASTS").unwrap();
    assert_eq!(asts.mentions, 2);
    // One neutral, one negative: the tie goes to the label seen first.
    assert_eq!(asts.sentiment, SentimentLabel::Neutral);
    assert_eq!(asts.theme, "Space Connectivity");
    assert_eq!(asts.tier, "Tier 1");
}

#[test]
fn test_single_letter_ticker_word_boundary() {
    let scanner = TextScanner::new(&catalog()).unwrap();
    assert!(scanner.find_tickers("DATA center demand").is_empty());
    assert!(scanner.find_tickers("$D rallied").contains("D"));
}

#[test]
fn test_sentiment_margin_rule() {
    let classifier = SentimentClassifier::new();
    assert_eq!(
        classifier.classify("bullish breakout and strong"),
        SentimentLabel::Positive
    );
    assert_eq!(
        classifier.classify("bullish and strong"),
        SentimentLabel::Neutral
    );
}

#[test]
fn test_momentum_thresholds() {
    let comparator = MomentumComparator::default();
    assert_eq!(comparator.classify(120, 100), MomentumTrend::Stable);
    assert_eq!(comparator.classify(121, 100), MomentumTrend::Gaining);
    assert_eq!(comparator.classify(79, 100), MomentumTrend::Losing);
    assert_eq!(comparator.classify(80, 100), MomentumTrend::Stable);
    assert_eq!(comparator.classify(7, 0), MomentumTrend::Stable);
}

#[test]
fn test_stable_and_spiking_at_once() {
    let analyzer = SignalAnalyzer::new(
        catalog(),
        ThemeDefinition::defaults(),
        SentimentClassifier::new(),
        MomentumComparator::default(),
        30,
    )
    .unwrap();

    let template = HistoryRow {
        date: date("2026-10-15"),
        ticker: "POET".to_string(),
        mentions: 29,
        tier: "Tier 2".to_string(),
        theme: "Optical Interconnects".to_string(),
        sentiment: SentimentLabel::Neutral,
    };
    // 29 mentions yesterday, 1 on each of the ten days before: baseline 39/11
    let mut rows = vec![template.clone()];
    for day in 5..15 {
        rows.push(HistoryRow {
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            mentions: 1,
            ..template.clone()
        });
    }
    let history = TickerHistory::new(rows);

    let records: Vec<TextRecord> = (0..30)
        .map(|i| TextRecord::new("q", format!("POET photonics update {}", i), "Reddit"))
        .collect();

    let outcome = analyzer.analyze(&records, &history, date("2026-10-16"));

    assert_eq!(
        outcome.momentum.trend_of("POET"),
        Some(MomentumTrend::Stable)
    );
    assert_eq!(outcome.spikes.len(), 1);
    let spike = &outcome.spikes[0];
    assert_eq!(spike.current, 30);
    assert!((spike.baseline - 39.0 / 11.0).abs() < 1e-9);
    assert!((spike.ratio - 30.0 * 11.0 / 39.0).abs() < 1e-9);
}

#[test]
fn test_extraction_is_idempotent() {
    let catalog = catalog();
    let themes = ThemeDefinition::defaults();
    let scanner = TextScanner::new(&catalog).unwrap();
    let classifier = SentimentClassifier::new();
    let extractor = ThemeExtractor::new(&themes, &scanner, &classifier);
    let records = vec![
        TextRecord::new("q", "SMR and nuclear power generation", "Reuters"),
        TextRecord::new("q", "RKLB satellite launch", "Reddit"),
    ];

    assert_eq!(extractor.extract(&records), extractor.extract(&records));
}
