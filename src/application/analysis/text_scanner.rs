use crate::domain::catalog::TickerCatalog;
use regex::Regex;
use std::collections::BTreeSet;

/// Finds tracked ticker symbols in free text.
///
/// Symbols match as whole words only, so `D` is found in "$D rallied" and
/// "D shares" but not in "DATA". Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct TextScanner {
    pattern: Option<Regex>,
}

impl TextScanner {
    pub fn new(catalog: &TickerCatalog) -> Result<Self, regex::Error> {
        let mut symbols: Vec<&str> = catalog.symbols().collect();
        if symbols.is_empty() {
            return Ok(Self { pattern: None });
        }

        // Longest first so the alternation never settles on a prefix.
        symbols.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let alternation = symbols
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\$?\b({})\b", alternation))?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Distinct tracked symbols mentioned in `text`.
    pub fn find_tickers(&self, text: &str) -> BTreeSet<String> {
        let Some(pattern) = &self.pattern else {
            return BTreeSet::new();
        };
        if text.is_empty() {
            return BTreeSet::new();
        }

        let text_upper = text.to_uppercase();
        pattern
            .captures_iter(&text_upper)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(symbols: Vec<&str>) -> TextScanner {
        let catalog = TickerCatalog::new(vec![("Tier 1", symbols)]).unwrap();
        TextScanner::new(&catalog).unwrap()
    }

    fn set(symbols: &[&str]) -> BTreeSet<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_letter_symbol_respects_word_boundaries() {
        let scanner = scanner(vec!["D"]);
        assert!(scanner.find_tickers("DATA center buildout").is_empty());
        assert_eq!(scanner.find_tickers("the stock $D rallied"), set(&["D"]));
        assert_eq!(scanner.find_tickers("Dominion (D) reports"), set(&["D"]));
    }

    #[test]
    fn test_case_insensitive_and_deduplicated() {
        let scanner = scanner(vec!["ASTS", "RKLB"]);
        let found = scanner.find_tickers("asts up, ASTS again, $Asts, and rklb too");
        assert_eq!(found, set(&["ASTS", "RKLB"]));
    }

    #[test]
    fn test_no_substring_matches() {
        let scanner = scanner(vec!["SMR", "CEG"]);
        assert!(scanner.find_tickers("SMRT devices and CEGX").is_empty());
        assert_eq!(scanner.find_tickers("SMR-backed grid"), set(&["SMR"]));
    }

    #[test]
    fn test_overlapping_symbols() {
        let scanner = scanner(vec!["META", "MET"]);
        assert_eq!(scanner.find_tickers("META and MET"), set(&["META", "MET"]));
        assert_eq!(scanner.find_tickers("METAL prices"), set(&[]));
    }

    #[test]
    fn test_empty_inputs() {
        let scanner = scanner(vec!["ASTS"]);
        assert!(scanner.find_tickers("").is_empty());

        let empty = TextScanner::new(&TickerCatalog::default()).unwrap();
        assert!(empty.find_tickers("ASTS to the moon").is_empty());
    }
}
