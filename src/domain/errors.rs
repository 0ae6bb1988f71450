use thiserror::Error;

/// Errors raised while building the ticker catalog from configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid ticker symbol '{symbol}' in tier '{tier}': {reason}")]
    InvalidSymbol {
        tier: String,
        symbol: String,
        reason: String,
    },

    #[error("Ticker {symbol} is listed in both '{first_tier}' and '{second_tier}'")]
    DuplicateSymbol {
        symbol: String,
        first_tier: String,
        second_tier: String,
    },
}

/// Errors related to persisted ticker history rows
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Invalid history date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid mention count '{value}' for {ticker}")]
    InvalidMentions { ticker: String, value: String },

    #[error("Unknown sentiment label '{value}'")]
    UnknownSentiment { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_formatting() {
        let error = CatalogError::DuplicateSymbol {
            symbol: "ASTS".to_string(),
            first_tier: "Tier 1".to_string(),
            second_tier: "Tier 2".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("ASTS"));
        assert!(msg.contains("Tier 1"));
        assert!(msg.contains("Tier 2"));
    }

    #[test]
    fn test_history_error_formatting() {
        let error = HistoryError::InvalidMentions {
            ticker: "POET".to_string(),
            value: "many".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("POET"));
        assert!(msg.contains("many"));
    }
}
