//! Tracked ticker universe, grouped by conviction tier.
//!
//! The tier is a label only: it never changes how a symbol is matched.

use crate::domain::errors::CatalogError;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

const MAX_SYMBOL_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub name: String,
    pub symbols: Vec<String>,
}

/// Ordered tier → symbols mapping. Each symbol belongs to exactly one tier.
///
/// Deserializes from a `{ tier_name = [symbols] }` table. Tiers and symbols
/// keep the order they were listed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerCatalog {
    tiers: Vec<Tier>,
    owners: HashMap<String, usize>,
}

impl TickerCatalog {
    pub fn new<I, S>(tiers: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let mut catalog = Self::default();

        for (name, symbols) in tiers {
            let name = name.into();
            let index = catalog.tiers.len();
            let mut tier = Tier {
                name: name.clone(),
                symbols: Vec::new(),
            };

            for raw in symbols {
                let symbol = normalize_symbol(&name, raw.into())?;
                if let Some(&owner) = catalog.owners.get(&symbol) {
                    if owner == index {
                        continue;
                    }
                    return Err(CatalogError::DuplicateSymbol {
                        symbol,
                        first_tier: catalog.tiers[owner].name.clone(),
                        second_tier: name,
                    });
                }
                catalog.owners.insert(symbol.clone(), index);
                tier.symbols.push(symbol);
            }

            catalog.tiers.push(tier);
        }

        Ok(catalog)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// All tracked symbols, tier by tier.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.tiers
            .iter()
            .flat_map(|t| t.symbols.iter().map(String::as_str))
    }

    pub fn tier_of(&self, symbol: &str) -> Option<&str> {
        self.owners
            .get(symbol)
            .map(|&index| self.tiers[index].name.as_str())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.owners.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl Serialize for TickerCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tiers.len()))?;
        for tier in &self.tiers {
            map.serialize_entry(&tier.name, &tier.symbols)?;
        }
        map.end()
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = TickerCatalog;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of tier names to symbol lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut tiers: Vec<(String, Vec<String>)> = Vec::new();
        while let Some((name, symbols)) = access.next_entry::<String, Vec<String>>()? {
            tiers.push((name, symbols));
        }
        TickerCatalog::new(tiers).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for TickerCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

fn normalize_symbol(tier: &str, raw: String) -> Result<String, CatalogError> {
    let symbol = raw.trim().to_ascii_uppercase();
    let invalid = |reason: &str| CatalogError::InvalidSymbol {
        tier: tier.to_string(),
        symbol: raw.clone(),
        reason: reason.to_string(),
    };

    if symbol.is_empty() {
        return Err(invalid("symbol is empty"));
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(invalid("symbol is longer than 5 characters"));
    }
    if !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("symbol must be alphanumeric"));
    }

    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> TickerCatalog {
        TickerCatalog::new(vec![
            ("Tier 1", vec!["ASTS", "RKLB", "D"]),
            ("Tier 2", vec!["IONQ", "rddt"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_symbols_follow_tier_order() {
        let catalog = sample_catalog();
        let symbols: Vec<&str> = catalog.symbols().collect();
        assert_eq!(symbols, vec!["ASTS", "RKLB", "D", "IONQ", "RDDT"]);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_tier_lookup() {
        let catalog = sample_catalog();
        assert_eq!(catalog.tier_of("D"), Some("Tier 1"));
        assert_eq!(catalog.tier_of("RDDT"), Some("Tier 2"));
        assert_eq!(catalog.tier_of("NVDA"), None);
    }

    #[test]
    fn test_duplicate_across_tiers_rejected() {
        let result = TickerCatalog::new(vec![("Tier 1", vec!["ASTS"]), ("Tier 2", vec!["asts"])]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateSymbol {
                symbol: "ASTS".to_string(),
                first_tier: "Tier 1".to_string(),
                second_tier: "Tier 2".to_string(),
            }
        );
    }

    #[test]
    fn test_repeated_symbol_within_tier_is_collapsed() {
        let catalog = TickerCatalog::new(vec![("Tier 1", vec!["POET", "POET"])]).unwrap();
        assert_eq!(catalog.symbols().count(), 1);
    }

    #[test]
    fn test_invalid_symbols_rejected() {
        assert!(TickerCatalog::new(vec![("Tier 1", vec!["TOOLONG"])]).is_err());
        assert!(TickerCatalog::new(vec![("Tier 1", vec!["BRK.B"])]).is_err());
        assert!(TickerCatalog::new(vec![("Tier 1", vec!["  "])]).is_err());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = TickerCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.symbols().count(), 0);
    }

    #[test]
    fn test_deserialize_keeps_listed_tier_order() {
        let catalog: TickerCatalog = toml::from_str(
            "\"Tier 2\" = [\"FCX\"]\n\"Tier 10\" = [\"EBF\"]\n\"Tier 1\" = [\"ASTS\", \"SMR\"]\n",
        )
        .unwrap();
        let tiers: Vec<&str> = catalog.tiers().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tiers, vec!["Tier 2", "Tier 10", "Tier 1"]);
        let symbols: Vec<&str> = catalog.symbols().collect();
        assert_eq!(symbols, vec!["FCX", "EBF", "ASTS", "SMR"]);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_symbol() {
        let result: Result<TickerCatalog, _> =
            toml::from_str("\"Tier 1\" = [\"ASTS\"]\n\"Tier 2\" = [\"asts\"]\n");
        assert!(result.unwrap_err().to_string().contains("ASTS"));
    }
}
