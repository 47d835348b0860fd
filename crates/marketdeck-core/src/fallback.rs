//! Static fallback quotes.
//!
//! Tickers in this table are answered from a fixed seed instead of the
//! backend, cutting call volume against rate-limited upstream providers.
//! The table is configuration data: adding a seed is a data change, not a
//! control-flow change, and tests can inject an empty table to force every
//! symbol onto the network path.

use std::collections::HashMap;

use crate::domain::{Quote, Symbol};

/// Symbol-keyed table of static quotes served without any network call.
#[derive(Debug, Clone)]
pub struct FallbackSeeds {
    seeds: HashMap<String, Quote>,
}

impl FallbackSeeds {
    pub fn new(seeds: impl IntoIterator<Item = Quote>) -> Self {
        Self {
            seeds: seeds
                .into_iter()
                .map(|quote| (quote.symbol.as_str().to_owned(), quote))
                .collect(),
        }
    }

    /// A table with no seeds: every ticker takes the network path.
    pub fn empty() -> Self {
        Self {
            seeds: HashMap::new(),
        }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Quote> {
        self.seeds.get(symbol.as_str())
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.seeds.contains_key(symbol.as_str())
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}

impl Default for FallbackSeeds {
    fn default() -> Self {
        Self::new([apple_seed()])
    }
}

fn apple_seed() -> Quote {
    let symbol = Symbol::parse("AAPL").expect("seed symbol is valid");
    let mut quote = Quote::new(symbol, "Apple Inc.", 227.52, 1.13, 0.50)
        .expect("seed quote is valid");

    quote.market_cap = Some(3_459_000_000_000.0);
    quote.pe_ratio = Some(34.6);
    quote.volume = Some(44_823_100);
    quote.week_high_52 = Some(260.10);
    quote.week_low_52 = Some(169.21);
    quote.eps = Some(6.57);
    quote.beta = Some(1.24);
    quote.dividend_yield = Some(0.0044);
    quote.peg_ratio = Some(2.9);
    quote.sector = Some(String::from("Technology"));
    quote.industry = Some(String::from("Consumer Electronics"));
    quote.description = Some(String::from(
        "Apple Inc. designs, manufactures and markets smartphones, personal \
         computers, tablets, wearables and accessories worldwide.",
    ));

    quote
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_seeds_aapl() {
        let seeds = FallbackSeeds::default();
        let symbol = Symbol::parse("aapl").expect("valid");
        let quote = seeds.get(&symbol).expect("AAPL is seeded");
        assert_eq!(quote.company_name, "Apple Inc.");
        assert_eq!(seeds.len(), 1);
    }

    #[test]
    fn empty_table_matches_nothing() {
        let seeds = FallbackSeeds::empty();
        let symbol = Symbol::parse("AAPL").expect("valid");
        assert!(!seeds.contains(&symbol));
    }
}
