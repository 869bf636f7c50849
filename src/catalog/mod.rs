use serde::Serialize;
use std::collections::HashMap;

/// A known ticker with its company name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerEntry {
    pub ticker: String,
    pub name: String,
}

const DEFAULT_TICKERS: &[(&str, &str)] = &[
    ("BBCA.JK", "Bank Central Asia"),
    ("BBRI.JK", "Bank Rakyat Indonesia"),
    ("BMRI.JK", "Bank Mandiri"),
    ("BBNI.JK", "Bank Negara Indonesia"),
    ("TLKM.JK", "Telkom Indonesia"),
    ("ASII.JK", "Astra International"),
    ("GOTO.JK", "GoTo Gojek Tokopedia"),
    ("UNVR.JK", "Unilever Indonesia"),
    ("ICBP.JK", "Indofood CBP"),
    ("ADRO.JK", "Adaro Energy"),
    ("ANTM.JK", "Aneka Tambang"),
];

/// Curated ticker list, used for labels only.
///
/// Whether a ticker is valid is up to the market-data supplier; tickers
/// missing from the catalog are labelled with the ticker itself.
#[derive(Debug, Clone)]
pub struct TickerCatalog {
    entries: Vec<TickerEntry>,
    // normalized ticker -> position in `entries`
    ticker_index: HashMap<String, usize>,
}

impl TickerCatalog {
    /// Catalog with the default IDX blue chips.
    pub fn new() -> Self {
        Self::new_with_entries(
            DEFAULT_TICKERS
                .iter()
                .map(|(ticker, name)| TickerEntry {
                    ticker: ticker.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        )
    }

    pub fn new_with_entries(entries: Vec<TickerEntry>) -> Self {
        let mut catalog = Self {
            entries,
            ticker_index: HashMap::new(),
        };
        catalog.rebuild_index();
        catalog
    }

    pub fn entries(&self) -> &[TickerEntry] {
        &self.entries
    }

    pub fn get(&self, ticker: &str) -> Option<&TickerEntry> {
        self.ticker_index
            .get(&normalize(ticker))
            .map(|&idx| &self.entries[idx])
    }

    /// Company name for `ticker`, or the ticker itself when unknown.
    pub fn display_name(&self, ticker: &str) -> String {
        self.get(ticker)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| ticker.to_string())
    }

    fn rebuild_index(&mut self) {
        self.ticker_index.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            self.ticker_index.insert(normalize(&entry.ticker), i);
        }
    }
}

impl Default for TickerCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ticker_uses_company_name() {
        let catalog = TickerCatalog::new();
        assert_eq!(catalog.entries().len(), 11);
        assert_eq!(catalog.display_name("BBCA.JK"), "Bank Central Asia");
        assert_eq!(catalog.display_name(" tlkm.jk"), "Telkom Indonesia");
    }

    #[test]
    fn unknown_ticker_falls_back_to_itself() {
        let catalog = TickerCatalog::new();
        assert!(catalog.get("KLBF.JK").is_none());
        assert_eq!(catalog.display_name("KLBF.JK"), "KLBF.JK");
    }

    #[test]
    fn custom_entries() {
        let catalog = TickerCatalog::new_with_entries(vec![TickerEntry {
            ticker: "AAPL".to_string(),
            name: "Apple".to_string(),
        }]);
        assert_eq!(catalog.display_name("aapl"), "Apple");
        assert_eq!(catalog.display_name("BBCA.JK"), "BBCA.JK");
    }
}
