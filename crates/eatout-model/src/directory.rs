//! Immutable lookup directories used by enrichment.
//!
//! Directories are plain values: the pipeline receives them at construction
//! and never mutates them, so tests and configuration files can substitute
//! their own tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default reporting currency label.
pub const DEFAULT_CURRENCY_CODE: &str = "TRY";

const DEFAULT_COUNTRIES: [(i64, &str); 15] = [
    (1, "India"),
    (14, "Australia"),
    (30, "Brazil"),
    (37, "Canada"),
    (94, "Indonesia"),
    (148, "New Zeland"),
    (162, "Philippines"),
    (166, "Qatar"),
    (184, "Singapure"),
    (189, "South Africa"),
    (191, "Sri Lanka"),
    (208, "Turkey"),
    (214, "United Arab Emirates"),
    (215, "England"),
    (216, "United States of America"),
];

const DEFAULT_CURRENCIES: [(&str, &str); 11] = [
    ("Botswana Pula(P)", "BWP"),
    ("Brazilian Real(R$)", "BRL"),
    ("Dollar($)", "USD"),
    ("Emirati Diram(AED)", "AED"),
    ("Indian Rupees(Rs.)", "INR"),
    ("Indonesian Rupiah(IDR)", "IDR"),
    ("NewZealand($)", "NZD"),
    ("Pounds(£)", "GBP"),
    ("Qatari Rial(QR)", "QAR"),
    ("Rand(R)", "ZAR"),
    ("Sri Lankan Rupee(LKR)", "LKR"),
];

const DEFAULT_RATING_COLORS: [(&str, &str); 7] = [
    ("3F7E00", "darkgreen"),
    ("5BA829", "green"),
    ("9ACD32", "lightgreen"),
    ("CDD614", "orange"),
    ("FFBA00", "red"),
    ("CBCBC8", "darkred"),
    ("FF7800", "darkred"),
];

/// Country code to country name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDirectory {
    entries: BTreeMap<i64, String>,
}

impl CountryDirectory {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(code, name)| (code, name.into()))
                .collect(),
        }
    }

    pub fn name(&self, code: i64) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    /// Country names in code order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.entries.iter().map(|(code, name)| (*code, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CountryDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRIES)
    }
}

/// Free-text currency description to currency code.
///
/// Lookups match the description exactly after trimming; the source export
/// uses a small fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyDirectory {
    entries: BTreeMap<String, String>,
}

impl CurrencyDirectory {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(description, code)| (description.into(), code.into()))
                .collect(),
        }
    }

    pub fn code(&self, description: &str) -> Option<&str> {
        self.entries.get(description.trim()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(description, code)| (description.as_str(), code.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CurrencyDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCIES)
    }
}

/// Hex rating-color token to semantic color label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingColorDirectory {
    entries: BTreeMap<String, String>,
}

impl RatingColorDirectory {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(token, label)| {
                    let token: String = token.into();
                    (token.to_ascii_uppercase(), label.into())
                })
                .collect(),
        }
    }

    /// Tokens are matched case-insensitively, with or without a leading `#`.
    pub fn label(&self, token: &str) -> Option<&str> {
        let key = token.trim().trim_start_matches('#').to_ascii_uppercase();
        self.entries.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RatingColorDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_RATING_COLORS)
    }
}

/// All lookup tables enrichment reads, bundled for injection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directories {
    pub countries: CountryDirectory,
    pub currencies: CurrencyDirectory,
    pub rating_colors: RatingColorDirectory,
}

impl Directories {
    pub fn with_countries(mut self, countries: CountryDirectory) -> Self {
        self.countries = countries;
        self
    }

    pub fn with_currencies(mut self, currencies: CurrencyDirectory) -> Self {
        self.currencies = currencies;
        self
    }

    pub fn with_rating_colors(mut self, rating_colors: RatingColorDirectory) -> Self {
        self.rating_colors = rating_colors;
        self
    }
}
