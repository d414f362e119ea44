use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier used by the catalog API for categories and products.
///
/// The API sends category ids as JSON numbers and product ids as strings, so
/// both shapes are accepted. Comparisons against user input go through the
/// rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogId {
    Number(i64),
    Text(String),
}

impl CatalogId {
    /// Returns `true` when the rendered id equals `raw` exactly.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            CatalogId::Number(n) => n.to_string() == raw,
            CatalogId::Text(s) => s == raw,
        }
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogId::Number(n) => write!(f, "{n}"),
            CatalogId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CatalogId {
    fn from(value: i64) -> Self {
        CatalogId::Number(value)
    }
}

impl From<&str> for CatalogId {
    fn from(value: &str) -> Self {
        CatalogId::Text(value.to_owned())
    }
}

/// Stock status of a product, rendered the way the export expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Sí")]
    Available,
    #[serde(rename = "No")]
    Unavailable,
}

impl Availability {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "Sí",
            Availability::Unavailable => "No",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog product after normalization.
///
/// Prices are kept as the decimal strings the API returns; missing prices are
/// `"0"` and missing formats are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Breadcrumb of the category the product was found under, e.g.
    /// `"Fruta y verdura > Fruta"`. Fixed at insertion time.
    pub category: String,
    pub price: String,
    pub bulk_price: String,
    pub reference_price: String,
    /// Unit the reference price is quoted in, e.g. `"kg"` or `"L"`.
    pub reference_format: String,
    pub size_format: String,
    pub unit_size: String,
    /// Image URL, empty when the API sends none.
    pub thumbnail: String,
    pub packaging: String,
    pub available: Availability,
    /// VAT percentage.
    pub iva: f64,
}

impl Product {
    /// Bulk price as a number; unparsable or empty prices count as zero.
    #[must_use]
    pub fn bulk_price_value(&self) -> f64 {
        self.bulk_price.trim().parse::<f64>().unwrap_or(0.0)
    }
}
