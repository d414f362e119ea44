//! Response types for the catalog API as served through the proxy.
//!
//! ## Observed shape
//!
//! ### Category listing (`/categories/`)
//! `{"results": [{"id": 12, "name": "Aceite, especias y salsas",
//! "categories": [{"id": 112, "name": "Aceite, vinagre y sal"}, ...]}]}`.
//! Category ids are JSON numbers. The nested list is named `categories`;
//! `subcategories` is accepted as well.
//!
//! ### Category detail (`/categories/{id}`)
//! `{"id": 112, "name": "...", "categories": [{"id": 420, "name": "Aceite de oliva",
//! "products": [...]}, ...]}`. Each nested group carries its own product list.
//!
//! ### Products
//! Product ids are strings (`"4241"`). `display_name` is the storefront label.
//! `price_instructions` holds decimal strings (`"2.35"`) for prices and a
//! number for `unit_size` and `iva`; any of them may be `null` or absent.
//! `unavailable_from` is `null` for products in stock and a date otherwise.

use mercadex_core::CatalogId;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level response from `GET /categories/`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Category>,
}

/// A node of the category tree.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: CatalogId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(
        default,
        rename = "categories",
        alias = "subcategories",
        deserialize_with = "null_as_default"
    )]
    pub subcategories: Vec<Category>,
}

/// Response from `GET /categories/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<ProductGroup>,
}

impl CategoryDetail {
    /// Total number of products across all groups.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|g| g.products.len()).sum()
    }
}

/// A grouping of products inside a category detail page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Entries that do not decode as a product are skipped one by one.
    #[serde(default, deserialize_with = "lenient_products")]
    pub products: Vec<RawProduct>,
}

/// A product exactly as the API returns it.
#[derive(Debug, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<CatalogId>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub thumbnail: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub packaging: Option<String>,

    /// Set when the product stops being sold in the region.
    #[serde(default, deserialize_with = "lenient_string")]
    pub unavailable_from: Option<String>,

    /// Anything other than an object reads as `None`.
    #[serde(default, deserialize_with = "lenient_price_instructions")]
    pub price_instructions: Option<PriceInstructions>,
}

/// Pricing block of a [`RawProduct`].
#[derive(Debug, Default, Deserialize)]
pub struct PriceInstructions {
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit_price: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub bulk_price: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub reference_price: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub reference_format: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub size_format: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub unit_size: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub iva: Option<f64>,
}

/// Treats an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads strings, numbers and booleans into text.
///
/// `null` and `false` become `None`. Numbers render without a trailing `.0`
/// so `1.0` reads as `"1"`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null | Value::Bool(false)) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(render_number(&n)),
        Some(Value::Bool(true)) => Some("true".to_owned()),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<CatalogId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(
            n.as_i64()
                .map_or_else(|| CatalogId::Text(render_number(&n)), CatalogId::Number),
        ),
        Some(Value::String(s)) => Some(CatalogId::Text(s)),
        _ => None,
    })
}

fn lenient_price_instructions<'de, D>(
    deserializer: D,
) -> Result<Option<PriceInstructions>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(object @ Value::Object(_)) => serde_json::from_value(object).ok(),
        _ => None,
    })
}

fn lenient_products<'de, D>(deserializer: D) -> Result<Vec<RawProduct>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(entries)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RawProduct>(entry) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed product record");
                None
            }
        })
        .collect())
}

fn render_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
