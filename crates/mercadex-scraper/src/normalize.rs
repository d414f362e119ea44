//! Normalization from raw catalog records to [`mercadex_core::Product`].

use mercadex_core::{Availability, Product};

use crate::types::{PriceInstructions, RawProduct};

/// Price fields fall back to this when missing.
const MISSING_PRICE: &str = "0";

/// Normalizes a raw API product found under `breadcrumb`.
///
/// Missing or empty fields take their defaults: prices `"0"`, formats and
/// URLs `""`, `iva` `0`. `display_name` wins over `name`.
#[must_use]
pub fn normalize_product(raw: RawProduct, breadcrumb: &str) -> Product {
    let available = if present(raw.unavailable_from.as_ref()).is_some() {
        Availability::Unavailable
    } else {
        Availability::Available
    };

    let name = present(raw.display_name)
        .or_else(|| present(raw.name))
        .unwrap_or_default();

    let prices = raw.price_instructions.unwrap_or_default();
    let PriceInstructions {
        unit_price,
        bulk_price,
        reference_price,
        reference_format,
        size_format,
        unit_size,
        iva,
    } = prices;

    Product {
        id: raw.id.map(|id| id.to_string()).unwrap_or_default(),
        name,
        category: breadcrumb.to_owned(),
        price: present(unit_price).unwrap_or_else(|| MISSING_PRICE.to_owned()),
        bulk_price: present(bulk_price).unwrap_or_else(|| MISSING_PRICE.to_owned()),
        reference_price: present(reference_price).unwrap_or_else(|| MISSING_PRICE.to_owned()),
        reference_format: present(reference_format).unwrap_or_default(),
        size_format: present(size_format).unwrap_or_default(),
        unit_size: present(unit_size).unwrap_or_default(),
        thumbnail: present(raw.thumbnail).unwrap_or_default(),
        packaging: present(raw.packaging).unwrap_or_default(),
        available,
        iva: iva.unwrap_or(0.0),
    }
}

/// Empty strings count as absent.
fn present<S: AsRef<str>>(value: Option<S>) -> Option<S> {
    value.filter(|s| !s.as_ref().is_empty())
}
