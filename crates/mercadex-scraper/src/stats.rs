//! Summary figures shown alongside the results table.

use std::collections::HashSet;

use mercadex_core::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    pub total_products: usize,
    /// Number of distinct breadcrumbs.
    pub unique_categories: usize,
    /// Mean bulk price; `None` when there are no products.
    pub average_bulk_price: Option<f64>,
}

impl CatalogStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_products(products: &[Product]) -> Self {
        let unique_categories = products
            .iter()
            .map(|p| p.category.as_str())
            .collect::<HashSet<_>>()
            .len();

        let average_bulk_price = if products.is_empty() {
            None
        } else {
            let sum: f64 = products.iter().map(Product::bulk_price_value).sum();
            Some(sum / products.len() as f64)
        };

        Self {
            total_products: products.len(),
            unique_categories,
            average_bulk_price,
        }
    }

    /// Average price formatted for display, e.g. `"2.35€"`.
    #[must_use]
    pub fn average_price_label(&self) -> Option<String> {
        self.average_bulk_price.map(|avg| format!("{avg:.2}€"))
    }
}
