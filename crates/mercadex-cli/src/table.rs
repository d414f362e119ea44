//! Text rendering of the results table and its search filter.

use mercadex_core::Product;

const COLUMNS: [&str; 7] = [
    "ID",
    "Name",
    "Category",
    "Price",
    "Reference",
    "Size",
    "Available",
];

pub(crate) fn header_line() -> String {
    COLUMNS.join(" | ")
}

pub(crate) fn render_row(product: &Product) -> String {
    format!(
        "{} | {} | {} | {}€ | {}€/{} | {} {} | {}",
        product.id,
        product.name,
        product.category,
        product.bulk_price,
        product.reference_price,
        product.reference_format,
        product.unit_size,
        product.size_format,
        product.available,
    )
}

/// Products whose rendered row contains `term`, ignoring case. A blank term
/// matches everything.
pub(crate) fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let term = term.trim().to_lowercase();
    products
        .iter()
        .filter(|p| term.is_empty() || render_row(p).to_lowercase().contains(&term))
        .collect()
}
