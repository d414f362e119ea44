//! Semicolon-delimited export of the collected catalog.
//!
//! The file is UTF-8 with a byte-order mark so spreadsheet tools pick the
//! right encoding. Name, category and packaging are quoted; every other
//! column is written as-is.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use mercadex_core::Product;

use crate::error::ExportError;

pub const BOM: char = '\u{feff}';
pub const SEPARATOR: char = ';';

pub const HEADERS: [&str; 13] = [
    "ID",
    "Nombre",
    "Categoría",
    "Precio Unidad",
    "Precio Bulto",
    "Precio Referencia",
    "Formato Referencia",
    "Tamaño",
    "Formato Tamaño",
    "Empaquetado",
    "Disponible",
    "IVA",
    "Imagen URL",
];

/// Renders `products` as the export document, BOM included.
///
/// # Errors
///
/// Returns [`ExportError::NoProducts`] when `products` is empty.
pub fn export_csv(products: &[Product]) -> Result<String, ExportError> {
    if products.is_empty() {
        return Err(ExportError::NoProducts);
    }

    let sep = SEPARATOR.to_string();
    let mut lines = Vec::with_capacity(products.len() + 1);
    lines.push(HEADERS.join(&sep));
    lines.extend(products.iter().map(format_product_row));

    let mut out = String::new();
    out.push(BOM);
    out.push_str(&lines.join("\n"));
    Ok(out)
}

/// Formats one product in header column order.
#[must_use]
pub fn format_product_row(product: &Product) -> String {
    let fields = [
        product.id.clone(),
        escape_csv_field(&product.name),
        escape_csv_field(&product.category),
        product.price.clone(),
        product.bulk_price.clone(),
        product.reference_price.clone(),
        product.reference_format.clone(),
        product.unit_size.clone(),
        product.size_format.clone(),
        escape_csv_field(&product.packaging),
        product.available.to_string(),
        product.iva.to_string(),
        product.thumbnail.clone(),
    ];
    fields.join(&SEPARATOR.to_string())
}

/// Wraps `value` in double quotes, doubling embedded quotes. Empty values
/// become `""`.
#[must_use]
pub fn escape_csv_field(value: &str) -> String {
    if value.is_empty() {
        return "\"\"".to_owned();
    }
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Inverse of [`escape_csv_field`]. Unquoted input is returned unchanged.
#[must_use]
pub fn unescape_csv_field(field: &str) -> String {
    match field
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => field.to_owned(),
    }
}

/// File name for an export made on `date`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("mercadona_productos_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes the export for `products` into `dir` and returns the file path.
///
/// # Errors
///
/// Returns [`ExportError::NoProducts`] when `products` is empty, or
/// [`ExportError::Io`] if the file cannot be written.
pub fn write_export(
    dir: &Path,
    products: &[Product],
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let content = export_csv(products)?;
    let path = dir.join(export_filename(date));
    std::fs::write(&path, content.as_bytes()).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), products = products.len(), "export written");
    Ok(path)
}
