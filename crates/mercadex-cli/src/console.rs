//! Terminal sink for crawl progress.

use std::io::Write;

use mercadex_core::Product;
use mercadex_scraper::{CatalogStats, Category, CrawlObserver, StatusKind, StatusUpdate};

use crate::table;

/// Formats a status line, prefixing the progress percentage when present.
pub(crate) fn format_status(update: &StatusUpdate) -> String {
    let marker = match update.kind {
        StatusKind::Info => "..",
        StatusKind::Success => "ok",
        StatusKind::Error => "!!",
    };
    match update.progress {
        Some(progress) => format!("[{marker}] [{progress:>3.0}%] {}", update.message),
        None => format!("[{marker}] {}", update.message),
    }
}

pub(crate) fn format_stats(stats: &CatalogStats) -> String {
    format!(
        "products: {} | categories: {} | avg price: {}",
        stats.total_products,
        stats.unique_categories,
        stats.average_price_label().unwrap_or_else(|| "-".to_owned()),
    )
}

/// Writes status lines, product rows and stats to `out`.
pub(crate) struct ConsoleObserver<W: Write> {
    out: W,
    /// Suppresses product rows; status and stats are still written.
    quiet: bool,
    export_ready: bool,
}

impl<W: Write> ConsoleObserver<W> {
    pub(crate) fn new(out: W, quiet: bool) -> Self {
        Self {
            out,
            quiet,
            export_ready: false,
        }
    }

    pub(crate) fn export_ready(&self) -> bool {
        self.export_ready
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::debug!(error = %e, "failed to write console output");
        }
    }
}

impl<W: Write> CrawlObserver for ConsoleObserver<W> {
    fn on_status(&mut self, update: &StatusUpdate) {
        self.emit(&format_status(update));
    }

    fn on_running_changed(&mut self, running: bool) {
        tracing::debug!(running, "crawl running state changed");
    }

    fn on_categories_loaded(&mut self, categories: &[Category]) {
        tracing::debug!(count = categories.len(), "categories loaded");
    }

    fn on_product(&mut self, product: &Product, is_first: bool) {
        if self.quiet {
            return;
        }
        if is_first {
            self.emit(&table::header_line());
        }
        self.emit(&table::render_row(product));
    }

    fn on_stats(&mut self, products: &[Product]) {
        let stats = CatalogStats::from_products(products);
        self.emit(&format_stats(&stats));
    }

    fn on_export_ready(&mut self) {
        self.export_ready = true;
    }
}
