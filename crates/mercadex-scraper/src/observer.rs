//! Callbacks the crawl reports through. The terminal front end implements
//! [`CrawlObserver`]; tests record what they receive.

use mercadex_core::Product;

use crate::types::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// A status line with an optional progress percentage (0-100).
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub kind: StatusKind,
    pub message: String,
    pub progress: Option<f64>,
}

impl StatusUpdate {
    pub fn info(message: impl Into<String>, progress: Option<f64>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
            progress,
        }
    }

    pub fn success(message: impl Into<String>, progress: Option<f64>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
            progress,
        }
    }

    pub fn error(message: impl Into<String>, progress: Option<f64>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
            progress,
        }
    }
}

/// Sink for crawl progress. Every method defaults to doing nothing.
pub trait CrawlObserver {
    fn on_status(&mut self, _update: &StatusUpdate) {}

    fn on_running_changed(&mut self, _running: bool) {}

    /// Called once with the unfiltered top-level categories.
    fn on_categories_loaded(&mut self, _categories: &[Category]) {}

    /// Called after each product is stored. `is_first` is set for the first
    /// product of the run.
    fn on_product(&mut self, _product: &Product, _is_first: bool) {}

    /// Called after each processed category with everything collected so far.
    fn on_stats(&mut self, _products: &[Product]) {}

    /// Called when a run completes without being stopped.
    fn on_export_ready(&mut self) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CrawlObserver for NoopObserver {}
