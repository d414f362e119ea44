//! Sequential walk of the category tree.
//!
//! The crawl fetches the top-level categories once, then every subcategory's
//! product page one after another, normalizing products into the
//! [`StateStore`] as they arrive. The stop flag is polled before each
//! top-level category and before each subcategory; a request already in
//! flight always completes.

use std::time::Duration;

use mercadex_core::Product;

use crate::client::{delay, CatalogClient};
use crate::normalize::normalize_product;
use crate::observer::{CrawlObserver, StatusUpdate};
use crate::state::{StatePatch, StateStore};
use crate::types::{Category, CategoryDetail};

/// Fixed pause after every subcategory fetch.
pub const DEFAULT_INTER_REQUEST_DELAY: Duration = Duration::from_millis(200);

/// Share of the progress bar reserved for the category listing fetch.
const LISTING_PROGRESS: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub region: String,
    /// Only top-level categories whose id renders to this value are crawled.
    pub category_filter: Option<String>,
    pub inter_request_delay: Duration,
}

impl CrawlOptions {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            category_filter: None,
            inter_request_delay: DEFAULT_INTER_REQUEST_DELAY,
        }
    }

    /// Sets the category filter. Blank values mean "no filter".
    #[must_use]
    pub fn with_category_filter(mut self, filter: Option<String>) -> Self {
        self.category_filter = filter
            .map(|f| f.trim().to_owned())
            .filter(|f| !f.is_empty());
        self
    }

    #[must_use]
    pub fn with_inter_request_delay(mut self, delay: Duration) -> Self {
        self.inter_request_delay = delay;
        self
    }
}

/// How a crawl ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Every selected category was processed.
    Completed { products: usize },
    /// A stop was requested; collected products stay in the store.
    Stopped { products: usize },
    /// The category listing could not be fetched.
    Failed { message: String },
    /// Another crawl was already running on this store; nothing happened.
    AlreadyRunning,
}

/// Progress after `processed` of `total` top-level categories.
///
/// The listing fetch occupies the first 10%, the traversal the remaining 90%
/// in equal steps per category. `total` counts every category returned by the
/// API, including ones a filter skips.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_percent(processed: usize, total: usize) -> f64 {
    if total == 0 {
        return LISTING_PROGRESS;
    }
    LISTING_PROGRESS + (processed as f64 / total as f64) * (100.0 - LISTING_PROGRESS)
}

pub struct Crawler<'a> {
    client: &'a CatalogClient,
    options: CrawlOptions,
}

impl<'a> Crawler<'a> {
    #[must_use]
    pub fn new(client: &'a CatalogClient, options: CrawlOptions) -> Self {
        Self { client, options }
    }

    /// Runs one crawl against `store`, reporting to `observer`.
    ///
    /// Returns [`CrawlOutcome::AlreadyRunning`] without touching the store if
    /// it is already marked running. Otherwise the store is reset first and
    /// `is_running` is cleared again before returning, whatever the outcome.
    pub async fn run<O>(&self, store: &mut StateStore, observer: &mut O) -> CrawlOutcome
    where
        O: CrawlObserver + ?Sized,
    {
        if store.is_running() {
            tracing::debug!("crawl already running; ignoring start request");
            return CrawlOutcome::AlreadyRunning;
        }

        store.reset();
        store.patch(StatePatch::running(true));
        observer.on_running_changed(true);

        let outcome = self.traverse(store, observer).await;

        store.patch(StatePatch::running(false));
        observer.on_running_changed(false);

        tracing::info!(?outcome, "crawl finished");
        outcome
    }

    async fn traverse<O>(&self, store: &mut StateStore, observer: &mut O) -> CrawlOutcome
    where
        O: CrawlObserver + ?Sized,
    {
        let region = self.options.region.as_str();
        observer.on_status(&StatusUpdate::info(
            "Fetching top-level categories...",
            Some(0.0),
        ));

        let categories = match self.client.fetch_categories(region).await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!(region, error = %e, "failed to fetch categories");
                let message = e.to_string();
                observer.on_status(&StatusUpdate::error(format!("Error: {message}"), Some(0.0)));
                return CrawlOutcome::Failed { message };
            }
        };

        let total = categories.len();
        observer.on_status(&StatusUpdate::info(
            format!("{total} categories found. Extracting products..."),
            Some(LISTING_PROGRESS),
        ));
        observer.on_categories_loaded(&categories);

        let mut processed = 0usize;
        for category in &categories {
            if store.should_stop() {
                break;
            }

            if let Some(filter) = &self.options.category_filter {
                if !category.id.matches(filter) {
                    continue;
                }
            }

            observer.on_status(&StatusUpdate::info(
                format!(
                    "Processing: {} ({}/{total})",
                    category.name,
                    processed + 1
                ),
                Some(progress_percent(processed, total)),
            ));

            self.process_category(category, store, observer).await;
            processed += 1;
            observer.on_stats(store.products());
        }

        let collected = store.products().len();
        if store.should_stop() {
            observer.on_status(&StatusUpdate::info(
                "Extraction stopped by user.",
                Some(0.0),
            ));
            CrawlOutcome::Stopped {
                products: collected,
            }
        } else {
            observer.on_status(&StatusUpdate::success(
                format!("Extraction complete! {collected} products extracted."),
                Some(100.0),
            ));
            observer.on_export_ready();
            CrawlOutcome::Completed {
                products: collected,
            }
        }
    }

    /// Fetches every subcategory of `category` in order.
    ///
    /// A failed fetch contributes no products; the fixed delay is applied
    /// after every fetch regardless.
    async fn process_category<O>(
        &self,
        category: &Category,
        store: &mut StateStore,
        observer: &mut O,
    ) where
        O: CrawlObserver + ?Sized,
    {
        for sub in &category.subcategories {
            if store.should_stop() {
                break;
            }

            let breadcrumb = format!("{} > {}", category.name, sub.name);
            match self
                .client
                .fetch_category_products(&sub.id, &self.options.region)
                .await
            {
                Ok(Some(detail)) => {
                    let added = collect_products(detail, &breadcrumb, store, observer);
                    tracing::debug!(category = %breadcrumb, added, "subcategory processed");
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        category = %breadcrumb,
                        error = %e,
                        "failed to process subcategory; skipping"
                    );
                }
            }

            delay(self.options.inter_request_delay).await;
        }
    }
}

/// Flattens every product group of `detail` into the store.
fn collect_products<O>(
    detail: CategoryDetail,
    breadcrumb: &str,
    store: &mut StateStore,
    observer: &mut O,
) -> usize
where
    O: CrawlObserver + ?Sized,
{
    let mut added = 0usize;
    for group in detail.categories {
        for raw in group.products {
            let product: Product = normalize_product(raw, breadcrumb);
            let products = store.products_mut();
            let is_first = products.is_empty();
            products.push(product);
            if let Some(stored) = products.last() {
                observer.on_product(stored, is_first);
            }
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_starts_after_listing_share() {
        assert!((progress_percent(0, 4) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_is_linear_in_categories() {
        assert!((progress_percent(2, 4) - 55.0).abs() < 1e-9);
        assert!((progress_percent(4, 4) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn progress_with_no_categories_stays_at_listing_share() {
        assert!((progress_percent(0, 0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn blank_category_filter_means_no_filter() {
        let options = CrawlOptions::new("08001").with_category_filter(Some("  ".to_owned()));
        assert!(options.category_filter.is_none());

        let options = CrawlOptions::new("08001").with_category_filter(Some(" 12 ".to_owned()));
        assert_eq!(options.category_filter.as_deref(), Some("12"));
    }

    #[test]
    fn options_default_to_fixed_delay() {
        let options = CrawlOptions::new("08001");
        assert_eq!(options.inter_request_delay, Duration::from_millis(200));
        assert_eq!(options.region, "08001");
    }
}
