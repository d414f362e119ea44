//! Mutable crawl state: accumulated products plus the running/stop flags.
//!
//! The store is owned by whoever drives the crawl and handed to the
//! orchestrator by `&mut`. The stop flag lives behind a [`StopHandle`] so a
//! signal handler on another task can request cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mercadex_core::Product;

/// Shared cancellation flag polled by the crawl.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Point-in-time copy of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub products: Vec<Product>,
    pub is_running: bool,
    pub should_stop: bool,
}

/// Partial update for [`StateStore::patch`]; `None` fields are left alone.
#[derive(Debug, Default)]
pub struct StatePatch {
    pub products: Option<Vec<Product>>,
    pub is_running: Option<bool>,
    pub should_stop: Option<bool>,
}

impl StatePatch {
    #[must_use]
    pub fn running(is_running: bool) -> Self {
        Self {
            is_running: Some(is_running),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn stop_requested() -> Self {
        Self {
            should_stop: Some(true),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct StateStore {
    products: Vec<Product>,
    is_running: bool,
    stop: StopHandle,
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot copy of the whole state.
    #[must_use]
    pub fn get(&self) -> AppState {
        AppState {
            products: self.products.clone(),
            is_running: self.is_running,
            should_stop: self.stop.is_stop_requested(),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Live access to the product list for appending during a crawl.
    pub fn products_mut(&mut self) -> &mut Vec<Product> {
        &mut self.products
    }

    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Shallow-merges the fields set in `patch`.
    pub fn patch(&mut self, patch: StatePatch) {
        if let Some(products) = patch.products {
            self.products = products;
        }
        if let Some(is_running) = patch.is_running {
            self.is_running = is_running;
        }
        match patch.should_stop {
            Some(true) => self.stop.request_stop(),
            Some(false) => self.stop.clear(),
            None => {}
        }
    }

    /// Empties the product list and clears both flags.
    ///
    /// Outstanding [`StopHandle`]s stay attached to this store.
    pub fn reset(&mut self) {
        self.products.clear();
        self.is_running = false;
        self.stop.clear();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.stop.is_stop_requested()
    }

    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}
