pub mod client;
pub mod crawl;
pub mod error;
pub mod export;
pub mod normalize;
pub mod observer;
pub mod state;
pub mod stats;
pub mod types;

pub use client::{delay, CatalogClient};
pub use crawl::{progress_percent, CrawlOptions, CrawlOutcome, Crawler};
pub use error::{ExportError, ScraperError};
pub use export::{export_csv, export_filename, write_export};
pub use normalize::normalize_product;
pub use observer::{CrawlObserver, NoopObserver, StatusKind, StatusUpdate};
pub use state::{AppState, StatePatch, StateStore, StopHandle};
pub use stats::CatalogStats;
pub use types::{CategoriesResponse, Category, CategoryDetail, PriceInstructions, ProductGroup, RawProduct};
