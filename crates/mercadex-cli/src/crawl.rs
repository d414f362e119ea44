//! Command handlers for `crawl` and `categories`.
//!
//! The crawl runs on the main task; a Ctrl-C listener on a separate task
//! only flips the stop flag, so the request in flight finishes and the
//! products collected so far are still exported.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use mercadex_core::{AppConfig, Product};
use mercadex_scraper::{
    write_export, CatalogClient, CatalogStats, CrawlOptions, CrawlOutcome, Crawler, ExportError,
    StateStore, StatusUpdate, StopHandle,
};

use crate::console::{format_stats, format_status, ConsoleObserver};
use crate::table;

#[derive(Debug, Default)]
pub(crate) struct CrawlArgs {
    pub region: Option<String>,
    pub category: Option<String>,
    pub output: Option<PathBuf>,
    pub search: Option<String>,
    pub quiet: bool,
    pub no_export: bool,
}

pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    CatalogClient::new(
        &config.api_base_url,
        &config.user_agent,
        config.request_timeout(),
    )
    .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))
}

pub(crate) fn crawl_options(config: &AppConfig, args: &CrawlArgs) -> CrawlOptions {
    let region = args
        .region
        .clone()
        .unwrap_or_else(|| config.region.clone());
    CrawlOptions::new(region)
        .with_category_filter(args.category.clone())
        .with_inter_request_delay(config.inter_request_delay())
}

/// What a Ctrl-C press should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    /// First press: stop after the request in flight.
    Stop,
    /// A stop was already requested: leave immediately.
    Exit,
}

/// Exit code for a process ended by a repeated Ctrl-C.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Sets the stop flag and tells the user the crawl is winding down. Once a
/// stop is pending, further presses resolve to [`Interrupt::Exit`].
pub(crate) fn request_stop(stop: &StopHandle) -> Interrupt {
    if stop.is_stop_requested() {
        return Interrupt::Exit;
    }
    stop.request_stop();
    eprintln!(
        "{}",
        format_status(&StatusUpdate::info(
            "Stopping extraction... (press Ctrl-C again to quit now)",
            Some(0.0),
        ))
    );
    Interrupt::Stop
}

/// Crawls the catalog, then exports and prints what was collected.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the category listing
/// fails, or the export file cannot be written. An empty result set is
/// reported but is not an error.
pub(crate) async fn run_crawl(config: &AppConfig, args: CrawlArgs) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let options = crawl_options(config, &args);
    tracing::info!(
        region = %options.region,
        category = ?options.category_filter,
        "starting crawl"
    );

    let mut store = StateStore::new();
    let stop = store.stop_handle();
    let signal_task = tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if request_stop(&stop) == Interrupt::Exit {
                eprintln!(
                    "{}",
                    format_status(&StatusUpdate::error("Interrupted; nothing exported.", None))
                );
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
        }
    });

    let mut observer = ConsoleObserver::new(std::io::stdout(), args.quiet);
    let outcome = Crawler::new(&client, options)
        .run(&mut store, &mut observer)
        .await;
    signal_task.abort();

    if !observer.export_ready() {
        tracing::info!("crawl did not complete; remaining output covers a partial catalog");
    }

    match outcome {
        CrawlOutcome::Failed { message } => anyhow::bail!("crawl failed: {message}"),
        CrawlOutcome::AlreadyRunning => anyhow::bail!("a crawl is already running"),
        CrawlOutcome::Completed { .. } | CrawlOutcome::Stopped { .. } => {}
    }

    let products = store.products();
    println!("{}", format_stats(&CatalogStats::from_products(products)));

    if !args.no_export {
        let dir = args.output.as_deref().unwrap_or(&config.export_dir);
        if let Some(path) = export_products(products, dir, Local::now().date_naive())? {
            println!(
                "{}",
                format_status(&StatusUpdate::success(
                    format!(
                        "CSV exported with {} products: {}",
                        products.len(),
                        path.display()
                    ),
                    Some(100.0),
                ))
            );
        }
    }

    if let Some(term) = args.search.as_deref() {
        print_matches(products, term);
    }

    Ok(())
}

/// Writes the export file; `Ok(None)` when there is nothing to export.
pub(crate) fn export_products(
    products: &[Product],
    dir: &Path,
    date: NaiveDate,
) -> anyhow::Result<Option<PathBuf>> {
    match write_export(dir, products, date) {
        Ok(path) => Ok(Some(path)),
        Err(ExportError::NoProducts) => {
            println!("No products to export");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_matches(products: &[Product], term: &str) {
    let matches = table::filter_products(products, term);
    println!("{} of {} products match \"{term}\"", matches.len(), products.len());
    if matches.is_empty() {
        return;
    }
    println!("{}", table::header_line());
    for product in matches {
        println!("{}", table::render_row(product));
    }
}

/// Prints the top-level categories with their ids.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the listing fails.
pub(crate) async fn run_list_categories(
    config: &AppConfig,
    region: Option<&str>,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let region = region.unwrap_or(&config.region);
    let categories = client.fetch_categories(region).await?;

    for category in &categories {
        println!(
            "{:>6}  {} ({} subcategories)",
            category.id.to_string(),
            category.name,
            category.subcategories.len()
        );
    }
    println!("{} categories for region {region}", categories.len());
    Ok(())
}
