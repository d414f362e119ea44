use std::path::PathBuf;

use chrono::NaiveDate;
use mercadex_core::{Availability, Product};

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["mercadex-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_crawl_with_defaults() {
    let cli = Cli::try_parse_from(["mercadex-cli", "crawl"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Crawl {
            region: None,
            category: None,
            output: None,
            search: None,
            quiet: false,
            no_export: false,
        })
    ));
}

#[test]
fn parses_crawl_with_all_flags() {
    let cli = Cli::try_parse_from([
        "mercadex-cli",
        "crawl",
        "--region",
        "28001",
        "--category",
        "12",
        "--output",
        "/tmp/out",
        "--search",
        "leche",
        "--quiet",
        "--no-export",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Crawl {
            region,
            category,
            output,
            search,
            quiet,
            no_export,
        }) => {
            assert_eq!(region.as_deref(), Some("28001"));
            assert_eq!(category.as_deref(), Some("12"));
            assert_eq!(output, Some(PathBuf::from("/tmp/out")));
            assert_eq!(search.as_deref(), Some("leche"));
            assert!(quiet);
            assert!(no_export);
        }
        other => panic!("expected crawl command, got: {other:?}"),
    }
}

#[test]
fn parses_categories_with_region() {
    let cli = Cli::try_parse_from(["mercadex-cli", "categories", "--region", "46001"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Categories { region: Some(ref r) }) if r == "46001"
    ));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["mercadex-cli", "scrape"]).is_err());
}

fn test_config() -> mercadex_core::AppConfig {
    mercadex_core::AppConfig {
        env: mercadex_core::Environment::Test,
        log_level: "info".to_owned(),
        api_base_url: "http://127.0.0.1:3000/api/mercadona".to_owned(),
        region: "08001".to_owned(),
        inter_request_delay_ms: 250,
        request_timeout_secs: None,
        user_agent: "mercadex-test/0.1".to_owned(),
        export_dir: PathBuf::from("."),
        bind_addr: "127.0.0.1:3000".parse().unwrap(),
        upstream_url: "https://tienda.mercadona.es/api".to_owned(),
    }
}

#[test]
fn crawl_options_fall_back_to_config() {
    let config = test_config();
    let options = crawl::crawl_options(&config, &crawl::CrawlArgs::default());
    assert_eq!(options.region, "08001");
    assert!(options.category_filter.is_none());
    assert_eq!(
        options.inter_request_delay,
        std::time::Duration::from_millis(250)
    );
}

#[test]
fn crawl_options_prefer_flags() {
    let config = test_config();
    let args = crawl::CrawlArgs {
        region: Some("28001".to_owned()),
        category: Some("12".to_owned()),
        ..crawl::CrawlArgs::default()
    };
    let options = crawl::crawl_options(&config, &args);
    assert_eq!(options.region, "28001");
    assert_eq!(options.category_filter.as_deref(), Some("12"));
}

#[test]
fn build_client_accepts_config_base_url() {
    assert!(crawl::build_client(&test_config()).is_ok());
}

#[test]
fn first_interrupt_requests_stop() {
    let stop = mercadex_scraper::StopHandle::default();
    assert_eq!(crawl::request_stop(&stop), crawl::Interrupt::Stop);
    assert!(stop.is_stop_requested());
}

#[test]
fn repeated_interrupt_exits() {
    let stop = mercadex_scraper::StopHandle::default();
    assert_eq!(crawl::request_stop(&stop), crawl::Interrupt::Stop);
    assert_eq!(crawl::request_stop(&stop), crawl::Interrupt::Exit);
    assert_eq!(crawl::request_stop(&stop), crawl::Interrupt::Exit);
    assert!(stop.is_stop_requested());
}

fn product(id: &str) -> Product {
    Product {
        id: id.to_owned(),
        name: "Leche".to_owned(),
        category: "Lácteos > Leche".to_owned(),
        price: "0.95".to_owned(),
        bulk_price: "0.95".to_owned(),
        reference_price: "0.95".to_owned(),
        reference_format: "L".to_owned(),
        size_format: "l".to_owned(),
        unit_size: "1".to_owned(),
        thumbnail: String::new(),
        packaging: String::new(),
        available: Availability::Available,
        iva: 4.0,
    }
}

#[test]
fn export_products_writes_dated_file() {
    let dir = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let path = crawl::export_products(&[product("1")], dir.path(), date)
        .unwrap()
        .expect("expected a written file");
    assert_eq!(path, dir.path().join("mercadona_productos_2025-01-31.csv"));
    assert!(path.exists());
}

#[test]
fn export_products_with_nothing_collected_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let result = crawl::export_products(&[], dir.path(), date).unwrap();
    assert!(result.is_none());
}
