mod console;
mod crawl;
mod table;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mercadex-cli")]
#[command(about = "Mercadona catalog extractor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl the whole catalog (or one category) and export it.
    Crawl {
        /// Warehouse/postal code; defaults to `MERCADEX_REGION`.
        #[arg(long)]
        region: Option<String>,
        /// Only crawl the top-level category with this id.
        #[arg(long)]
        category: Option<String>,
        /// Directory the export file is written to; defaults to `MERCADEX_EXPORT_DIR`.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print only the collected rows containing this text.
        #[arg(long)]
        search: Option<String>,
        /// Do not print product rows while crawling.
        #[arg(long)]
        quiet: bool,
        /// Skip writing the export file.
        #[arg(long)]
        no_export: bool,
    },
    /// List top-level categories and their ids.
    Categories {
        #[arg(long)]
        region: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = mercadex_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Crawl {
            region,
            category,
            output,
            search,
            quiet,
            no_export,
        }) => {
            let args = crawl::CrawlArgs {
                region,
                category,
                output,
                search,
                quiet,
                no_export,
            };
            crawl::run_crawl(&config, args).await?;
        }
        Some(Commands::Categories { region }) => {
            crawl::run_list_categories(&config, region.as_deref()).await?;
        }
        None => println!("nothing to do; try `mercadex-cli crawl --help`"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
