//! alphacrawl CLI
//!
//! Counts the entries of an alphabetical category listing per letter.

use std::path::PathBuf;
use std::sync::Arc;

use alphacrawl::{
    error::Result,
    models::{Config, RequestScope, request_keys},
    pipeline::{self, FailurePolicy},
    services::HttpFetcher,
    storage::LocalStorage,
    utils,
};
use clap::{Parser, Subcommand};

/// alphacrawl - Alphabetical Listing Counter
#[derive(Parser, Debug)]
#[command(
    name = "alphacrawl",
    version,
    about = "Counts category listing entries per starting letter"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "alphacrawl.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl every letter and write the per-letter counts
    Collect {
        /// Listing URL with `{}` where the letter goes
        #[arg(long)]
        template: Option<String>,

        /// Letters to crawl, e.g. "АБВГД"
        #[arg(long)]
        alphabet: Option<String>,

        /// Heading text of the listing section
        #[arg(long)]
        title: Option<String>,

        /// Text of the "next page" link
        #[arg(long)]
        next_text: Option<String>,

        /// Maximum letters crawled at once
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,

        /// Report file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Proxy URL for every request
        #[arg(long)]
        proxy: Option<String>,

        /// Extra request header, NAME=VALUE (repeatable)
        #[arg(long = "header", value_parser = parse_key_value)]
        headers: Vec<(String, String)>,

        /// Raw transport option, KEY=VALUE (repeatable)
        #[arg(long = "option", value_parser = parse_key_value)]
        options: Vec<(String, String)>,

        /// Write counts for succeeded letters even if some letters fail
        #[arg(long)]
        partial: bool,

        /// Also print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, console_level: &str) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
    utils::log::init(if verbose { "debug" } else { console_level });
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_or_default(&cli.config);
    init_logging(cli.verbose, &config.logging.level);

    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Collect {
            template,
            alphabet,
            title,
            next_text,
            concurrency,
            output,
            proxy,
            headers,
            options,
            partial,
            json,
        } => {
            if let Some(template) = template {
                config.listing.url_template = template;
            }
            if let Some(alphabet) = alphabet {
                config.listing.alphabet = alphabet;
            }
            if let Some(title) = title {
                config.listing.shape.section_title = title;
            }
            if let Some(next_text) = next_text {
                config.listing.shape.next_page_marker_text = next_text;
            }
            if let Some(concurrency) = concurrency {
                config.crawler.max_concurrent = concurrency;
            }
            if let Some(output) = output {
                config.output.path = output;
            }
            config.listing.allow_partial |= partial;

            if let Some(proxy) = proxy {
                config.request.insert(request_keys::PROXY, proxy);
            }
            for (name, value) in headers {
                config
                    .request
                    .insert(format!("{}{}", request_keys::HEADER_PREFIX, name), value);
            }
            for (key, value) in options {
                config.request.insert(key, value);
            }

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            let request = config.request.clone();
            let crawl = config.crawl_config()?;
            let policy = if config.listing.allow_partial {
                FailurePolicy::WritePartial
            } else {
                FailurePolicy::Abort
            };
            let fetcher = Arc::new(HttpFetcher::new(config.crawler.clone())?);
            let storage = LocalStorage::new(&config.output.path);

            let run = |scope: RequestScope| async move {
                pipeline::run_collect(crawl, policy, &scope, fetcher, &storage).await
            };
            let root = RequestScope::root();
            let summary = if request.is_empty() {
                run(root).await?
            } else {
                root.with_options(request, run).await?
            };

            if config.logging.show_progress {
                for (letter, count) in summary.report.iter() {
                    utils::log::sub_item(&format!("{letter}: {count}"));
                }
            }
            for failure in &summary.failures {
                utils::log::error(&failure.to_string());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&summary.report)?);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            let crawl = config.crawl_config()?;
            log::info!(
                "✓ Config OK ({} letters, {} at a time)",
                crawl.alphabet.len(),
                crawl.concurrency_limit
            );
        }
    }

    log::info!("Done!");

    Ok(())
}
