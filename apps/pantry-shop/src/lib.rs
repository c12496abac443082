//! # Pantry Shop
//!
//! Command-line driver for the pantry catalog.
//!
//! ## Module Organization
//! ```text
//! pantry_shop/
//! ├── lib.rs          ◄─── You are here (CLI, logging, run)
//! ├── config.rs       ◄─── pantry.toml + PANTRY_* overrides
//! └── scenario.rs     ◄─── Scripted catalog walk, returns text
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing from `RUST_LOG`, `PANTRY_LOG` or the default filter
//! 2. Load configuration (explicit `--config` must be valid), then switch the
//!    log filter to the configured one unless `RUST_LOG` is set
//! 3. Stock the catalog in three locales, printing each report
//! 4. Switch to the report locale; print discounts and the listing
//! 5. Replay any record files given on the command line

pub mod config;
pub mod scenario;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use pantry_core::{Catalog, RecordParser};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::config::{ShopConfig, DEFAULT_LOG_FILTER};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "pantry-shop", version, about = "Product and review catalog demo")]
pub struct Cli {
    /// Config file (defaults to the platform config dir's pantry.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Locale tag for the summary reports, e.g. en-US or es-CO
    #[arg(long)]
    pub locale: Option<String>,

    /// Product records to replay, one per line
    #[arg(long)]
    pub products: Option<PathBuf>,

    /// Review records to replay, one per line
    #[arg(long)]
    pub reviews: Option<PathBuf>,

    /// Print discounts as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the shop scenario and prints its output.
pub fn run(cli: Cli) -> Result<()> {
    let filter_handle = init_tracing(&bootstrap_filter(env_var));

    let mut config = match &cli.config {
        Some(path) => ShopConfig::load(Some(path.clone()))?,
        None => ShopConfig::load_or_default(None),
    };
    if let Some(tag) = &cli.locale {
        config.locale.tag = tag.clone();
    }

    if let Some(directives) = configured_filter(&config, env_var) {
        if let Err(error) = filter_handle.reload(EnvFilter::new(directives)) {
            warn!(%error, "Could not apply configured log filter");
        }
    }
    info!(locale = %config.locale.tag, "Pantry shop starting");

    let today = Local::now().date_naive();
    let mut catalog = Catalog::default();

    for report in scenario::stock_catalog(&mut catalog, today) {
        println!("{}\n", report);
    }

    catalog.change_locale(&config.locale.tag);

    let discounts = catalog.discounts();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&discounts)?);
    } else {
        for line in scenario::discount_lines(&discounts) {
            println!("{}", line);
        }
    }
    println!();

    println!("{}", scenario::listing(&catalog, today));

    let parser = RecordParser::new(config.record_format());
    let products = cli.products.as_deref().and_then(read_records);
    let reviews = cli.reviews.as_deref().and_then(read_records);
    let replay = scenario::replay(
        &mut catalog,
        &parser,
        products.as_deref(),
        reviews.as_deref(),
    );

    if let Some(summary) = replay.products {
        println!("\nProducts: {}", summary);
    }
    if let Some(summary) = replay.reviews {
        println!("Reviews: {}", summary);
    }
    if replay.products.is_some() || replay.reviews.is_some() {
        println!("\n{}", scenario::listing(&catalog, today));
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// The filter sits behind a reload layer so the configured one can replace
/// the bootstrap filter once the config file has been read.
fn init_tracing(directives: &str) -> FilterHandle {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    handle
}

/// Filter in effect while the config loads: `RUST_LOG`, then `PANTRY_LOG`,
/// then the default.
fn bootstrap_filter<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(EnvFilter::DEFAULT_ENV)
        .or_else(|| lookup("PANTRY_LOG"))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Filter to switch to after loading, or `None` when `RUST_LOG` pins it.
fn configured_filter<F>(config: &ShopConfig, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(EnvFilter::DEFAULT_ENV) {
        Some(_) => None,
        None => Some(config.logging.filter.clone()),
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn read_records(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .map_err(|e| warn!(?path, error = %e, "Skipping unreadable record file"))
        .ok()
}
