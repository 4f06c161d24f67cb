//! RoutineChat - product catalog and recommendation chat
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use routinechat::app::App;
use routinechat::catalog::{CatalogLoader, CatalogView, filter_by_category};
use routinechat::cli::{Cli, Command};
use routinechat::config::Config;
use routinechat::repl::{self, display};
use routinechat::{Catalog, SelectionStore};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("routinechat")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("routinechat.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(catalog = %config.catalog.source, worker = %config.worker.url, "routinechat starting");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        None => repl::run_interactive(&config, None).await,
        Some(Command::Chat { message }) => repl::run_interactive(&config, message).await,
        Some(Command::Products { category }) => cmd_products(&config, category.as_deref()).await,
        Some(Command::Categories) => cmd_categories(&config).await,
        Some(Command::Ask { message, select }) => cmd_ask(&config, &message, &select).await,
        Some(Command::Routine { select }) => cmd_routine(&config, &select).await,
    }
}

async fn load_catalog(config: &Config) -> Result<Catalog> {
    let loader = CatalogLoader::new(config.catalog.source());
    let products = loader
        .load_products()
        .await
        .context(format!("Failed to load catalog from {}", loader.source()))?;
    Ok(Catalog::new(products))
}

async fn cmd_products(config: &Config, category: Option<&str>) -> Result<()> {
    let catalog = load_catalog(config).await?;
    let products = match category {
        Some(category) => filter_by_category(catalog.products(), category),
        None => catalog.products().to_vec(),
    };

    let mut view = CatalogView::default();
    view.render(&products, &SelectionStore::new());
    display::print_view(&view);
    Ok(())
}

async fn cmd_categories(config: &Config) -> Result<()> {
    let catalog = load_catalog(config).await?;
    display::print_categories(&catalog.categories());
    Ok(())
}

/// Build an app with a loaded catalog and the given products selected
async fn app_with_selection(config: &Config, ids: &[String]) -> Result<App> {
    let mut app = App::from_config(config)?;
    app.reload().await.context("Failed to load catalog")?;
    for id in ids {
        app.select(id)?;
    }
    Ok(app)
}

async fn cmd_ask(config: &Config, message: &str, select: &[String]) -> Result<()> {
    let mut app = app_with_selection(config, select).await?;
    app.send(message).await?;

    if let Some(turn) = app.chat().transcript().last() {
        display::print_turn(turn);
    }
    display::print_flagged(app.chat());
    Ok(())
}

async fn cmd_routine(config: &Config, select: &[String]) -> Result<()> {
    let mut app = app_with_selection(config, select).await?;
    let routine = app.routine()?;
    display::print_routine(&routine);
    println!("{} {} products", "✓".green(), routine.entries.len());
    Ok(())
}
