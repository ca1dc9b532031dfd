use anyhow::{Context, Result};
use chronicle::app::{App, AppEvent};
use chronicle::catalog::{search, Catalog};
use chronicle::config::Config;
use chronicle::pager::Pager;
use chronicle::ui;
use chronicle::util::{validate_embed_base, DEFAULT_EMBED_BASE};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Get the config directory path (~/.config/chronicle/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("chronicle"))
}

#[derive(Parser, Debug)]
#[command(
    name = "chronicle",
    about = "Terminal front page with auto-scrolling news columns"
)]
struct Args {
    /// Config file (default: ~/.config/chronicle/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog JSON file to read instead of the bundled one
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Theme variant (dark or light)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Write logs to this file (RUST_LOG sets the filter, default info)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print search suggestions for QUERY and exit
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,
}

/// The TUI owns the terminal, so logs only reach stderr at error level
/// unless redirected to a file.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog '{}'", path.display())),
        None => Catalog::bundled().context("Bundled catalog is invalid"),
    }
}

fn print_suggestions(catalog: &Catalog, query: &str, columns_per_page: usize) {
    let hits = search(catalog, query);
    if hits.is_empty() {
        println!("No matches found");
        return;
    }
    let pager = Pager::new(catalog.columns.len(), columns_per_page);
    for hit in hits {
        println!(
            "{}\n    {} • {}  (column {}, page {})",
            hit.article.title,
            hit.article.category,
            hit.article.author,
            hit.column_id,
            pager.page_for_column(hit.location.column) + 1
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config '{}'", config_path.display()))?;

    if let Some(theme) = args.theme {
        config.theme = theme;
    }

    if let Err(e) = validate_embed_base(&config.embed_base_url) {
        tracing::warn!(
            error = %e,
            base = %config.embed_base_url,
            "Rejected embed base, using default"
        );
        eprintln!("Warning: {}; using {}", e, DEFAULT_EMBED_BASE);
        config.embed_base_url = DEFAULT_EMBED_BASE.to_string();
    }

    let catalog_path = args.catalog.or_else(|| config.catalog.clone());
    let catalog = load_catalog(catalog_path.as_deref())?;
    tracing::info!(
        columns = catalog.columns.len(),
        articles = catalog.article_count(),
        trending = catalog.trending.len(),
        "Catalog loaded"
    );

    if let Some(query) = args.search {
        print_suggestions(&catalog, &query, config.columns_per_page);
        return Ok(());
    }

    let mut app = App::new(Arc::new(catalog), &config);

    // Channel for deferred jump steps
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
