//! HTTP upload service for receipt carbon-footprint estimation.

mod api;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recarbo_core::{
    Catalog, ItemMatcher, LineFilter, RecarboConfig, ReceiptProcessor, TesseractEngine,
    TextExtractor,
};

use api::AppState;

/// Receipt carbon footprint upload service
#[derive(Parser)]
#[command(name = "recarbo-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind
    #[arg(short, long, default_value = "0.0.0.0:5002")]
    bind: String,

    /// Reference catalog CSV (overrides config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RecarboConfig::from_file(path)?,
        None => RecarboConfig::default(),
    };

    info!(
        "Starting recarbo-server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // The catalog loads exactly once, before the listener binds. A load
    // failure aborts startup: the service must not run without it.
    let catalog_path = args.catalog.as_ref().unwrap_or(&config.catalog.path);
    let catalog = Arc::new(Catalog::from_csv_path(catalog_path)?);
    info!(
        "Catalog loaded: {} entries from {}",
        catalog.len(),
        catalog_path.display()
    );

    let engine: Box<dyn TextExtractor> = Box::new(TesseractEngine::from_config(&config.ocr)?);

    let processor = ReceiptProcessor::new(engine, catalog)
        .with_filter(LineFilter::with_markers(
            config.matching.noise_markers.iter().cloned(),
        ))
        .with_matcher(ItemMatcher::new().with_threshold(config.matching.threshold));

    let state = Arc::new(AppState { processor });
    let app = api::router(state);

    let listener = TcpListener::bind(&args.bind).await?;
    info!("Listening on {}", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
