//! Process command - estimate emissions from a single receipt image.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use recarbo_core::{
    Catalog, ItemMatcher, LineFilter, ProcessResult, RecarboConfig, ReceiptProcessor, Report,
    TesseractEngine,
};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input receipt image (PNG, JPEG, ...)
    #[arg(required = true)]
    input: PathBuf,

    /// Reference catalog CSV (overrides config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show candidate and match statistics
    #[arg(long)]
    show_stats: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing receipt: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Loading catalog...");
    pb.set_position(10);
    let processor = build_processor(&config, args.catalog.as_deref())?;

    pb.set_message("Reading image...");
    pb.set_position(30);
    let image = fs::read(&args.input)?;

    pb.set_message("Extracting and matching items...");
    pb.set_position(50);
    let result = processor.process(&image)?;

    pb.set_position(100);
    pb.finish_with_message("Done");

    let output = format_report(&result.report, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_stats {
        print_stats(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Build the pipeline from config, with an optional catalog path override.
pub fn build_processor(
    config: &RecarboConfig,
    catalog_override: Option<&std::path::Path>,
) -> anyhow::Result<ReceiptProcessor<TesseractEngine>> {
    let catalog_path = catalog_override.unwrap_or(&config.catalog.path);
    let catalog = Catalog::from_csv_path(catalog_path).map_err(|e| {
        anyhow::anyhow!("failed to load catalog from {}: {}", catalog_path.display(), e)
    })?;
    debug!("Catalog loaded: {} entries", catalog.len());

    let engine = TesseractEngine::from_config(&config.ocr)
        .map_err(|e| anyhow::anyhow!("failed to initialize OCR engine: {}", e))?;

    let filter = LineFilter::with_markers(config.matching.noise_markers.iter().cloned());
    let matcher = ItemMatcher::new().with_threshold(config.matching.threshold);

    Ok(ReceiptProcessor::new(engine, Arc::new(catalog))
        .with_filter(filter)
        .with_matcher(matcher))
}

fn print_stats(result: &ProcessResult) {
    println!();
    println!(
        "{} Candidate lines: {}",
        style("ℹ").blue(),
        result.candidate_count
    );
    println!(
        "{} Unmatched items: {}",
        style("ℹ").blue(),
        result.unmatched_count
    );
    println!(
        "{} Processing time: {}ms",
        style("ℹ").blue(),
        result.processing_time_ms
    );
}

pub fn format_report(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => format_text(report),
    }
}

fn format_csv(report: &Report) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "item",
        "category",
        "co2_per_unit",
        "unit",
        "quantity",
        "total_co2",
    ])?;

    for item in &report.items {
        wtr.write_record([
            &item.item,
            &item.category,
            &item.co2_per_unit.to_string(),
            &item.unit,
            &item.quantity.to_string(),
            &item.total_co2.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &Report) -> anyhow::Result<String> {
    let mut output = String::new();

    output.push_str("Items:\n");
    for item in &report.items {
        output.push_str(&format!(
            "  {:<30} {:<12} {:>8.3} kg CO2\n",
            item.item, item.category, item.total_co2
        ));
    }
    output.push('\n');
    output.push_str(&format!("Total: {:.3} kg CO2\n", report.total_co2));

    Ok(output)
}
