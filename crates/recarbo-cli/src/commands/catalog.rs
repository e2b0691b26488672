//! Catalog command - inspect and validate the reference catalog.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use recarbo_core::Catalog;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Reference catalog CSV (overrides config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// Load the catalog and report problems
    Validate,

    /// Show catalog entries grouped by category
    Show,
}

pub async fn run(args: CatalogArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let catalog_path = args.catalog.unwrap_or(config.catalog.path);

    let catalog = match Catalog::from_csv_path(&catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!(
                "{} Catalog {} failed to load: {}",
                style("✗").red(),
                catalog_path.display(),
                e
            );
            anyhow::bail!("catalog validation failed");
        }
    };

    match args.command {
        CatalogCommand::Validate => {
            println!(
                "{} Catalog {} is valid: {} entries",
                style("✓").green(),
                catalog_path.display(),
                catalog.len()
            );
        }
        CatalogCommand::Show => show_catalog(&catalog),
    }

    Ok(())
}

fn show_catalog(catalog: &Catalog) {
    let mut by_category: BTreeMap<&str, Vec<&recarbo_core::CatalogEntry>> = BTreeMap::new();
    for entry in catalog.entries() {
        by_category.entry(&entry.category).or_default().push(entry);
    }

    for (category, entries) in &by_category {
        println!("{} ({} items)", style(category).bold(), entries.len());
        for entry in entries {
            println!(
                "  {:<30} {:>8.3} kg CO2 / {}",
                entry.item, entry.co2_per_unit, entry.unit
            );
        }
        println!();
    }

    println!("{} entries total", catalog.len());
}
