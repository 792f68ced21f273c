use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{InventoryService, LoadOutcome};
use crate::domain::{Quantity, RemoveOutcome, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::storage::DEFAULT_INVENTORY_FILE;

/// Stockroom - Inventory Ledger
#[derive(Parser)]
#[command(name = "stockroom")]
#[command(about = "Track item quantities in a local JSON file")]
#[command(version)]
pub struct Cli {
    /// Inventory file path
    #[arg(short, long, global = true, default_value = DEFAULT_INVENTORY_FILE)]
    pub file: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add stock for an item (negative quantities lower the stock)
    Add {
        /// Item name
        item: String,

        /// Quantity to add (whole number, may be negative)
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Remove stock; the item is dropped once it reaches zero
    Remove {
        /// Item name
        item: String,

        /// Quantity to remove
        #[arg(allow_negative_numbers = true)]
        quantity: Quantity,
    },

    /// Show the quantity of an item
    Get {
        /// Item name
        item: String,
    },

    /// List items below a stock threshold
    Low {
        /// Items with a quantity strictly below this are listed
        #[arg(short, long, default_value_t = DEFAULT_LOW_STOCK_THRESHOLD, allow_negative_numbers = true)]
        threshold: Quantity,
    },

    /// Print every item and its quantity
    Report,

    /// Export the inventory to CSV or JSON
    Export {
        /// Format: csv, json
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Bulk-add stock from a CSV file with `item,quantity` rows
    Import {
        /// Input CSV file
        input: String,

        /// Validate without changing the inventory
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the demonstration sequence against the inventory file
    Demo,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Add { item, quantity } => {
                let mut service = open_service(&self.file)?;
                let total = service.add_from_input(&item, &quantity, None)?;
                service.save()?;
                println!("{} -> {}", item, total);
            }

            Commands::Remove { item, quantity } => {
                let mut service = open_service(&self.file)?;
                let outcome = service.remove(&item, quantity)?;
                service.save()?;
                match outcome {
                    RemoveOutcome::Remaining(left) => println!("{} -> {}", item, left),
                    RemoveOutcome::Deleted { shortfall: 0 } => {
                        println!("{} is out of stock and was removed", item)
                    }
                    RemoveOutcome::Deleted { shortfall } => println!(
                        "{} is out of stock and was removed ({} more than available)",
                        item, shortfall
                    ),
                }
            }

            Commands::Get { item } => {
                let service = open_service(&self.file)?;
                println!("{}", service.get_quantity(&item));
            }

            Commands::Low { threshold } => {
                let service = open_service(&self.file)?;
                let low = service.low_stock(threshold);
                if low.is_empty() {
                    println!("No items below {}.", threshold);
                } else {
                    for item in low {
                        println!("{}", item);
                    }
                }
            }

            Commands::Report => {
                let service = open_service(&self.file)?;
                service.report()?;
            }

            Commands::Export { format, output } => {
                let service = open_service(&self.file)?;
                run_export_command(&service, &format, output.as_deref())?;
            }

            Commands::Import { input, dry_run } => {
                let mut service = open_service(&self.file)?;
                run_import_command(&mut service, &input, dry_run)?;
            }

            Commands::Demo => run_demo(&self.file, self.verbose)?,
        }

        Ok(())
    }
}

fn open_service(path: &str) -> Result<InventoryService> {
    InventoryService::open(path).with_context(|| format!("Failed to load inventory from {}", path))
}

fn run_export_command(service: &InventoryService, format: &str, output: Option<&str>) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = match format.to_lowercase().as_str() {
        "csv" => exporter.export_csv(writer)?,
        "json" => exporter.export_json(writer)?,
        other => bail!("Unknown export format '{}'. Valid formats: csv, json", other),
    };

    if let Some(path) = output {
        eprintln!("Exported {} item(s) to {}", count, path);
    }
    Ok(())
}

fn run_import_command(service: &mut InventoryService, input: &str, dry_run: bool) -> Result<()> {
    use crate::io::{ImportOptions, Importer};
    use std::fs::File;

    let file = File::open(input).with_context(|| format!("Failed to open input file: {}", input))?;
    let result = Importer::new(service).import_csv(file, ImportOptions { dry_run })?;

    if dry_run {
        println!("Dry run: {} row(s) valid, {} invalid", result.imported, result.skipped);
    } else {
        service.save()?;
        println!("Imported {} row(s), skipped {}", result.imported, result.skipped);
    }

    for error in &result.errors {
        println!("  line {}: {}", error.line, error.error);
    }
    Ok(())
}

/// Walk through the basic operations: a few additions and removals, a
/// couple of queries, then a save/reload cycle and a report.
fn run_demo(path: &str, verbose: bool) -> Result<()> {
    let mut service = InventoryService::new(path);
    let mut activity = Vec::new();

    service.add_with_activity("apple", 10, Some(&mut activity))?;
    service.add_with_activity("banana", -2, Some(&mut activity))?;
    service.add_with_activity("orange", 3, Some(&mut activity))?;
    service.remove("apple", 3)?;
    service.remove("orange", 1)?;

    println!("Apple stock: {}", service.get_quantity("apple"));
    println!(
        "Low items: {:?}",
        service.low_stock(DEFAULT_LOW_STOCK_THRESHOLD)
    );

    service.save()?;
    if service.load()? == LoadOutcome::Missing {
        bail!("Inventory file {} vanished after saving", path);
    }
    service.report()?;

    if verbose {
        eprintln!("Activity:");
        for entry in &activity {
            eprintln!("  {}", entry);
        }
    }
    Ok(())
}
