use anyhow::Result;
use std::io::Read;

use crate::application::{InventoryError, InventoryService};
use crate::domain::{parse_quantity, Inventory};

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
}

/// Importer for bulk-adding stock from CSV
pub struct Importer<'a> {
    service: &'a mut InventoryService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a mut InventoryService) -> Self {
        Self { service }
    }

    /// Import `item,quantity` rows from CSV. Each valid row is an `add`;
    /// invalid rows are reported and skipped.
    ///
    /// A dry run replays the rows against a scratch copy of the ledger, so
    /// it reports the same rows as a real import would, overflow included.
    pub fn import_csv<R: Read>(&mut self, reader: R, options: ImportOptions) -> Result<ImportResult> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut scratch = options.dry_run.then(|| self.service.inventory().clone());
        let mut result = ImportResult::default();

        for (index, record) in csv_reader.records().enumerate() {
            // Fallback when the reader has no position: +2 for header and 0-indexing
            let fallback_line = index + 2;

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    let line = e.position().map_or(fallback_line, |p| p.line() as usize);
                    result.skip(line, format!("CSV parse error: {}", e));
                    continue;
                }
            };
            let line = record.position().map_or(fallback_line, |p| p.line() as usize);

            let item = record.get(0).unwrap_or("");
            let raw_quantity = record.get(1).unwrap_or("");

            let applied = match scratch.as_mut() {
                Some(inventory) => dry_run_row(inventory, item, raw_quantity),
                None => self
                    .service
                    .add_from_input(item, raw_quantity, None)
                    .map(|_| ())
                    .map_err(|e| e.to_string()),
            };

            match applied {
                Ok(()) => result.imported += 1,
                Err(e) => result.skip(line, e),
            }
        }

        Ok(result)
    }
}

impl ImportResult {
    fn skip(&mut self, line: usize, error: String) {
        self.skipped += 1;
        self.errors.push(ImportError { line, error });
    }
}

fn dry_run_row(inventory: &mut Inventory, item: &str, raw_quantity: &str) -> Result<(), String> {
    let quantity = parse_quantity(raw_quantity).map_err(|reason| {
        InventoryError::InvalidQuantity {
            item: item.to_string(),
            reason,
        }
        .to_string()
    })?;
    inventory
        .add(item, quantity)
        .map(|_| ())
        .map_err(|e| InventoryError::from(e).to_string())
}
