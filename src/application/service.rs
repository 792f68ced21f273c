use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::{
    parse_quantity, ActivityEntry, Inventory, Quantity, RemoveOutcome, StockError, StockLevels,
};
use crate::storage::{load_levels, save_levels, FileStore, StorageError};

use super::InventoryError;

/// Application service providing the inventory operations.
/// This is the primary interface for any client (CLI, import, tests).
///
/// Each instance owns its own ledger and backing file, so several can
/// coexist. Every operation reports its outcome both as a return value and
/// as a diagnostic through the `log` facade.
pub struct InventoryService {
    inventory: Inventory,
    store: FileStore,
}

/// Result of loading the inventory file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read; the ledger now holds this many items.
    Loaded(usize),
    /// There was no file; the ledger was reset to empty.
    Missing,
}

impl InventoryService {
    /// Create a service with an empty ledger backed by `path`.
    /// Nothing is read until `load` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inventory: Inventory::new(),
            store: FileStore::new(path),
        }
    }

    /// Create a service and load `path` into it.
    /// A missing file yields an empty ledger; a corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, InventoryError> {
        let mut service = Self::new(path);
        service.load()?;
        Ok(service)
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    // ========================
    // Stock operations
    // ========================

    /// Add stock and return the new total.
    ///
    /// Negative quantities are applied as-is and may take an item below
    /// zero; `remove` is the path that drops items.
    pub fn add(&mut self, item: &str, quantity: Quantity) -> Result<Quantity, InventoryError> {
        self.add_with_activity(item, quantity, None)
    }

    /// Add stock, appending an activity entry to `activity` on success.
    pub fn add_with_activity(
        &mut self,
        item: &str,
        quantity: Quantity,
        activity: Option<&mut Vec<ActivityEntry>>,
    ) -> Result<Quantity, InventoryError> {
        match self.inventory.add(item, quantity) {
            Ok(total) => {
                if let Some(entries) = activity {
                    entries.push(ActivityEntry::added(item, quantity));
                }
                log::info!("Added {} of {}", quantity, item);
                Ok(total)
            }
            Err(err @ StockError::InvalidItem(_)) => {
                log::warn!("Invalid input for add: {:?}, {}", item, quantity);
                Err(err.into())
            }
            Err(err) => {
                log::error!("Error adding item {}: {}", item, err);
                Err(err.into())
            }
        }
    }

    /// Add stock from unparsed input, such as a command-line argument or an
    /// import row. Input that is not a whole number is rejected.
    pub fn add_from_input(
        &mut self,
        item: &str,
        raw_quantity: &str,
        activity: Option<&mut Vec<ActivityEntry>>,
    ) -> Result<Quantity, InventoryError> {
        let quantity = parse_quantity(raw_quantity).map_err(|reason| {
            log::warn!("Invalid input for add: {:?}, {:?}", item, raw_quantity);
            InventoryError::InvalidQuantity {
                item: item.to_string(),
                reason,
            }
        })?;
        self.add_with_activity(item, quantity, activity)
    }

    /// Remove stock. The item is dropped once its quantity reaches zero or below.
    pub fn remove(
        &mut self,
        item: &str,
        quantity: Quantity,
    ) -> Result<RemoveOutcome, InventoryError> {
        match self.inventory.remove(item, quantity) {
            Ok(outcome) => {
                if let RemoveOutcome::Deleted { shortfall } = outcome {
                    log::debug!("{} dropped from inventory (shortfall {})", item, shortfall);
                }
                log::info!("Removed {} of {}", quantity, item);
                Ok(outcome)
            }
            Err(err @ StockError::ItemNotFound(_)) => {
                log::warn!("Attempted to remove non-existent item: {}", item);
                Err(err.into())
            }
            Err(err) => {
                log::error!("Error removing item {}: {}", item, err);
                Err(err.into())
            }
        }
    }

    /// Current quantity, or 0 when the item is not stocked.
    pub fn get_quantity(&self, item: &str) -> Quantity {
        match self.inventory.get(item) {
            Some(quantity) => quantity,
            None => {
                log::warn!("Item not found: {}", item);
                0
            }
        }
    }

    /// Items strictly below `threshold`, in ledger order.
    pub fn low_stock(&self, threshold: Quantity) -> Vec<&str> {
        self.inventory.low_stock(threshold)
    }

    // ========================
    // Persistence
    // ========================

    /// Replace the ledger with the contents of the backing file.
    pub fn load(&mut self) -> Result<LoadOutcome, InventoryError> {
        let loaded = self.store.load();
        let path = self.store.path().to_path_buf();
        self.replace_with(&path, loaded)
    }

    /// Replace the ledger with the contents of `path`. Never merges.
    ///
    /// On any failure the ledger is left empty.
    pub fn load_from(&mut self, path: &Path) -> Result<LoadOutcome, InventoryError> {
        self.replace_with(path, load_levels(path))
    }

    fn replace_with(
        &mut self,
        path: &Path,
        loaded: Result<StockLevels, StorageError>,
    ) -> Result<LoadOutcome, InventoryError> {
        match loaded {
            Ok(levels) => {
                self.inventory = Inventory::from_items(levels);
                log::info!("Data loaded from {}", path.display());
                Ok(LoadOutcome::Loaded(self.inventory.len()))
            }
            Err(StorageError::NotFound(_)) => {
                self.inventory.clear();
                log::warn!(
                    "File {} not found. Starting with empty inventory.",
                    path.display()
                );
                Ok(LoadOutcome::Missing)
            }
            Err(err) => {
                self.inventory.clear();
                log::error!("Error loading data: {}", err);
                Err(err.into())
            }
        }
    }

    /// Write the whole ledger to the backing file, replacing its contents.
    pub fn save(&self) -> Result<(), InventoryError> {
        let saved = self.store.save(self.inventory.items());
        Self::report_save(self.store.path(), saved)
    }

    /// Write the whole ledger to `path`, replacing its contents.
    pub fn save_to(&self, path: &Path) -> Result<(), InventoryError> {
        Self::report_save(path, save_levels(path, self.inventory.items()))
    }

    fn report_save(path: &Path, saved: Result<(), StorageError>) -> Result<(), InventoryError> {
        match saved {
            Ok(()) => {
                log::info!("Data saved to {}", path.display());
                Ok(())
            }
            Err(err) => {
                log::error!("Error saving data: {}", err);
                Err(err.into())
            }
        }
    }

    // ========================
    // Reporting
    // ========================

    /// Print the item listing to stdout.
    pub fn report(&self) -> io::Result<()> {
        let stdout = io::stdout();
        self.write_report(stdout.lock())
    }

    /// Render the item listing into `writer`.
    pub fn write_report<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "Items Report:")?;
        for (item, quantity) in self.inventory.iter() {
            writeln!(writer, "{} -> {}", item, quantity)?;
        }
        writer.flush()
    }
}
