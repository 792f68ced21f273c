// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Once;

use anyhow::Result;
use log::{Level, LevelFilter, Log, Metadata, Record};
use stockroom::application::InventoryService;
use tempfile::TempDir;

/// Helper to create a test service backed by a file in a temporary directory
pub fn test_service() -> Result<(InventoryService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = InventoryService::new(inventory_path(&temp_dir));
    Ok((service, temp_dir))
}

pub fn inventory_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("inventory.json")
}

/// Test fixture: the demonstration stock levels
pub struct DemoStock;

impl DemoStock {
    /// apple 10, banana -2, orange 3, then remove apple 3 and orange 1
    pub fn apply(service: &mut InventoryService) -> Result<()> {
        service.add("apple", 10)?;
        service.add("banana", -2)?;
        service.add("orange", 3)?;
        service.remove("apple", 3)?;
        service.remove("orange", 1)?;
        Ok(())
    }
}

/// Snapshot of the ledger as (item, quantity) pairs in order
pub fn levels(service: &InventoryService) -> Vec<(String, i64)> {
    service
        .inventory()
        .iter()
        .map(|(item, qty)| (item.to_string(), qty))
        .collect()
}

/// Logger that keeps the records emitted on the current thread, so tests
/// running in parallel each see only their own diagnostics.
struct CapturingLogger;

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

static LOGGER: CapturingLogger = CapturingLogger;
static INSTALL: Once = Once::new();

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|captured| {
            captured
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

/// Install the capturing logger (once per test binary) and clear this
/// thread's buffer.
pub fn capture_logs() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("another logger is already installed");
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

/// Take the records captured on this thread since the last call.
pub fn take_logs() -> Vec<(Level, String)> {
    CAPTURED.with(|captured| captured.borrow_mut().drain(..).collect())
}

/// Take this thread's records at info, warn and error level.
pub fn take_logs_at_least_info() -> Vec<(Level, String)> {
    take_logs()
        .into_iter()
        .filter(|(level, _)| *level <= Level::Info)
        .collect()
}
