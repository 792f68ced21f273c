use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::InventoryService;
use crate::domain::StockLevels;

/// Point-in-time copy of the inventory for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub exported_at: DateTime<Utc>,
    pub item_count: usize,
    pub items: StockLevels,
}

/// Exporter for converting inventory data to other formats
pub struct Exporter<'a> {
    service: &'a InventoryService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a InventoryService) -> Self {
        Self { service }
    }

    /// Export stock levels to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["item", "quantity"])?;

        let mut count = 0;
        for (item, quantity) in self.service.inventory().iter() {
            csv_writer.write_record([item, quantity.to_string().as_str()])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        let items = self.service.inventory().items().clone();
        InventorySnapshot {
            exported_at: Utc::now(),
            item_count: items.len(),
            items,
        }
    }

    /// Export a timestamped snapshot as pretty JSON
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let snapshot = self.snapshot();
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writeln!(writer)?;
        Ok(snapshot.item_count)
    }
}
