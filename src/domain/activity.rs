use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::Quantity;

/// A record of a single addition. Only kept in a collection the caller
/// hands in; never written to the inventory file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Local>,
    pub item: String,
    pub quantity: Quantity,
}

impl ActivityEntry {
    pub fn added(item: impl Into<String>, quantity: Quantity) -> Self {
        Self::added_at(item, quantity, Local::now())
    }

    pub fn added_at(item: impl Into<String>, quantity: Quantity, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            item: item.into(),
            quantity,
        }
    }
}

impl std::fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: Added {} of {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.6f"),
            self.quantity,
            self.item
        )
    }
}
