use indexmap::IndexMap;

use super::{is_valid_item, Quantity};

/// Item name -> quantity, kept in first-insertion order.
pub type StockLevels = IndexMap<String, Quantity>;

/// The in-memory stock ledger.
///
/// Pure data and arithmetic: no I/O and no diagnostics. The application
/// layer wraps it with persistence and logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: StockLevels,
}

/// What happened to an item after a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The item is still stocked with this quantity.
    Remaining(Quantity),
    /// The quantity reached zero or below and the item was dropped.
    /// `shortfall` is how far below zero the removal went.
    Deleted { shortfall: u64 },
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: StockLevels) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &StockLevels {
        &self.items
    }

    pub fn into_items(self) -> StockLevels {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.items.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Add `quantity` to an item, creating it if needed, and return the new total.
    ///
    /// Any sign is accepted: a negative quantity lowers the stock with no
    /// floor, unlike `remove`, which drops the item once it reaches zero.
    pub fn add(&mut self, item: &str, quantity: Quantity) -> Result<Quantity, StockError> {
        if !is_valid_item(item) {
            return Err(StockError::InvalidItem(item.to_string()));
        }

        let current = self.items.get(item).copied().unwrap_or(0);
        let total = current
            .checked_add(quantity)
            .ok_or_else(|| StockError::Overflow {
                item: item.to_string(),
                current,
                delta: quantity,
            })?;

        // Re-inserting an existing key keeps its position.
        self.items.insert(item.to_string(), total);
        Ok(total)
    }

    /// Take `quantity` away from an existing item.
    /// The item is deleted, not clamped, when its quantity drops to zero or below.
    pub fn remove(&mut self, item: &str, quantity: Quantity) -> Result<RemoveOutcome, StockError> {
        let current = self
            .items
            .get(item)
            .copied()
            .ok_or_else(|| StockError::ItemNotFound(item.to_string()))?;

        let remaining = current
            .checked_sub(quantity)
            .ok_or_else(|| StockError::Overflow {
                item: item.to_string(),
                current,
                delta: quantity.saturating_neg(),
            })?;

        if remaining <= 0 {
            self.items.shift_remove(item);
            Ok(RemoveOutcome::Deleted {
                shortfall: remaining.unsigned_abs(),
            })
        } else {
            self.items.insert(item.to_string(), remaining);
            Ok(RemoveOutcome::Remaining(remaining))
        }
    }

    pub fn get(&self, item: &str) -> Option<Quantity> {
        self.items.get(item).copied()
    }

    /// Items with a quantity strictly below `threshold`, in ledger order.
    pub fn low_stock(&self, threshold: Quantity) -> Vec<&str> {
        self.iter()
            .filter(|(_, qty)| *qty < threshold)
            .map(|(name, _)| name)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    InvalidItem(String),
    ItemNotFound(String),
    Overflow {
        item: String,
        current: Quantity,
        delta: Quantity,
    },
}

impl std::fmt::Display for StockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockError::InvalidItem(raw) => write!(f, "invalid item name {:?}", raw),
            StockError::ItemNotFound(item) => write!(f, "item not found: {}", item),
            StockError::Overflow {
                item,
                current,
                delta,
            } => write!(
                f,
                "quantity overflow for {}: {} {:+} does not fit",
                item, current, delta
            ),
        }
    }
}

impl std::error::Error for StockError {}
