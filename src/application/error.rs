use thiserror::Error;

use crate::domain::{ParseQuantityError, Quantity, StockError};
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Invalid item name: {0:?}")]
    InvalidItem(String),

    #[error("Invalid quantity for {item}: {reason}")]
    InvalidQuantity {
        item: String,
        reason: ParseQuantityError,
    },

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Quantity overflow for {item}: {current} {delta:+} is out of range")]
    QuantityOverflow {
        item: String,
        current: Quantity,
        delta: Quantity,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<StockError> for InventoryError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::InvalidItem(raw) => InventoryError::InvalidItem(raw),
            StockError::ItemNotFound(item) => InventoryError::ItemNotFound(item),
            StockError::Overflow {
                item,
                current,
                delta,
            } => InventoryError::QuantityOverflow {
                item,
                current,
                delta,
            },
        }
    }
}
