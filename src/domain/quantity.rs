use std::fmt;

/// Stock is counted in whole units. Signed on purpose: negative additions
/// are accepted and can drive an item below zero.
pub type Quantity = i64;

/// Default threshold for the low-stock query.
pub const DEFAULT_LOW_STOCK_THRESHOLD: Quantity = 5;

/// Parse a raw quantity string (from the command line or an import file).
/// Example: "10" -> 10, " -2 " -> -2, "+3" -> 3
pub fn parse_quantity(input: &str) -> Result<Quantity, ParseQuantityError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseQuantityError::Empty);
    }
    input
        .parse()
        .map_err(|_| ParseQuantityError::NotAnInteger(input.to_string()))
}

/// An item name must contain something other than whitespace.
/// Valid names are used verbatim as keys, padding included.
pub fn is_valid_item(name: &str) -> bool {
    !name.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseQuantityError {
    Empty,
    NotAnInteger(String),
}

impl fmt::Display for ParseQuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseQuantityError::Empty => write!(f, "quantity is empty"),
            ParseQuantityError::NotAnInteger(raw) => {
                write!(f, "'{}' is not a whole number", raw)
            }
        }
    }
}

impl std::error::Error for ParseQuantityError {}
