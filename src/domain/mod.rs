mod activity;
mod inventory;
mod quantity;

pub use activity::*;
pub use inventory::*;
pub use quantity::*;
