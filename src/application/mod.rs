// Application layer - use cases and orchestration.
// The service owns the in-memory ledger and its backing file and is the
// only place that emits diagnostics.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
