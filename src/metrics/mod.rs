// Metric derivation and threshold evaluation
pub mod aggregate;
pub mod resolver;
pub mod evaluate;

// Re-export commonly used items
pub use aggregate::{ingest, emit_metrics};
pub use resolver::{resolve, resolve_kind};
pub use evaluate::evaluate;
