//! Data module - CSV loading and aggregation

mod aggregator;
mod loader;
mod records;

pub use aggregator::{Aggregation, Aggregator, MetricRow};
pub use loader::load_records;
pub use records::RawRecord;
