//! # LedgerLens Store
//!
//! The deterministic half of the pipeline: an in-memory record store
//! loaded from CSV sources, the filter resolution engine that turns a
//! [`ledgerlens_core::FilterSpec`] into a [`ledgerlens_core::FilterResult`],
//! and the narrower aggregation queries exposed to the tool-calling layer.
//!
//! Every operation here is a pure, synchronous function of the current
//! store snapshot — no network, no hidden state, no clock reads (callers
//! inject "today").

mod csv_source;
pub mod queries;
mod record_store;
pub mod resolve;

pub use record_store::{CsvSources, RecordStore};
pub use resolve::{cutoff_date, days_late, resolve_filter};
