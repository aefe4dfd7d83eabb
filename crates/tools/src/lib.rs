//! Tool implementations for LedgerLens.
//!
//! Each tool is a side-effect-free read over the shared record store,
//! described to the LLM so it can autonomously decide which to call for
//! a given question. Tools return empty/zero results for unknown
//! customers; "no data" is an answer, not an error.

pub mod all_balances;
pub mod customer_directory;
pub mod customer_lookup;
pub mod invoice_history;
pub mod outstanding_balance;
pub mod payment_history;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use ledgerlens_core::tool::ToolRegistry;
use ledgerlens_store::RecordStore;

/// Create a registry with every billing data tool, all sharing one
/// record store.
pub fn default_registry(store: Arc<RecordStore>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(customer_lookup::CustomerLookupTool::new(store.clone())));
    registry.register(Box::new(invoice_history::InvoiceHistoryTool::new(store.clone())));
    registry.register(Box::new(payment_history::PaymentHistoryTool::new(store.clone())));
    registry.register(Box::new(outstanding_balance::OutstandingBalanceTool::new(store.clone())));
    registry.register(Box::new(customer_directory::CustomerDirectoryTool::new(store.clone())));
    registry.register(Box::new(all_balances::AllBalancesTool::new(store)));
    registry
}

/// The calendar date used as "now" for lookback windows.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
