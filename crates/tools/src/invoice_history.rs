//! Invoice history tool — windowed invoice listing for a customer.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledgerlens_core::error::ToolError;
use ledgerlens_core::tool::{Tool, ToolResult};
use ledgerlens_store::{queries, RecordStore};

pub struct InvoiceHistoryTool {
    store: Arc<RecordStore>,
    /// Fixed "today" for deterministic tests; `None` uses the real clock.
    fixed_today: Option<NaiveDate>,
}

impl InvoiceHistoryTool {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            store,
            fixed_today: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(crate::today)
    }
}

#[async_trait]
impl Tool for InvoiceHistoryTool {
    fn name(&self) -> &str {
        "invoice_history"
    }

    fn description(&self) -> &str {
        "Gets all invoices for a customer within a specified time period. Includes invoice amounts, due dates, and payment dates. Accepts a customer name or CustomerID."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "customer_name": {
                    "type": "string",
                    "description": "The name of the customer"
                },
                "customer_id": {
                    "type": "string",
                    "description": "The CustomerID (alternative to customer_name)"
                },
                "months": {
                    "type": "integer",
                    "description": "Number of months to look back (e.g., 6 for last 6 months)",
                    "default": 6
                }
            }
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let months = window_months(&arguments);
        let today = self.today();

        let invoices = if let Some(id) = arguments["customer_id"].as_str() {
            queries::invoices_for_customer_id(&self.store, id, months, today)
        } else if let Some(name) = arguments["customer_name"].as_str() {
            queries::invoices_for_customer_name(&self.store, name, months, today)
        } else {
            return Err(ToolError::InvalidArguments(
                "Provide 'customer_name' or 'customer_id'".into(),
            ));
        };

        let payload = serde_json::to_value(&invoices).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().into(),
            reason: e.to_string(),
        })?;
        Ok(ToolResult::json(&payload))
    }
}

/// Lookback window from the arguments, defaulting to 6 months.
pub(crate) fn window_months(arguments: &serde_json::Value) -> u32 {
    arguments["months"]
        .as_u64()
        .map(|m| m.min(u32::MAX as u64) as u32)
        .unwrap_or(queries::DEFAULT_WINDOW_MONTHS)
}
