//! Payment history tool — windowed payment listing for a customer.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledgerlens_core::error::ToolError;
use ledgerlens_core::tool::{Tool, ToolResult};
use ledgerlens_store::{queries, RecordStore};

use crate::invoice_history::window_months;

pub struct PaymentHistoryTool {
    store: Arc<RecordStore>,
    fixed_today: Option<NaiveDate>,
}

impl PaymentHistoryTool {
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
impl Tool for PaymentHistoryTool {
    fn name(&self) -> &str {
        "payment_history"
    }

    fn description(&self) -> &str {
        "Gets all payments made by a customer within a specified time period. Includes payment amounts and dates. Accepts a customer name or CustomerID."
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

        let payments = if let Some(id) = arguments["customer_id"].as_str() {
            queries::payments_for_customer_id(&self.store, id, months, today)
        } else if let Some(name) = arguments["customer_name"].as_str() {
            queries::payments_for_customer_name(&self.store, name, months, today)
        } else {
            return Err(ToolError::InvalidArguments(
                "Provide 'customer_name' or 'customer_id'".into(),
            ));
        };

        let payload = serde_json::to_value(&payments).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().into(),
            reason: e.to_string(),
        })?;
        Ok(ToolResult::json(&payload))
    }
}
