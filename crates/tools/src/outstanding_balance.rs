//! Outstanding balance tool.

use std::sync::Arc;

use async_trait::async_trait;
use ledgerlens_core::error::ToolError;
use ledgerlens_core::tool::{Tool, ToolResult};
use ledgerlens_store::{queries, RecordStore};

pub struct OutstandingBalanceTool {
    store: Arc<RecordStore>,
}

impl OutstandingBalanceTool {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for OutstandingBalanceTool {
    fn name(&self) -> &str {
        "outstanding_balance"
    }

    fn description(&self) -> &str {
        "Calculates the current outstanding balance for a customer (sum of all unpaid invoices, not limited to any time period). Accepts a customer name or CustomerID."
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
                }
            }
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let balance = if let Some(id) = arguments["customer_id"].as_str() {
            queries::outstanding_balance_by_id(&self.store, id)
        } else if let Some(name) = arguments["customer_name"].as_str() {
            queries::outstanding_balance_by_name(&self.store, name)
        } else {
            return Err(ToolError::InvalidArguments(
                "Provide 'customer_name' or 'customer_id'".into(),
            ));
        };

        let payload = serde_json::json!({ "OutstandingBalance": balance });
        Ok(ToolResult::json(&payload))
    }
}
