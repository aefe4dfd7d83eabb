//! Customer lookup tool.

use std::sync::Arc;

use async_trait::async_trait;
use ledgerlens_core::error::ToolError;
use ledgerlens_core::tool::{Tool, ToolResult};
use ledgerlens_store::RecordStore;

pub struct CustomerLookupTool {
    store: Arc<RecordStore>,
}

impl CustomerLookupTool {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CustomerLookupTool {
    fn name(&self) -> &str {
        "customer_lookup"
    }

    fn description(&self) -> &str {
        "Looks up a customer by business name or by CustomerID. Returns customer details if found, null otherwise."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "customer_name": {
                    "type": "string",
                    "description": "The name of the customer business to look up"
                },
                "customer_id": {
                    "type": "string",
                    "description": "The CustomerID to look up (case-sensitive)"
                }
            }
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let customer = if let Some(id) = arguments["customer_id"].as_str() {
            self.store.find_customer_by_id(id)
        } else if let Some(name) = arguments["customer_name"].as_str() {
            self.store.find_customer_by_name(name)
        } else {
            return Err(ToolError::InvalidArguments(
                "Provide 'customer_name' or 'customer_id'".into(),
            ));
        };

        let payload = serde_json::to_value(&customer).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().into(),
            reason: e.to_string(),
        })?;
        Ok(ToolResult::json(&payload))
    }
}
