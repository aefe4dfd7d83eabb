//! Customer directory tool — lists all customer names.
//!
//! Lets the LLM discover which customers exist before asking narrower
//! questions or running comparative analysis.

use std::sync::Arc;

use async_trait::async_trait;
use ledgerlens_core::error::ToolError;
use ledgerlens_core::tool::{Tool, ToolResult};
use ledgerlens_store::{queries, RecordStore};

pub struct CustomerDirectoryTool {
    store: Arc<RecordStore>,
}

impl CustomerDirectoryTool {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CustomerDirectoryTool {
    fn name(&self) -> &str {
        "list_customers"
    }

    fn description(&self) -> &str {
        "Gets a list of all customer names in the system."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let names = queries::all_customer_names(&self.store);
        let payload = serde_json::json!(names);
        Ok(ToolResult::json(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlens_core::model::Customer;

    #[tokio::test]
    async fn lists_names_in_snapshot_order() {
        let store = Arc::new(RecordStore::from_records(
            vec![
                Customer {
                    customer_id: "C002".into(),
                    name: "Blue Horizon Auto Electrics".into(),
                    abn: String::new(),
                    region: "VIC".into(),
                },
                Customer {
                    customer_id: "C001".into(),
                    name: "Acme Automotive".into(),
                    abn: String::new(),
                    region: "NSW".into(),
                },
            ],
            vec![],
            vec![],
        ));
        let tool = CustomerDirectoryTool::new(store);
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        let names: Vec<String> = serde_json::from_str(&result.output).unwrap();
        assert_eq!(names, vec!["Blue Horizon Auto Electrics", "Acme Automotive"]);
    }

    #[tokio::test]
    async fn empty_store_yields_empty_list() {
        let tool = CustomerDirectoryTool::new(Arc::new(RecordStore::new()));
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        let names: Vec<String> = serde_json::from_str(&result.output).unwrap();
        assert!(names.is_empty());
    }
}
