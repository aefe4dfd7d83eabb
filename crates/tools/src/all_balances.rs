//! All-customers outstanding balances tool.
//!
//! Enables multi-customer comparison ("which customers owe the most?").
//! The mapping is keyed by display name at this boundary; if two
//! customers share a name the later one wins (known limitation of the
//! name-keyed view — the underlying query is id-keyed and lossless).

use std::sync::Arc;

use async_trait::async_trait;
use ledgerlens_core::error::ToolError;
use ledgerlens_core::tool::{Tool, ToolResult};
use ledgerlens_store::{queries, RecordStore};

pub struct AllBalancesTool {
    store: Arc<RecordStore>,
}

impl AllBalancesTool {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for AllBalancesTool {
    fn name(&self) -> &str {
        "all_outstanding_balances"
    }

    fn description(&self) -> &str {
        "Gets outstanding balances for all customers. Returns an object with customer names as keys and their outstanding balances as values."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let mut payload = serde_json::Map::new();
        for (name, balance) in queries::outstanding_balances_by_name(&self.store) {
            payload.insert(name, serde_json::json!(balance));
        }
        Ok(ToolResult::json(&serde_json::Value::Object(payload)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerlens_core::model::{Customer, Invoice};
    use rust_decimal::Decimal;

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            customer_id: id.into(),
            name: name.into(),
            abn: String::new(),
            region: String::new(),
        }
    }

    fn unpaid(id: &str, cid: &str, amount: &str) -> Invoice {
        Invoice {
            invoice_id: id.into(),
            customer_id: cid.into(),
            amount: Decimal::from_str_exact(amount).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            paid_date: None,
        }
    }

    #[tokio::test]
    async fn maps_every_customer_to_its_balance() {
        let store = Arc::new(RecordStore::from_records(
            vec![customer("C001", "Acme Automotive"), customer("C002", "Blue Horizon")],
            vec![unpaid("INV-001", "C001", "500"), unpaid("INV-002", "C002", "250")],
            vec![],
        ));
        let tool = AllBalancesTool::new(store);
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["Acme Automotive"], "500");
        assert_eq!(data["Blue Horizon"], "250");
    }

    #[tokio::test]
    async fn customer_without_invoices_maps_to_zero() {
        let store = Arc::new(RecordStore::from_records(
            vec![customer("C001", "Acme Automotive")],
            vec![],
            vec![],
        ));
        let tool = AllBalancesTool::new(store);
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        assert_eq!(result.data.unwrap()["Acme Automotive"], "0");
    }
}
