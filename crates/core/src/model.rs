//! Billing record value objects: customers, invoices, payments.
//!
//! All three are immutable once loaded into the record store. Monetary
//! amounts are `rust_decimal::Decimal` throughout — repeated summation
//! must never drift at the cent level, so binary floats are banned from
//! every money field.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer account.
///
/// Display names are matched case-insensitively by the store; lookup is
/// only unambiguous when names are unique under case-folding. That is a
/// data-quality precondition of the record source, not a runtime check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "CustomerID")]
    pub customer_id: String,

    #[serde(rename = "Name")]
    pub name: String,

    /// Tax / business registration identifier.
    #[serde(rename = "Abn")]
    pub abn: String,

    #[serde(rename = "Region")]
    pub region: String,
}

/// A single invoice owned by a customer.
///
/// "Outstanding" means exactly `paid_date.is_none()`. A present paid
/// date may fall before, on, or after the due date — both early and
/// late payment are valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "InvoiceID")]
    pub invoice_id: String,

    #[serde(rename = "CustomerID")]
    pub customer_id: String,

    #[serde(rename = "Amount")]
    pub amount: Decimal,

    #[serde(rename = "DueDate")]
    pub due_date: NaiveDate,

    #[serde(rename = "PaidDate", default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}

impl Invoice {
    /// An invoice is outstanding iff it has no paid date.
    pub fn is_outstanding(&self) -> bool {
        self.paid_date.is_none()
    }
}

/// A payment received from a customer.
///
/// Payments are not reconciled against specific invoices; the data
/// model carries no invoice reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "PaymentID")]
    pub payment_id: String,

    #[serde(rename = "CustomerID")]
    pub customer_id: String,

    #[serde(rename = "Amount")]
    pub amount: Decimal,

    #[serde(rename = "Date")]
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(paid: Option<&str>) -> Invoice {
        Invoice {
            invoice_id: "INV-001".into(),
            customer_id: "C001".into(),
            amount: Decimal::from_str_exact("500").unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            paid_date: paid.map(|d| d.parse().unwrap()),
        }
    }

    #[test]
    fn outstanding_iff_unpaid() {
        assert!(invoice(None).is_outstanding());
        assert!(!invoice(Some("2024-01-05")).is_outstanding());
        // Late payment is still a payment
        assert!(!invoice(Some("2024-02-20")).is_outstanding());
    }

    #[test]
    fn invoice_serializes_wire_field_names() {
        let json = serde_json::to_value(invoice(Some("2024-02-20"))).unwrap();
        assert_eq!(json["InvoiceID"], "INV-001");
        assert_eq!(json["DueDate"], "2024-01-10");
        assert_eq!(json["PaidDate"], "2024-02-20");
    }

    #[test]
    fn unpaid_invoice_omits_paid_date() {
        let json = serde_json::to_value(invoice(None)).unwrap();
        assert!(json.get("PaidDate").is_none());
    }
}
