//! The structured query contract between the two text-generation steps.
//!
//! [`FilterSpec`] is what the NL-parsing capability must emit for a user
//! question; [`FilterResult`] is what the resolution engine hands to the
//! narrative-generation capability. Field names on both sides are part
//! of the wire contract and must not change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Whether a question targets one customer or compares across customers.
///
/// Advisory: the resolution engine always resolves a single named
/// customer; multi-customer questions go through the tool surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Scope {
    #[default]
    #[serde(rename = "singleCustomer")]
    SingleCustomer,
    #[serde(rename = "multiCustomer")]
    MultiCustomer,
}

/// A structured filter extracted from a natural-language question.
///
/// The three `include_*` flags are advisory hints consumed by the
/// narrative step; the resolution engine does not branch on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterSpec {
    /// Target customer display name. Absent or empty is a valid input
    /// that resolves to "customer not found".
    #[serde(rename = "CustomerName", default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    /// Lookback window in months.
    #[serde(rename = "Months", default)]
    pub months: u32,

    #[serde(rename = "IncludeOutstanding", default)]
    pub include_outstanding: bool,

    #[serde(rename = "IncludeTrends", default)]
    pub include_trends: bool,

    #[serde(rename = "IncludeAnomalies", default)]
    pub include_anomalies: bool,

    #[serde(rename = "Scope", default)]
    pub scope: Scope,
}

/// Canonical wire keys, used for case-insensitive key matching on parse.
const SPEC_KEYS: [&str; 6] = [
    "CustomerName",
    "Months",
    "IncludeOutstanding",
    "IncludeTrends",
    "IncludeAnomalies",
    "Scope",
];

impl FilterSpec {
    /// Parse a filter spec from the raw text a provider emitted.
    ///
    /// Keys are matched case-insensitively (the NL capability is not
    /// guaranteed to preserve casing); values are validated strictly.
    /// Missing fields take their defaults, matching the original
    /// deserialization behavior.
    pub fn parse(raw: &str) -> Result<Self, SpecError> {
        let value: serde_json::Value = serde_json::from_str(raw.trim())
            .map_err(|e| SpecError::NotJson(e.to_string()))?;

        let serde_json::Value::Object(fields) = value else {
            return Err(SpecError::NotObject);
        };

        // Canonicalize key casing so serde sees the exact wire names.
        let mut canonical = serde_json::Map::with_capacity(fields.len());
        for (key, val) in fields {
            match SPEC_KEYS.iter().find(|k| k.eq_ignore_ascii_case(&key)) {
                Some(name) => canonical.insert((*name).to_string(), val),
                // Unknown keys are carried through; serde ignores them.
                None => canonical.insert(key, val),
            };
        }

        serde_json::from_value(serde_json::Value::Object(canonical))
            .map_err(|e| SpecError::InvalidShape(e.to_string()))
    }
}

/// Per-invoice projection inside a [`FilterResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceInfo {
    #[serde(rename = "InvoiceID")]
    pub invoice_id: String,

    #[serde(rename = "Amount")]
    pub amount: Decimal,

    #[serde(rename = "DueDate")]
    pub due_date: NaiveDate,

    #[serde(rename = "PaidDate", default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,

    /// Signed whole-day difference paid − due. Present iff the invoice
    /// is paid; negative means paid early.
    #[serde(rename = "DaysLate", default, skip_serializing_if = "Option::is_none")]
    pub days_late: Option<i64>,
}

/// Per-payment projection inside a [`FilterResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    #[serde(rename = "PaymentID")]
    pub payment_id: String,

    #[serde(rename = "Amount")]
    pub amount: Decimal,

    #[serde(rename = "Date")]
    pub date: NaiveDate,
}

/// The structured answer assembled for a [`FilterSpec`].
///
/// Owns projections of store data — a frozen snapshot, never aliasing
/// mutable store state. Constructed fresh per query, serialized once,
/// then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    #[serde(rename = "CustomerID")]
    pub customer_id: String,

    #[serde(rename = "CustomerName")]
    pub customer_name: String,

    #[serde(rename = "Region")]
    pub region: String,

    /// Sum of unpaid invoice amounts over the customer's **full**
    /// invoice set. Independent of the lookback window by design, even
    /// though the invoice listing below is window-restricted.
    #[serde(rename = "OutstandingBalance")]
    pub outstanding_balance: Decimal,

    /// Invoices due within the lookback window, ascending by due date.
    #[serde(rename = "Invoices")]
    pub invoices: Vec<InvoiceInfo>,

    /// Payments within the lookback window, ascending by date.
    #[serde(rename = "Payments")]
    pub payments: Vec<PaymentInfo>,
}

impl FilterResult {
    /// The designed "customer not found" signal: carries only the
    /// requested name, an empty id, zero balance, and empty collections.
    pub fn not_found(requested_name: &str) -> Self {
        Self {
            customer_id: String::new(),
            customer_name: requested_name.to_string(),
            region: String::new(),
            outstanding_balance: Decimal::ZERO,
            invoices: Vec::new(),
            payments: Vec::new(),
        }
    }

    /// Whether this result is the "customer not found" signal.
    pub fn is_not_found(&self) -> bool {
        self.customer_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_round_trip_is_field_for_field_equal() {
        let spec = FilterSpec {
            customer_name: Some("Acme Automotive".into()),
            months: 6,
            include_outstanding: true,
            include_trends: true,
            include_anomalies: false,
            scope: Scope::SingleCustomer,
        };
        let json = serde_json::to_string(&spec).unwrap();
        let back = FilterSpec::parse(&json).unwrap();
        assert_eq!(spec, back);
    }

    #[test]
    fn spec_wire_keys_are_pascal_case() {
        let spec = FilterSpec {
            customer_name: Some("Acme".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert!(json.get("CustomerName").is_some());
        assert!(json.get("IncludeOutstanding").is_some());
        assert_eq!(json["Scope"], "singleCustomer");
    }

    #[test]
    fn spec_parse_is_key_case_insensitive() {
        let raw = r#"{
            "customername": "Acme Automotive",
            "MONTHS": 6,
            "includeoutstanding": true,
            "IncludeTrends": false,
            "includeAnomalies": true,
            "scope": "multiCustomer"
        }"#;
        let spec = FilterSpec::parse(raw).unwrap();
        assert_eq!(spec.customer_name.as_deref(), Some("Acme Automotive"));
        assert_eq!(spec.months, 6);
        assert!(spec.include_outstanding);
        assert!(!spec.include_trends);
        assert!(spec.include_anomalies);
        assert_eq!(spec.scope, Scope::MultiCustomer);
    }

    #[test]
    fn spec_missing_fields_take_defaults() {
        let spec = FilterSpec::parse(r#"{"CustomerName": "Acme"}"#).unwrap();
        assert_eq!(spec.months, 0);
        assert!(!spec.include_outstanding);
        assert_eq!(spec.scope, Scope::SingleCustomer);
    }

    #[test]
    fn spec_parse_rejects_non_json() {
        assert!(matches!(
            FilterSpec::parse("I think you want Acme's invoices"),
            Err(SpecError::NotJson(_))
        ));
    }

    #[test]
    fn spec_parse_rejects_non_object() {
        assert!(matches!(
            FilterSpec::parse(r#"["Acme", 6]"#),
            Err(SpecError::NotObject)
        ));
    }

    #[test]
    fn spec_parse_rejects_bad_scope() {
        let raw = r#"{"CustomerName": "Acme", "Scope": "everyone"}"#;
        assert!(matches!(
            FilterSpec::parse(raw),
            Err(SpecError::InvalidShape(_))
        ));
    }

    #[test]
    fn not_found_result_shape() {
        let result = FilterResult::not_found("Nonexistent Pty Ltd");
        assert!(result.is_not_found());
        assert_eq!(result.customer_name, "Nonexistent Pty Ltd");
        assert_eq!(result.outstanding_balance, Decimal::ZERO);
        assert!(result.invoices.is_empty());
        assert!(result.payments.is_empty());
    }

    #[test]
    fn result_serializes_wire_contract() {
        let result = FilterResult {
            customer_id: "C001".into(),
            customer_name: "Acme Automotive".into(),
            region: "NSW".into(),
            outstanding_balance: Decimal::from_str_exact("500").unwrap(),
            invoices: vec![InvoiceInfo {
                invoice_id: "INV-001".into(),
                amount: Decimal::from_str_exact("300").unwrap(),
                due_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                paid_date: Some(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()),
                days_late: Some(10),
            }],
            payments: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["CustomerID"], "C001");
        assert_eq!(json["OutstandingBalance"], "500");
        assert_eq!(json["Invoices"][0]["DaysLate"], 10);
        assert_eq!(json["Invoices"][0]["DueDate"], "2024-02-10");
    }
}
