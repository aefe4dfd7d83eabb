//! The filter resolution engine.
//!
//! Turns a [`FilterSpec`] into a [`FilterResult`] against the current
//! store snapshot. Stateless: a pure function of (snapshot, spec, today).

use chrono::{Months, NaiveDate};
use ledgerlens_core::filter::{FilterResult, FilterSpec, InvoiceInfo, PaymentInfo};
use ledgerlens_core::model::Invoice;
use rust_decimal::Decimal;
use tracing::debug;

use crate::record_store::RecordStore;

/// The earliest date included in a lookback window: `today` minus
/// `months` calendar months. Subtraction clamps to the last valid day
/// of the target month (1 month before 2024-03-31 is 2024-02-29).
pub fn cutoff_date(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Signed whole-day difference between paid date and due date, when
/// paid. Negative means paid early; values are never clamped to zero.
pub fn days_late(invoice: &Invoice) -> Option<i64> {
    invoice
        .paid_date
        .map(|paid| (paid - invoice.due_date).num_days())
}

/// Resolve a filter spec into a filter result.
///
/// All reads go against one store snapshot, so a concurrent reload can
/// never pair customers from one load with invoices from another.
///
/// An absent, empty, or unknown customer name yields the designed
/// "customer not found" result (empty id, empty collections) — never an
/// error. The outstanding balance is computed over the customer's full
/// invoice set; only the invoice/payment listings honor the window.
pub fn resolve_filter(store: &RecordStore, spec: &FilterSpec, today: NaiveDate) -> FilterResult {
    let snapshot = store.snapshot();
    let requested = spec.customer_name.as_deref().unwrap_or("");

    let Some(customer) = (!requested.is_empty())
        .then(|| snapshot.find_customer_by_name(requested).cloned())
        .flatten()
    else {
        debug!(customer = requested, "Filter resolved to no customer");
        return FilterResult::not_found(requested);
    };

    let cutoff = cutoff_date(today, spec.months);

    let all_invoices: Vec<Invoice> = snapshot
        .invoices_for_customer(&customer.customer_id)
        .cloned()
        .collect();

    // Window-independent by design: the full unpaid set, not the
    // windowed one.
    let outstanding_balance: Decimal = all_invoices
        .iter()
        .filter(|i| i.is_outstanding())
        .map(|i| i.amount)
        .sum();

    let mut invoices: Vec<InvoiceInfo> = all_invoices
        .iter()
        .filter(|i| i.due_date >= cutoff)
        .map(|i| InvoiceInfo {
            invoice_id: i.invoice_id.clone(),
            amount: i.amount,
            due_date: i.due_date,
            paid_date: i.paid_date,
            days_late: days_late(i),
        })
        .collect();
    // Stable: date ties keep storage order.
    invoices.sort_by_key(|i| i.due_date);

    let mut payments: Vec<PaymentInfo> = snapshot
        .payments_for_customer(&customer.customer_id)
        .filter(|p| p.date >= cutoff)
        .map(|p| PaymentInfo {
            payment_id: p.payment_id.clone(),
            amount: p.amount,
            date: p.date,
        })
        .collect();
    payments.sort_by_key(|p| p.date);

    debug!(
        customer_id = %customer.customer_id,
        cutoff = %cutoff,
        invoices = invoices.len(),
        payments = payments.len(),
        "Filter resolved"
    );

    FilterResult {
        customer_id: customer.customer_id,
        customer_name: customer.name,
        region: customer.region,
        outstanding_balance,
        invoices,
        payments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlens_core::filter::Scope;
    use ledgerlens_core::model::{Customer, Payment};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn acme_store() -> RecordStore {
        RecordStore::from_records(
            vec![Customer {
                customer_id: "C001".into(),
                name: "Acme Automotive".into(),
                abn: "11 222 333 444".into(),
                region: "NSW".into(),
            }],
            vec![
                Invoice {
                    invoice_id: "INV-001".into(),
                    customer_id: "C001".into(),
                    amount: dec("500"),
                    due_date: date("2024-01-10"),
                    paid_date: None,
                },
                Invoice {
                    invoice_id: "INV-002".into(),
                    customer_id: "C001".into(),
                    amount: dec("300"),
                    due_date: date("2024-02-10"),
                    paid_date: Some(date("2024-02-20")),
                },
            ],
            vec![Payment {
                payment_id: "PAY-001".into(),
                customer_id: "C001".into(),
                amount: dec("300"),
                date: date("2024-02-20"),
            }],
        )
    }

    fn spec(name: &str, months: u32) -> FilterSpec {
        FilterSpec {
            customer_name: Some(name.into()),
            months,
            include_outstanding: true,
            include_trends: false,
            include_anomalies: false,
            scope: Scope::SingleCustomer,
        }
    }

    #[test]
    fn cutoff_uses_calendar_months() {
        assert_eq!(cutoff_date(date("2024-03-15"), 1), date("2024-02-15"));
        assert_eq!(cutoff_date(date("2024-03-01"), 6), date("2023-09-01"));
    }

    #[test]
    fn cutoff_clamps_to_last_valid_day() {
        // February 2024 has 29 days
        assert_eq!(cutoff_date(date("2024-03-31"), 1), date("2024-02-29"));
        assert_eq!(cutoff_date(date("2023-03-31"), 1), date("2023-02-28"));
    }

    #[test]
    fn days_late_present_iff_paid() {
        let mut inv = Invoice {
            invoice_id: "INV-001".into(),
            customer_id: "C001".into(),
            amount: dec("500"),
            due_date: date("2024-02-10"),
            paid_date: None,
        };
        assert_eq!(days_late(&inv), None);

        inv.paid_date = Some(date("2024-02-20"));
        assert_eq!(days_late(&inv), Some(10));

        // Paid early: negative, not clamped
        inv.paid_date = Some(date("2024-02-05"));
        assert_eq!(days_late(&inv), Some(-5));
    }

    #[test]
    fn acme_six_month_window() {
        // Spec scenario: Months=6 at 2024-03-01
        let result = resolve_filter(&acme_store(), &spec("Acme Automotive", 6), date("2024-03-01"));

        assert_eq!(result.customer_id, "C001");
        assert_eq!(result.region, "NSW");
        assert_eq!(result.outstanding_balance, dec("500"));
        assert_eq!(result.invoices.len(), 2);
        // Ordered by due date
        assert_eq!(result.invoices[0].invoice_id, "INV-001");
        assert_eq!(result.invoices[1].invoice_id, "INV-002");
        assert_eq!(result.invoices[1].days_late, Some(10));
        assert_eq!(result.invoices[0].days_late, None);
    }

    #[test]
    fn balance_is_window_independent() {
        // Spec scenario: Months=1 at 2024-03-15 → cutoff 2024-02-15,
        // only INV-002 windowed, but balance still 500.
        let result = resolve_filter(&acme_store(), &spec("Acme Automotive", 1), date("2024-03-15"));

        assert_eq!(result.invoices.len(), 1);
        assert_eq!(result.invoices[0].invoice_id, "INV-002");
        assert_eq!(result.outstanding_balance, dec("500"));

        // And widening the window never changes the balance either
        for months in [0, 1, 6, 24] {
            let r = resolve_filter(&acme_store(), &spec("Acme Automotive", months), date("2024-03-15"));
            assert_eq!(r.outstanding_balance, dec("500"), "months={months}");
        }
    }

    #[test]
    fn windowed_lists_only_contain_rows_on_or_after_cutoff() {
        let result = resolve_filter(&acme_store(), &spec("Acme Automotive", 1), date("2024-03-15"));
        let cutoff = date("2024-02-15");
        assert!(result.invoices.iter().all(|i| i.due_date >= cutoff));
        assert!(result.payments.iter().all(|p| p.date >= cutoff));
    }

    #[test]
    fn unknown_customer_yields_not_found_result() {
        let result = resolve_filter(&acme_store(), &spec("Nonexistent Pty Ltd", 6), date("2024-03-01"));
        assert!(result.is_not_found());
        assert_eq!(result.customer_name, "Nonexistent Pty Ltd");
        assert_eq!(result.outstanding_balance, Decimal::ZERO);
        assert!(result.invoices.is_empty());
        assert!(result.payments.is_empty());
    }

    #[test]
    fn absent_name_yields_not_found_result() {
        let spec = FilterSpec::default();
        let result = resolve_filter(&acme_store(), &spec, date("2024-03-01"));
        assert!(result.is_not_found());
        assert_eq!(result.customer_name, "");
    }

    #[test]
    fn date_ties_keep_storage_order() {
        let store = RecordStore::from_records(
            vec![Customer {
                customer_id: "C001".into(),
                name: "Acme Automotive".into(),
                abn: String::new(),
                region: String::new(),
            }],
            vec![
                Invoice {
                    invoice_id: "INV-B".into(),
                    customer_id: "C001".into(),
                    amount: dec("10"),
                    due_date: date("2024-02-10"),
                    paid_date: None,
                },
                Invoice {
                    invoice_id: "INV-A".into(),
                    customer_id: "C001".into(),
                    amount: dec("20"),
                    due_date: date("2024-02-10"),
                    paid_date: None,
                },
            ],
            vec![],
        );
        let result = resolve_filter(&store, &spec("Acme Automotive", 6), date("2024-03-01"));
        // First loaded, first shown
        assert_eq!(result.invoices[0].invoice_id, "INV-B");
        assert_eq!(result.invoices[1].invoice_id, "INV-A");
    }

    #[test]
    fn resolution_never_mixes_two_loads() {
        use crate::record_store::CsvSources;
        use std::io::Write as _;
        use std::sync::Arc;

        // Two self-consistent datasets that share a display name but
        // disagree on the customer id and the invoice amount. Mixing
        // collections across loads would pair an id from one dataset
        // with invoices from the other.
        let dir = tempfile::TempDir::new().unwrap();
        let dataset = |tag: &str, id: &str, amount: &str| {
            let write_file = |name: String, content: String| {
                let path = dir.path().join(name);
                let mut f = std::fs::File::create(&path).unwrap();
                f.write_all(content.as_bytes()).unwrap();
                path
            };
            CsvSources {
                customers: write_file(
                    format!("customers-{tag}.csv"),
                    format!("CustomerID,Name,ABN,Region\n{id},Acme Automotive,11,NSW\n"),
                ),
                invoices: write_file(
                    format!("invoices-{tag}.csv"),
                    format!("InvoiceID,CustomerID,Amount,DueDate,PaidDate\nINV-{tag},{id},{amount},2024-02-10,\n"),
                ),
                payments: write_file(
                    format!("payments-{tag}.csv"),
                    "PaymentID,CustomerID,Amount,Date\n".to_string(),
                ),
            }
        };
        let a = dataset("a", "A-1", "100");
        let b = dataset("b", "B-1", "200");

        let store = Arc::new(RecordStore::new());
        store.load_all(&a).unwrap();

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for round in 0..200 {
                    let sources = if round % 2 == 0 { &b } else { &a };
                    store.load_all(sources).unwrap();
                }
            })
        };

        while !writer.is_finished() {
            let result = resolve_filter(&store, &spec("Acme Automotive", 6), date("2024-03-01"));
            // Both datasets resolve the name; each pairs its one
            // invoice with its own id and amount.
            assert_eq!(result.invoices.len(), 1);
            let expected = match result.customer_id.as_str() {
                "A-1" => dec("100"),
                "B-1" => dec("200"),
                other => panic!("unexpected customer id {other}"),
            };
            assert_eq!(result.invoices[0].amount, expected);
            assert_eq!(result.outstanding_balance, expected);
        }
        writer.join().unwrap();
    }

    #[test]
    fn no_invoices_means_zero_balance() {
        let store = RecordStore::from_records(
            vec![Customer {
                customer_id: "C002".into(),
                name: "Blue Horizon".into(),
                abn: String::new(),
                region: "VIC".into(),
            }],
            vec![],
            vec![],
        );
        let result = resolve_filter(&store, &spec("Blue Horizon", 6), date("2024-03-01"));
        assert_eq!(result.outstanding_balance, Decimal::ZERO);
        assert!(!result.is_not_found());
    }
}
