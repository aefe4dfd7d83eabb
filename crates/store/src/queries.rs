//! Aggregation query functions.
//!
//! Narrow, independently invokable reads layered over the record store,
//! used directly by the tool-calling layer. Every name-taking function
//! returns an empty or zero result for an unknown customer — failure is
//! reserved for data-source errors, never for "no data found".

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ledgerlens_core::model::{Invoice, Payment};
use rust_decimal::Decimal;

use crate::record_store::RecordStore;
use crate::resolve::cutoff_date;

/// Default lookback window at the tool boundary.
pub const DEFAULT_WINDOW_MONTHS: u32 = 6;

/// Invoices for the named customer with due date inside the window,
/// ascending by due date (ties keep storage order).
pub fn invoices_for_customer_name(
    store: &RecordStore,
    name: &str,
    months: u32,
    today: NaiveDate,
) -> Vec<Invoice> {
    match store.find_customer_by_name(name) {
        Some(customer) => invoices_for_customer_id(store, &customer.customer_id, months, today),
        None => Vec::new(),
    }
}

/// Invoices for the customer id with due date inside the window,
/// ascending by due date.
pub fn invoices_for_customer_id(
    store: &RecordStore,
    customer_id: &str,
    months: u32,
    today: NaiveDate,
) -> Vec<Invoice> {
    let cutoff = cutoff_date(today, months);
    let mut invoices: Vec<Invoice> = store
        .invoices_for_customer(customer_id)
        .into_iter()
        .filter(|i| i.due_date >= cutoff)
        .collect();
    invoices.sort_by_key(|i| i.due_date);
    invoices
}

/// Payments for the named customer inside the window, ascending by date.
pub fn payments_for_customer_name(
    store: &RecordStore,
    name: &str,
    months: u32,
    today: NaiveDate,
) -> Vec<Payment> {
    match store.find_customer_by_name(name) {
        Some(customer) => payments_for_customer_id(store, &customer.customer_id, months, today),
        None => Vec::new(),
    }
}

/// Payments for the customer id inside the window, ascending by date.
pub fn payments_for_customer_id(
    store: &RecordStore,
    customer_id: &str,
    months: u32,
    today: NaiveDate,
) -> Vec<Payment> {
    let cutoff = cutoff_date(today, months);
    let mut payments: Vec<Payment> = store
        .payments_for_customer(customer_id)
        .into_iter()
        .filter(|p| p.date >= cutoff)
        .collect();
    payments.sort_by_key(|p| p.date);
    payments
}

/// Sum of unpaid invoice amounts for the named customer, over the full
/// invoice set (no time window). Zero for an unknown name.
pub fn outstanding_balance_by_name(store: &RecordStore, name: &str) -> Decimal {
    match store.find_customer_by_name(name) {
        Some(customer) => outstanding_balance_by_id(store, &customer.customer_id),
        None => Decimal::ZERO,
    }
}

/// Sum of unpaid invoice amounts for the customer id, over the full
/// invoice set.
pub fn outstanding_balance_by_id(store: &RecordStore, customer_id: &str) -> Decimal {
    store
        .unpaid_invoices_for_customer(customer_id)
        .iter()
        .map(|i| i.amount)
        .sum()
}

/// All customer display names, snapshot order.
pub fn all_customer_names(store: &RecordStore) -> Vec<String> {
    store.all_customers().into_iter().map(|c| c.name).collect()
}

/// Outstanding balance per customer, keyed by customer id. Keys are
/// unique by construction (one entry per distinct customer).
pub fn outstanding_balances_by_id(store: &RecordStore) -> BTreeMap<String, Decimal> {
    store
        .all_customers()
        .into_iter()
        .map(|c| {
            let balance = outstanding_balance_by_id(store, &c.customer_id);
            (c.customer_id, balance)
        })
        .collect()
}

/// Outstanding balance per customer keyed by display name — the
/// boundary view handed to the LLM, derived from the id-keyed mapping
/// and ordered by first appearance in the snapshot.
///
/// Known limitation: if two customers share a display name the later
/// one overwrites the earlier (last-write-wins), matching the source
/// behavior of this mapping.
pub fn outstanding_balances_by_name(store: &RecordStore) -> Vec<(String, Decimal)> {
    let by_id = outstanding_balances_by_id(store);
    let mut by_name: Vec<(String, Decimal)> = Vec::new();
    for customer in store.all_customers() {
        let balance = by_id
            .get(&customer.customer_id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        match by_name.iter_mut().find(|(name, _)| *name == customer.name) {
            Some(entry) => entry.1 = balance,
            None => by_name.push((customer.name, balance)),
        }
    }
    by_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlens_core::model::Customer;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            customer_id: id.into(),
            name: name.into(),
            abn: String::new(),
            region: String::new(),
        }
    }

    fn invoice(id: &str, cid: &str, amount: &str, due: &str, paid: Option<&str>) -> Invoice {
        Invoice {
            invoice_id: id.into(),
            customer_id: cid.into(),
            amount: dec(amount),
            due_date: date(due),
            paid_date: paid.map(|d| date(d)),
        }
    }

    fn payment(id: &str, cid: &str, amount: &str, when: &str) -> Payment {
        Payment {
            payment_id: id.into(),
            customer_id: cid.into(),
            amount: dec(amount),
            date: date(when),
        }
    }

    fn store() -> RecordStore {
        RecordStore::from_records(
            vec![
                customer("C001", "Acme Automotive"),
                customer("C002", "Blue Horizon Auto Electrics"),
            ],
            vec![
                invoice("INV-001", "C001", "500", "2024-01-10", None),
                invoice("INV-002", "C001", "300", "2024-02-10", Some("2024-02-20")),
                invoice("INV-003", "C002", "250", "2024-02-01", None),
                invoice("INV-004", "C002", "150", "2023-06-01", None),
            ],
            vec![
                payment("PAY-001", "C001", "300", "2024-02-20"),
                payment("PAY-002", "C002", "100", "2024-01-05"),
            ],
        )
    }

    #[test]
    fn windowed_invoices_sorted_ascending() {
        let invoices =
            invoices_for_customer_name(&store(), "Acme Automotive", 6, date("2024-03-01"));
        assert_eq!(invoices.len(), 2);
        assert!(invoices[0].due_date <= invoices[1].due_date);
    }

    #[test]
    fn window_excludes_old_invoices() {
        let invoices =
            invoices_for_customer_name(&store(), "Blue Horizon Auto Electrics", 6, date("2024-03-01"));
        // INV-004 due 2023-06-01 is outside a 6-month window from 2024-03-01
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].invoice_id, "INV-003");
    }

    #[test]
    fn unknown_name_yields_empty_lists_and_zero_balance() {
        let s = store();
        assert!(invoices_for_customer_name(&s, "Nobody", 6, date("2024-03-01")).is_empty());
        assert!(payments_for_customer_name(&s, "Nobody", 6, date("2024-03-01")).is_empty());
        assert_eq!(outstanding_balance_by_name(&s, "Nobody"), Decimal::ZERO);
    }

    #[test]
    fn balance_by_name_matches_balance_by_id() {
        let s = store();
        assert_eq!(
            outstanding_balance_by_name(&s, "Acme Automotive"),
            outstanding_balance_by_id(&s, "C001"),
        );
        assert_eq!(outstanding_balance_by_id(&s, "C001"), dec("500"));
        // Balance ignores the window entirely: INV-004 counts
        assert_eq!(outstanding_balance_by_id(&s, "C002"), dec("400"));
    }

    #[test]
    fn customer_names_snapshot_order() {
        let names = all_customer_names(&store());
        assert_eq!(names, vec!["Acme Automotive", "Blue Horizon Auto Electrics"]);
    }

    #[test]
    fn balances_by_id_one_entry_per_customer() {
        let balances = outstanding_balances_by_id(&store());
        assert_eq!(balances.len(), 2);
        assert_eq!(balances["C001"], dec("500"));
        assert_eq!(balances["C002"], dec("400"));
    }

    #[test]
    fn balances_by_name_mirror_the_id_keyed_mapping() {
        let s = store();
        let by_id = outstanding_balances_by_id(&s);
        let by_name = outstanding_balances_by_name(&s);
        assert_eq!(by_name.len(), by_id.len());
        assert_eq!(by_name[0], ("Acme Automotive".to_string(), by_id["C001"]));
        assert_eq!(
            by_name[1],
            ("Blue Horizon Auto Electrics".to_string(), by_id["C002"]),
        );
    }

    #[test]
    fn duplicate_display_names_collide_last_write_wins() {
        let s = RecordStore::from_records(
            vec![customer("C001", "Acme Automotive"), customer("C002", "Acme Automotive")],
            vec![
                invoice("INV-001", "C001", "100", "2024-01-10", None),
                invoice("INV-002", "C002", "900", "2024-01-10", None),
            ],
            vec![],
        );
        let balances = outstanding_balances_by_name(&s);
        assert_eq!(balances.len(), 1);
        // C002 overwrites C001 under the shared name
        assert_eq!(balances[0], ("Acme Automotive".to_string(), dec("900")));
    }
}
