//! The in-memory record store.
//!
//! Owns the three base collections for the process lifetime. Collections
//! are read-only between loads; `load_all` parses every source fully
//! into a fresh [`Snapshot`] and installs it with a single swap, so
//! readers observe either the whole old snapshot or the whole new one,
//! never a mix of the two loads.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use ledgerlens_core::error::DataSourceError;
use ledgerlens_core::model::{Customer, Invoice, Payment};
use tracing::info;

use crate::csv_source;

/// Paths to the three CSV record sources.
#[derive(Debug, Clone)]
pub struct CsvSources {
    pub customers: PathBuf,
    pub invoices: PathBuf,
    pub payments: PathBuf,
}

/// One consistent view of all three collections.
///
/// A snapshot is immutable after construction; cross-collection reads
/// against the same snapshot can never see a half-applied reload.
pub(crate) struct Snapshot {
    customers: Vec<Customer>,
    invoices: Vec<Invoice>,
    payments: Vec<Payment>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            customers: Vec::new(),
            invoices: Vec::new(),
            payments: Vec::new(),
        }
    }

    /// Case-insensitive exact match on display name, Unicode-aware
    /// ("müller" matches "MÜLLER").
    pub(crate) fn find_customer_by_name(&self, name: &str) -> Option<&Customer> {
        let needle = name.to_lowercase();
        self.customers.iter().find(|c| c.name.to_lowercase() == needle)
    }

    pub(crate) fn find_customer_by_id(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.customer_id == customer_id)
    }

    pub(crate) fn invoices_for_customer<'a>(
        &'a self,
        customer_id: &'a str,
    ) -> impl Iterator<Item = &'a Invoice> {
        self.invoices.iter().filter(move |i| i.customer_id == customer_id)
    }

    pub(crate) fn payments_for_customer<'a>(
        &'a self,
        customer_id: &'a str,
    ) -> impl Iterator<Item = &'a Payment> {
        self.payments.iter().filter(move |p| p.customer_id == customer_id)
    }

    pub(crate) fn customers(&self) -> &[Customer] {
        &self.customers
    }
}

/// In-memory snapshot of customers, invoices, and payments.
///
/// Safe for concurrent readers; `load_all` takes the write side of the
/// lock only for the single pointer swap.
pub struct RecordStore {
    snapshot: RwLock<Arc<Snapshot>>,
}

impl RecordStore {
    /// An empty store; populate it with [`RecordStore::load_all`].
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Snapshot::empty())),
        }
    }

    /// A store pre-populated with synthetic records, for tests and the
    /// deterministic CLI commands.
    pub fn from_records(
        customers: Vec<Customer>,
        invoices: Vec<Invoice>,
        payments: Vec<Payment>,
    ) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Snapshot {
                customers,
                invoices,
                payments,
            })),
        }
    }

    /// The current snapshot. Callers that perform several related reads
    /// take one snapshot and do them all against it.
    pub(crate) fn snapshot(&self) -> Arc<Snapshot> {
        // Lock poisoning only happens if a panic occurred mid-swap; the
        // guarded value is a plain Arc replacement, so recovering the
        // guard is sound.
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Load (or reload) all three collections from their CSV sources.
    ///
    /// All sources are parsed before anything is replaced: on failure
    /// the previous snapshot is retained in full. On success the
    /// previous snapshot is fully discarded — no partial merge.
    pub fn load_all(&self, sources: &CsvSources) -> Result<(), DataSourceError> {
        let customers = csv_source::read_customers(&sources.customers)?;
        let invoices = csv_source::read_invoices(&sources.invoices)?;
        let payments = csv_source::read_payments(&sources.payments)?;

        info!(
            customers = customers.len(),
            invoices = invoices.len(),
            payments = payments.len(),
            "Loaded record snapshot"
        );

        let next = Arc::new(Snapshot {
            customers,
            invoices,
            payments,
        });
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }

    /// Case-insensitive exact match on display name. Returns `None` when
    /// no customer matches — that is "not found", not an error.
    ///
    /// Matching folds case Unicode-wide, not just ASCII. Precondition on
    /// the record source: display names are unique under case-folding.
    /// With duplicates the first loaded row wins.
    pub fn find_customer_by_name(&self, name: &str) -> Option<Customer> {
        self.snapshot().find_customer_by_name(name).cloned()
    }

    /// Case-sensitive exact match on customer id.
    pub fn find_customer_by_id(&self, customer_id: &str) -> Option<Customer> {
        self.snapshot().find_customer_by_id(customer_id).cloned()
    }

    /// All invoices for a customer, in storage order. Ordering by date
    /// is the caller's responsibility.
    pub fn invoices_for_customer(&self, customer_id: &str) -> Vec<Invoice> {
        self.snapshot().invoices_for_customer(customer_id).cloned().collect()
    }

    /// Unpaid invoices for a customer, in storage order.
    pub fn unpaid_invoices_for_customer(&self, customer_id: &str) -> Vec<Invoice> {
        self.snapshot()
            .invoices_for_customer(customer_id)
            .filter(|i| i.is_outstanding())
            .cloned()
            .collect()
    }

    /// All payments for a customer, in storage order.
    pub fn payments_for_customer(&self, customer_id: &str) -> Vec<Payment> {
        self.snapshot().payments_for_customer(customer_id).cloned().collect()
    }

    /// Full customer snapshot, order-preserving from load.
    pub fn all_customers(&self) -> Vec<Customer> {
        self.snapshot().customers().to_vec()
    }

    /// Collection sizes (customers, invoices, payments), for diagnostics.
    pub fn counts(&self) -> (usize, usize, usize) {
        let snap = self.snapshot();
        (snap.customers.len(), snap.invoices.len(), snap.payments.len())
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
