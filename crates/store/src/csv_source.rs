//! CSV record sources: customers, invoices, payments.
//!
//! Each source is a header row followed by comma-separated rows. Dates
//! are ISO `YYYY-MM-DD` and amounts plain decimals — both locale
//! invariant. Rows with fewer fields than the entity requires are
//! dropped silently; that leniency is a deliberate policy of the record
//! source boundary. A field that is present but unparseable fails the
//! whole load.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use ledgerlens_core::error::DataSourceError;
use ledgerlens_core::model::{Customer, Invoice, Payment};
use rust_decimal::Decimal;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read all well-formed customer rows: id, name, tax id, region.
pub(crate) fn read_customers(path: &Path) -> Result<Vec<Customer>, DataSourceError> {
    read_rows(path, 4, |row, _| {
        Ok(Customer {
            customer_id: field(row, 0),
            name: field(row, 1),
            abn: field(row, 2),
            region: field(row, 3),
        })
    })
}

/// Read all well-formed invoice rows: id, customer id, amount, due date,
/// paid date (may be empty).
pub(crate) fn read_invoices(path: &Path) -> Result<Vec<Invoice>, DataSourceError> {
    read_rows(path, 5, |row, ctx| {
        let paid = field(row, 4);
        Ok(Invoice {
            invoice_id: field(row, 0),
            customer_id: field(row, 1),
            amount: parse_amount(&field(row, 2), ctx)?,
            due_date: parse_date(&field(row, 3), ctx)?,
            paid_date: if paid.is_empty() {
                None
            } else {
                Some(parse_date(&paid, ctx)?)
            },
        })
    })
}

/// Read all well-formed payment rows: id, customer id, amount, date.
pub(crate) fn read_payments(path: &Path) -> Result<Vec<Payment>, DataSourceError> {
    read_rows(path, 4, |row, ctx| {
        Ok(Payment {
            payment_id: field(row, 0),
            customer_id: field(row, 1),
            amount: parse_amount(&field(row, 2), ctx)?,
            date: parse_date(&field(row, 3), ctx)?,
        })
    })
}

/// Location of the row currently being decoded, for error reporting.
struct RowContext<'a> {
    path: &'a str,
    row: usize,
}

fn read_rows<T>(
    path: &Path,
    min_fields: usize,
    decode: impl Fn(&StringRecord, &RowContext) -> Result<T, DataSourceError>,
) -> Result<Vec<T>, DataSourceError> {
    let display = path.display().to_string();

    let file = File::open(path).map_err(|source| DataSourceError::Unreadable {
        path: display.clone(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| DataSourceError::Malformed {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        // Header is row 1; data starts at row 2.
        let ctx = RowContext {
            path: &display,
            row: index + 2,
        };

        if record.len() < min_fields {
            debug!(path = %ctx.path, row = ctx.row, fields = record.len(), "Dropping short row");
            continue;
        }

        rows.push(decode(&record, &ctx)?);
    }

    Ok(rows)
}

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().to_string()
}

fn parse_amount(raw: &str, ctx: &RowContext) -> Result<Decimal, DataSourceError> {
    Decimal::from_str_exact(raw).map_err(|e| DataSourceError::InvalidValue {
        path: ctx.path.to_string(),
        row: ctx.row,
        reason: format!("bad amount {raw:?}: {e}"),
    })
}

fn parse_date(raw: &str, ctx: &RowContext) -> Result<NaiveDate, DataSourceError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| DataSourceError::InvalidValue {
        path: ctx.path.to_string(),
        row: ctx.row,
        reason: format!("bad date {raw:?}: {e}"),
    })
}
