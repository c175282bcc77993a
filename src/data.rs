//! Transaction ingestion and record filtering

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::{Error, Result};

/// One raw row of the retail ledger, as it appears on disk.
///
/// Every consumed field is optional at this stage: the filter decides which
/// rows survive. Field aliases cover both column spellings found in the wild
/// (`Invoice`/`InvoiceNo`, `Price`/`UnitPrice`, `Customer ID`/`CustomerID`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Invoice", alias = "InvoiceNo")]
    pub invoice: Option<String>,
    #[serde(rename = "StockCode")]
    pub stock_code: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: Option<i64>,
    #[serde(rename = "InvoiceDate")]
    pub invoice_date: Option<String>,
    #[serde(rename = "Price", alias = "UnitPrice")]
    pub unit_price: Option<f64>,
    #[serde(rename = "Customer ID", alias = "CustomerID")]
    pub customer_id: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
}

/// A cleaned transaction: all required fields present, cancellations removed,
/// line revenue computed. Immutable input to the rest of the pipeline.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub invoice: String,
    pub stock_code: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub invoice_date: NaiveDateTime,
    pub customer_id: String,
    /// quantity * unit_price
    pub line_revenue: f64,
}

/// Invoice ids containing this marker denote cancelled transactions
const CANCELLATION_MARKER: char = 'C';

/// Read raw ledger rows from a CSV file.
///
/// Rows that fail to deserialize are skipped: this is a data-cleaning pass,
/// not a validation pass, and malformed rows are excluded silently.
pub fn load_records(path: &str) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    Ok(reader
        .deserialize::<RawRecord>()
        .filter_map(std::result::Result::ok)
        .collect())
}

/// Filter raw rows down to usable transactions.
///
/// Drops rows missing any of customer id, stock code, invoice id, timestamp,
/// or price; drops cancelled invoices (id contains 'C'); computes line
/// revenue for every survivor. Row order is preserved.
pub fn clean_records<I>(records: I) -> Vec<Transaction>
where
    I: IntoIterator<Item = RawRecord>,
{
    records
        .into_iter()
        .filter_map(|row| {
            let invoice = non_blank(row.invoice)?;
            let stock_code = non_blank(row.stock_code)?;
            let customer_id = non_blank(row.customer_id)?;
            let quantity = row.quantity?;
            let unit_price = row.unit_price?;
            let invoice_date = parse_invoice_date(row.invoice_date.as_deref()?)?;

            if invoice.contains(CANCELLATION_MARKER) {
                return None;
            }

            let line_revenue = quantity as f64 * unit_price;
            Some(Transaction {
                invoice,
                stock_code,
                quantity,
                unit_price,
                invoice_date,
                customer_id,
                line_revenue,
            })
        })
        .collect()
}

/// Load and clean a ledger file in one step.
///
/// # Arguments
/// * `path` - Path to the input CSV file
///
/// # Returns
/// * Cleaned transactions, or `Error::EmptyDataset` if nothing survives the
///   filter
pub fn load_transactions(path: &str) -> Result<Vec<Transaction>> {
    let transactions = clean_records(load_records(path)?);
    if transactions.is_empty() {
        return Err(Error::EmptyDataset);
    }
    Ok(transactions)
}

fn non_blank(field: Option<String>) -> Option<String> {
    let value = field?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse an invoice timestamp in any of the formats retail exports use
fn parse_invoice_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
