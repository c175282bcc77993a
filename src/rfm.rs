//! Per-customer RFM metric aggregation

use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::data::Transaction;

/// Behavioral metrics for one customer.
///
/// * `recency` - days between the customer's last purchase and the reference
///   date
/// * `frequency` - number of distinct invoices
/// * `monetary` - total line revenue, always positive after aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerMetrics {
    pub customer_id: String,
    pub recency: i64,
    pub frequency: usize,
    pub monetary: f64,
}

/// Buffer between the last observed purchase and the reference date, so no
/// customer scores recency 0
const REFERENCE_DATE_BUFFER_DAYS: u64 = 2;

/// Most recent invoice date in the ledger
pub fn latest_invoice_date(transactions: &[Transaction]) -> Option<NaiveDate> {
    transactions.iter().map(|t| t.invoice_date.date()).max()
}

/// Default recency anchor: two days after the latest observed invoice date
pub fn default_reference_date(transactions: &[Transaction]) -> Option<NaiveDate> {
    latest_invoice_date(transactions)
        .and_then(|d| d.checked_add_days(Days::new(REFERENCE_DATE_BUFFER_DAYS)))
}

/// Reduce cleaned transactions to one metric record per customer.
///
/// Customers appear in first-seen order of the transaction stream; that order
/// is the table's iteration order for every later stage, which keeps repeated
/// runs over the same input byte-identical. Customers whose total spend is
/// not positive (returns-only customers) are dropped.
///
/// `reference_date` must be strictly after the latest invoice date; the
/// two-day buffer of [`default_reference_date`] keeps the most recent buyers
/// away from a zero-recency edge.
pub fn aggregate_metrics(
    transactions: &[Transaction],
    reference_date: NaiveDate,
) -> Vec<CustomerMetrics> {
    struct Group<'a> {
        customer_id: &'a str,
        last_purchase: NaiveDateTime,
        invoices: HashSet<&'a str>,
        monetary: f64,
    }

    let mut order: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for t in transactions {
        let slot = *order.entry(&t.customer_id).or_insert_with(|| {
            groups.push(Group {
                customer_id: &t.customer_id,
                last_purchase: t.invoice_date,
                invoices: HashSet::new(),
                monetary: 0.0,
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.last_purchase = group.last_purchase.max(t.invoice_date);
        group.invoices.insert(&t.invoice);
        group.monetary += t.line_revenue;
    }

    groups
        .into_iter()
        .filter(|g| g.monetary > 0.0)
        .map(|g| CustomerMetrics {
            customer_id: g.customer_id.to_string(),
            recency: (reference_date - g.last_purchase.date()).num_days(),
            frequency: g.invoices.len(),
            monetary: g.monetary,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(
        invoice: &str,
        customer_id: &str,
        date: &str,
        quantity: i64,
        unit_price: f64,
    ) -> Transaction {
        let invoice_date = NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").unwrap();
        Transaction {
            invoice: invoice.to_string(),
            stock_code: "85123A".to_string(),
            quantity,
            unit_price,
            invoice_date,
            customer_id: customer_id.to_string(),
            line_revenue: quantity as f64 * unit_price,
        }
    }

    #[test]
    fn test_aggregate_single_customer() {
        let transactions = vec![
            transaction("536365", "17850", "2011-12-04 08:26:00", 6, 2.55),
            transaction("536365", "17850", "2011-12-04 08:26:00", 6, 3.39),
            transaction("536400", "17850", "2011-12-06 10:00:00", 2, 5.00),
        ];
        let reference = NaiveDate::from_ymd_opt(2011, 12, 11).unwrap();

        let metrics = aggregate_metrics(&transactions, reference);
        assert_eq!(metrics.len(), 1);

        let m = &metrics[0];
        assert_eq!(m.customer_id, "17850");
        assert_eq!(m.recency, 5);
        // Two line items on invoice 536365 still count it once
        assert_eq!(m.frequency, 2);
        assert!((m.monetary - (6.0 * 2.55 + 6.0 * 3.39 + 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_monetary_dropped() {
        let transactions = vec![
            transaction("536365", "17850", "2011-12-04 08:26:00", 6, 2.55),
            // Net-negative customer: a refund larger than any purchase
            transaction("536370", "12583", "2011-12-01 09:00:00", -10, 4.00),
            transaction("536371", "12583", "2011-12-02 09:00:00", 1, 4.00),
        ];
        let reference = NaiveDate::from_ymd_opt(2011, 12, 11).unwrap();

        let metrics = aggregate_metrics(&transactions, reference);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].customer_id, "17850");
        for m in &metrics {
            assert!(m.monetary > 0.0);
            assert!(m.frequency >= 1);
        }
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let transactions = vec![
            transaction("1", "300", "2011-12-01 08:00:00", 1, 1.0),
            transaction("2", "100", "2011-12-01 09:00:00", 1, 1.0),
            transaction("3", "200", "2011-12-01 10:00:00", 1, 1.0),
            transaction("4", "300", "2011-12-02 08:00:00", 1, 1.0),
        ];
        let reference = NaiveDate::from_ymd_opt(2011, 12, 11).unwrap();

        let ids: Vec<String> = aggregate_metrics(&transactions, reference)
            .into_iter()
            .map(|m| m.customer_id)
            .collect();
        assert_eq!(ids, vec!["300", "100", "200"]);
    }

    #[test]
    fn test_default_reference_date() {
        let transactions = vec![
            transaction("536365", "17850", "2011-12-01 08:26:00", 6, 2.55),
            transaction("536400", "13047", "2011-12-09 10:00:00", 2, 5.00),
        ];
        assert_eq!(
            default_reference_date(&transactions),
            NaiveDate::from_ymd_opt(2011, 12, 11)
        );
        assert_eq!(default_reference_date(&[]), None);
    }
}
