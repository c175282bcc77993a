//! Export of segment members for downstream consumption

use std::path::Path;

use crate::error::Result;
use crate::segment::{Segment, SegmentedCustomer};

/// Customer ids belonging to `target`, in table iteration order
pub fn segment_members<'a>(
    customers: &'a [SegmentedCustomer],
    target: Segment,
) -> Vec<&'a str> {
    customers
        .iter()
        .filter(|c| c.segment == target)
        .map(|c| c.customer_id.as_str())
        .collect()
}

/// Write the members of one segment to a CSV artifact.
///
/// The label is validated against the ten known segments first; an unknown
/// label fails the run. The artifact carries a header row and a row-index
/// column ahead of the identifiers, the shape downstream consumers already
/// ingest.
///
/// # Arguments
/// * `customers` - the segmented customer table
/// * `label` - target segment label, e.g. "loyal_customers"
/// * `path` - output CSV path
///
/// # Returns
/// * Number of exported customer ids
pub fn export_segment<P: AsRef<Path>>(
    customers: &[SegmentedCustomer],
    label: &str,
    path: P,
) -> Result<usize> {
    let target: Segment = label.parse()?;
    let members = segment_members(customers, target);

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["", "customer_id"])?;
    for (index, customer_id) in members.iter().copied().enumerate() {
        writer.write_record([index.to_string().as_str(), customer_id])?;
    }
    writer.flush()?;

    Ok(members.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    fn segmented(customer_id: &str, segment: Segment) -> SegmentedCustomer {
        SegmentedCustomer {
            customer_id: customer_id.to_string(),
            recency: 10,
            frequency: 3,
            monetary: 150.0,
            recency_score: 4,
            frequency_score: 4,
            monetary_score: 3,
            segment,
        }
    }

    #[test]
    fn test_members_in_table_order() {
        let customers = vec![
            segmented("17850", Segment::LoyalCustomers),
            segmented("13047", Segment::Champions),
            segmented("12583", Segment::LoyalCustomers),
        ];

        let members = segment_members(&customers, Segment::LoyalCustomers);
        assert_eq!(members, vec!["17850", "12583"]);
    }

    #[test]
    fn test_export_shape() {
        let customers = vec![
            segmented("17850", Segment::LoyalCustomers),
            segmented("13047", Segment::Champions),
            segmented("12583", Segment::LoyalCustomers),
        ];
        let dir = tempdir().unwrap();
        let path = dir.path().join("loyal_customers.csv");

        let count = export_segment(&customers, "loyal_customers", &path).unwrap();
        assert_eq!(count, 2);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, ",customer_id\n0,17850\n1,12583\n");
    }

    #[test]
    fn test_unknown_label_rejected() {
        let customers = vec![segmented("17850", Segment::Champions)];
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let result = export_segment(&customers, "whales", &path);
        assert!(matches!(result, Err(Error::InvalidSegment(label)) if label == "whales"));
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_segment_exports_header_only() {
        let customers = vec![segmented("17850", Segment::Champions)];
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let count = export_segment(&customers, "hibernating", &path).unwrap();
        assert_eq!(count, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), ",customer_id\n");
    }
}
