//! SegmentForge: RFM customer segmentation for retail transaction ledgers
//!
//! The pipeline runs in fixed stages, each consuming one immutable table and
//! producing the next: cleaned transactions, per-customer RFM metrics,
//! quintile scores, named segments, and finally the exported member list of
//! one segment.

pub mod cli;
pub mod data;
pub mod error;
pub mod export;
pub mod rfm;
pub mod score;
pub mod segment;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{clean_records, load_records, load_transactions, RawRecord, Transaction};
pub use error::{Error, Result};
pub use export::{export_segment, segment_members};
pub use rfm::{aggregate_metrics, default_reference_date, latest_invoice_date, CustomerMetrics};
pub use score::{quintile_buckets, score_customers, ScoredCustomer};
pub use segment::{classify, classify_customers, Segment, SegmentedCustomer};
