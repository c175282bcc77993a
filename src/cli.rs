//! Command-line interface definitions and argument parsing

use chrono::NaiveDate;
use clap::Parser;

/// Customer segmentation CLI using RFM quintile scoring
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, default_value = "data.csv")]
    pub input: String,

    /// Segment whose customer ids are exported
    #[arg(short, long, default_value = "loyal_customers")]
    pub segment: String,

    /// Output path for the exported customer ids
    #[arg(short, long, default_value = "segment_customers.csv")]
    pub output: String,

    /// Reference date for recency computation (YYYY-MM-DD).
    /// Defaults to two days after the latest invoice date in the input.
    #[arg(long)]
    pub reference_date: Option<String>,

    /// Output path for the segment-size chart
    #[arg(long, default_value = "segment_sizes.svg")]
    pub chart: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse the reference date override, if one was given
    pub fn parse_reference_date(&self) -> crate::Result<Option<NaiveDate>> {
        match &self.reference_date {
            Some(raw) => {
                let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")?;
                Ok(Some(date))
            }
            None => Ok(None),
        }
    }
}
