//! SegmentForge: Customer segmentation CLI using RFM quintile scoring
//!
//! This is the main entrypoint that orchestrates ingestion, metric
//! aggregation, scoring, classification, reporting, and export.

use anyhow::Result;
use clap::Parser;
use segmentforge::{
    aggregate_metrics, classify_customers, default_reference_date, export_segment,
    latest_invoice_date, load_transactions, score_customers, viz, Args,
};
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if args.verbose {
        println!("SegmentForge - Customer Segmentation using RFM scores");
        println!("=====================================================\n");
    }

    run_pipeline(&args)
}

/// Run the full segmentation pipeline
fn run_pipeline(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Load and clean the ledger
    if args.verbose {
        println!("Step 1: Loading and filtering transactions");
        println!("  Input file: {}", args.input);
    }

    let data_start = Instant::now();
    let transactions = load_transactions(&args.input)?;
    println!("✓ Transactions loaded: {} rows", transactions.len());
    if args.verbose {
        println!("  Loading time: {:.2}s", data_start.elapsed().as_secs_f64());
        viz::print_dataset_summary(&transactions);
    }

    // Step 2: Aggregate RFM metrics per customer
    let latest = latest_invoice_date(&transactions)
        .ok_or_else(|| anyhow::anyhow!("input has no invoice dates"))?;
    let reference_date = match args.parse_reference_date()? {
        Some(date) => {
            if date <= latest {
                anyhow::bail!(
                    "reference date {} is not after the latest invoice date {}",
                    date,
                    latest
                );
            }
            date
        }
        None => default_reference_date(&transactions)
            .ok_or_else(|| anyhow::anyhow!("input has no invoice dates"))?,
    };

    if args.verbose {
        println!("\nStep 2: Aggregating RFM metrics");
        println!("  Reference date: {}", reference_date);
    }

    let metrics = aggregate_metrics(&transactions, reference_date);
    println!("✓ Metrics aggregated: {} customers", metrics.len());

    // Step 3: Quintile scoring
    if args.verbose {
        println!("\nStep 3: Scoring metrics into quintiles");
    }
    let scored = score_customers(&metrics)?;
    println!("✓ Customers scored");

    // Step 4: Segment classification
    if args.verbose {
        println!("\nStep 4: Classifying segments");
    }
    let segmented = classify_customers(scored)?;
    println!("✓ Segments assigned");

    // Step 5: Report and export
    viz::generate_segment_report(&segmented, &args.chart)?;

    let exported = export_segment(&segmented, &args.segment, &args.output)?;
    println!(
        "\n✓ Exported {} {} customers to: {}",
        exported, args.segment, args.output
    );

    println!("\n=== Pipeline Complete ===");
    println!(
        "Total processing time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
