//! Segment reporting: console statistics and a segment-size chart

use std::collections::HashMap;

use plotters::prelude::*;

use crate::data::Transaction;
use crate::segment::{Segment, SegmentedCustomer};

/// Color per segment, in `Segment::ALL` order
const SEGMENT_COLORS: [RGBColor; 10] = [
    RGBColor(96, 96, 96),
    RED,
    RGBColor(178, 34, 34),
    RGBColor(255, 140, 0),
    YELLOW,
    BLUE,
    CYAN,
    RGBColor(147, 112, 219),
    MAGENTA,
    GREEN,
];

/// Aggregate view of one segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentStats {
    pub segment: Segment,
    pub count: usize,
    pub mean_recency: f64,
    pub mean_frequency: f64,
    pub mean_monetary: f64,
}

/// Per-segment count and metric means, in `Segment::ALL` order.
/// Segments with no members are included with zeroed means.
pub fn segment_statistics(customers: &[SegmentedCustomer]) -> Vec<SegmentStats> {
    Segment::ALL
        .into_iter()
        .map(|segment| {
            let mut count = 0usize;
            let mut recency_sum = 0.0;
            let mut frequency_sum = 0.0;
            let mut monetary_sum = 0.0;
            for c in customers.iter().filter(|c| c.segment == segment) {
                count += 1;
                recency_sum += c.recency as f64;
                frequency_sum += c.frequency as f64;
                monetary_sum += c.monetary;
            }
            // Zero sums over an empty segment keep the means at zero
            let denominator = count.max(1) as f64;
            SegmentStats {
                segment,
                count,
                mean_recency: recency_sum / denominator,
                mean_frequency: frequency_sum / denominator,
                mean_monetary: monetary_sum / denominator,
            }
        })
        .collect()
}

/// Print per-segment statistics to console
pub fn print_segment_statistics(customers: &[SegmentedCustomer]) {
    let total = customers.len();
    println!("\n=== Segment Statistics ===");
    println!("Total customers: {}", total);
    println!("\n  Segment             | Count | Share  | Avg Recency | Avg Frequency | Avg Monetary");
    println!("  --------------------|-------|--------|-------------|---------------|-------------");
    for stats in segment_statistics(customers) {
        let share = if total == 0 {
            0.0
        } else {
            stats.count as f64 / total as f64 * 100.0
        };
        println!(
            "  {:19} | {:5} | {:5.1}% | {:11.1} | {:13.2} | {:12.2}",
            stats.segment.label(),
            stats.count,
            share,
            stats.mean_recency,
            stats.mean_frequency,
            stats.mean_monetary
        );
    }
}

/// Print a short summary of the cleaned ledger: volume, cardinalities, and
/// the five most ordered products
pub fn print_dataset_summary(transactions: &[Transaction]) {
    let customers: std::collections::HashSet<&str> = transactions
        .iter()
        .map(|t| t.customer_id.as_str())
        .collect();
    let mut quantity_by_product: HashMap<&str, i64> = HashMap::new();
    for t in transactions {
        *quantity_by_product.entry(t.stock_code.as_str()).or_insert(0) += t.quantity;
    }

    println!("\n=== Dataset Summary ===");
    println!("Transactions: {}", transactions.len());
    println!("Distinct customers: {}", customers.len());
    println!("Distinct products: {}", quantity_by_product.len());

    let mut ranked: Vec<(&str, i64)> = quantity_by_product.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    println!("Top products by quantity:");
    for (stock_code, quantity) in ranked.iter().take(5) {
        println!("  {:10} {:>8}", stock_code, quantity);
    }
}

/// Render a bar chart of segment sizes.
///
/// # Arguments
/// * `customers` - the segmented customer table
/// * `output_path` - path for the SVG output
pub fn create_segment_size_chart(
    customers: &[SegmentedCustomer],
    output_path: &str,
) -> crate::Result<()> {
    let stats = segment_statistics(customers);
    let max_count = stats.iter().map(|s| s.count).max().unwrap_or(1).max(1) as f64;
    let n_segments = Segment::ALL.len();

    let root = SVGBackend::new(output_path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Customers per Segment", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..n_segments as f64, 0f64..(max_count * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Segment")
        .y_desc("Number of Customers")
        .axis_desc_style(("sans-serif", 15))
        .x_labels(n_segments)
        .x_label_formatter(&|x| {
            Segment::ALL
                .get(x.floor() as usize)
                .map(|s| s.label().to_string())
                .unwrap_or_default()
        })
        .draw()?;

    for (index, stats) in stats.iter().enumerate() {
        let color = &SEGMENT_COLORS[index % SEGMENT_COLORS.len()];
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (index as f64 + 0.1, 0.0),
                (index as f64 + 0.9, stats.count as f64),
            ],
            color.filled(),
        )))?;
    }

    root.present()?;
    println!("Segment size chart saved to: {}", output_path);

    Ok(())
}

/// Print segment statistics and render the segment-size chart
pub fn generate_segment_report(
    customers: &[SegmentedCustomer],
    chart_path: &str,
) -> crate::Result<()> {
    print_segment_statistics(customers);
    create_segment_size_chart(customers, chart_path)?;
    Ok(())
}
