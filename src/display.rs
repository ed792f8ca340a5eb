//! Display and formatting utilities for Idlemax.
//!
//! This module renders the search outcome (purchase schedule, best rate
//! and diagnostic counters) in a readable format.

use crate::models::{Catalog, SearchOutcome};

/// Formats a duration in seconds to a human-readable string.
///
/// # Example
///
/// ```
/// use idlemax::display::format_time;
///
/// assert_eq!(format_time(3665.0), "1h 1m 5s");
/// assert_eq!(format_time(125.0), "2m 5s");
/// assert_eq!(format_time(45.0), "45s");
/// ```
pub fn format_time(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds % 3600.0) / 60.0).floor();
    let secs = seconds % 60.0;

    if hours > 0.0 {
        format!("{}h {}m {:.0}s", hours, minutes, secs)
    } else if minutes > 0.0 {
        format!("{}m {:.0}s", minutes, secs)
    } else {
        format!("{:.0}s", secs)
    }
}

/// Formats a quantity vector as `{Cursor:3, Grandma:1}`, zero counts
/// omitted. The full-zero initial vector renders as `{}`.
pub fn format_counts(catalog: &Catalog, counts: &[u32]) -> String {
    let owned: Vec<String> = catalog
        .items()
        .iter()
        .zip(counts)
        .filter(|(_, &count)| count > 0)
        .map(|(item, count)| format!("{}:{}", item.name, count))
        .collect();
    format!("{{{}}}", owned.join(", "))
}

/// Displays the complete search results to stdout.
///
/// Prints the purchase schedule step by step, then a summary with the
/// best rate and the engine's diagnostic counters.
pub fn display_plan(catalog: &Catalog, outcome: &SearchOutcome) {
    println!();
    println!("+================================================================+");
    println!("|               IDLEMAX PURCHASE SCHEDULE RESULTS                |");
    println!("+================================================================+");
    println!();

    println!("[BEST PLAN]");
    println!("----------------------------------------------------------------");
    for (i, step) in outcome.plan.iter().enumerate() {
        let action = match &step.item {
            Some(name) => format!("buy {}", name),
            None => "start".to_string(),
        };
        println!(
            "  Step {:>3}: t={:<12} {:<24} -> {}  ({:.3}/s)",
            i + 1,
            format_time(step.time),
            action,
            format_counts(catalog, &step.counts),
            step.rate
        );
    }

    println!();
    println!("[SUMMARY]");
    println!("----------------------------------------------------------------");
    println!("  Best Rate:        {:.4}/s", outcome.best_rate);
    println!("  Purchases:        {}", outcome.plan.len().saturating_sub(1));
    println!("  Final State:      {}", format_counts(catalog, &outcome.best_counts));

    println!();
    println!("[SEARCH COUNTERS]");
    println!("----------------------------------------------------------------");
    println!("  States expanded:  {}", outcome.stats.expanded);
    println!("  Stale skipped:    {}", outcome.stats.stale_skipped);
    println!("  Enqueued:         {}", outcome.stats.enqueued);
    println!("  Offers rejected:  {}", outcome.stats.offers_rejected);
    println!("  Pruned:           {}", outcome.stats.pruned);
    println!();
}
