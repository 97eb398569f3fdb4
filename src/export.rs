//! Spreadsheet export of the combined transaction feed

use crate::core::record::FeedEntry;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

pub const EXPORT_HEADERS: [&str; 4] = ["Date", "Category", "Type", "Amount"];

/// Default export filename for a given day, e.g. `Transactions_2024-06-15.csv`.
pub fn default_export_filename(today: NaiveDate) -> String {
    format!("Transactions_{}.csv", today.format("%Y-%m-%d"))
}

/// Renders feed entries as export rows.
///
/// The amount picks up its currency symbol and fixed precision here, at the
/// edge; aggregation always works on the raw numbers. Undated records get an
/// empty date cell rather than being dropped.
pub fn feed_to_rows(feed: &[FeedEntry], currency_symbol: &str) -> Vec<[String; 4]> {
    feed.iter()
        .map(|entry| {
            let date = entry
                .record
                .date
                .map(|d| d.date_naive().to_string())
                .unwrap_or_default();
            [
                date,
                entry.record.category.clone(),
                entry.kind.to_string(),
                format!("{}{:.2}", currency_symbol, entry.record.amount),
            ]
        })
        .collect()
}

/// Writes the feed as a CSV file with a header row.
pub fn write_feed_csv<P: AsRef<Path>>(
    path: P,
    feed: &[FeedEntry],
    currency_symbol: &str,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;

    writer
        .write_record(EXPORT_HEADERS)
        .context("Failed to write export header")?;
    for row in feed_to_rows(feed, currency_symbol) {
        writer
            .write_record(&row)
            .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush export file: {}", path.display()))?;
    Ok(())
}
