use super::ui;
use crate::core::record::{RecordKind, parse_timestamp};
use crate::providers::ExpenseApiClient;
use anyhow::{Result, anyhow, bail};
use chrono::Utc;

/// Records a new transaction after validating the user's input locally.
pub async fn add(
    client: &ExpenseApiClient,
    kind: RecordKind,
    category: &str,
    amount: f64,
    date: Option<&str>,
) -> Result<()> {
    if category.trim().is_empty() || !amount.is_finite() || amount <= 0.0 {
        bail!("Please enter a category and a valid amount greater than zero.");
    }

    let date = match date {
        Some(raw) => parse_timestamp(raw).ok_or_else(|| {
            anyhow!("Unrecognized date: {raw}. Use YYYY-MM-DD or an RFC 3339 timestamp.")
        })?,
        None => Utc::now(),
    };

    let message = client.add_record(kind, category.trim(), amount, date).await?;
    println!("{}", ui::style_text(&message, ui::StyleType::TotalValue));
    Ok(())
}

/// Deletes a transaction by its backend-assigned id.
pub async fn delete(client: &ExpenseApiClient, kind: RecordKind, id: &str) -> Result<()> {
    let id = id.trim();
    if id.is_empty() {
        bail!("Please provide the id of the {kind} record to delete.");
    }

    let message = client.delete_record(kind, id).await?;
    println!("{}", ui::style_text(&message, ui::StyleType::TotalValue));
    Ok(())
}
