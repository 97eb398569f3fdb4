//! Merged income/expense feed for the recent-transactions display

use crate::core::record::{FeedEntry, RecordKind, TransactionRecord};
use std::cmp::Ordering;

/// Tags each record with its source list and merges both into one feed,
/// most recent first.
///
/// The sort is stable and keyed only on the full timestamp; records without a
/// parsable date sort after every dated record. Nothing is deduplicated: an
/// id appearing in both lists keeps both entries. Callers cap the result for
/// display (the dashboard shows the first 8).
pub fn combine(income: Vec<TransactionRecord>, expense: Vec<TransactionRecord>) -> Vec<FeedEntry> {
    let mut feed: Vec<FeedEntry> = income
        .into_iter()
        .map(|record| FeedEntry {
            kind: RecordKind::Income,
            record,
        })
        .chain(expense.into_iter().map(|record| FeedEntry {
            kind: RecordKind::Expense,
            record,
        }))
        .collect();

    feed.sort_by(|a, b| match (a.record.date, b.record.date) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    feed
}
