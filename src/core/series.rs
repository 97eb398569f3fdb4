//! Fixed-length trailing daily series for the bar charts

use crate::core::record::TransactionRecord;
use chrono::{Datelike, Duration, NaiveDate};

/// Display rendering for a bucket's day. The income chart historically labels
/// days by weekday, the expense chart by month/day; both are presentation
/// choices with no effect on bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    /// "3/15" (no zero padding)
    MonthDay,
    /// "Mon", "Tue", ...
    Weekday,
}

impl DayLabel {
    fn render(&self, day: NaiveDate) -> String {
        match self {
            DayLabel::MonthDay => format!("{}/{}", day.month(), day.day()),
            DayLabel::Weekday => day.format("%a").to_string(),
        }
    }
}

/// One calendar day's aggregated total within a trailing series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub label: String,
    pub total: f64,
}

/// Builds exactly `window_days` consecutive day buckets ending at
/// `reference_day`, oldest first, then folds each record into the bucket
/// matching its calendar date.
///
/// Records outside the window or without a parsable date are skipped without
/// error; they still count toward lifetime totals elsewhere. The fold is
/// order-independent and the function keeps no state between calls.
pub fn build_daily_series(
    records: &[TransactionRecord],
    window_days: u32,
    reference_day: NaiveDate,
    label: DayLabel,
) -> Vec<DailyBucket> {
    let span = i64::from(window_days);
    let mut buckets: Vec<DailyBucket> = (0..span)
        .map(|offset| {
            let day = reference_day - Duration::days(span - 1 - offset);
            DailyBucket {
                date: day,
                label: label.render(day),
                total: 0.0,
            }
        })
        .collect();

    let Some(first_day) = buckets.first().map(|b| b.date) else {
        return buckets;
    };

    for record in records {
        let Some(day) = record.day() else { continue };
        let offset = (day - first_day).num_days();
        if offset >= 0 && (offset as usize) < buckets.len() {
            buckets[offset as usize].total += record.amount;
        }
    }

    buckets
}
