//! Lifetime and trailing-window totals over fetched records

use crate::core::record::{RecordKind, TransactionRecord};
use chrono::{DateTime, Duration, Utc};

/// Totals for one record list, computed in a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryTotals {
    pub lifetime_total: f64,
    pub trailing_window_total: f64,
}

/// One kind's share of the combined income/expense total.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownSlice {
    pub kind: RecordKind,
    pub value: f64,
    pub share_pct: f64,
}

/// Sums a record list into a lifetime total and a trailing-window total.
///
/// The window cutoff is the calendar day of `now - window_days`, computed once
/// for the whole pass; records on the cutoff day itself are included. Records
/// without a parsable date count toward the lifetime total only. Pure in its
/// inputs, so callers inject `now` instead of reading the clock here.
pub fn aggregate(
    records: &[TransactionRecord],
    now: DateTime<Utc>,
    window_days: u32,
) -> SummaryTotals {
    let cutoff_day = (now - Duration::days(i64::from(window_days))).date_naive();

    let mut totals = SummaryTotals::default();
    for record in records {
        totals.lifetime_total += record.amount;
        if let Some(day) = record.day() {
            if day >= cutoff_day {
                totals.trailing_window_total += record.amount;
            }
        }
    }
    totals
}

/// Splits the income/expense pair into percentage shares for the overview
/// chart. Returns an empty list when the combined total is zero so the caller
/// renders nothing instead of dividing by zero.
pub fn kind_breakdown(total_income: f64, total_expense: f64) -> Vec<BreakdownSlice> {
    let total = total_income + total_expense;
    if total == 0.0 {
        return Vec::new();
    }

    vec![
        BreakdownSlice {
            kind: RecordKind::Income,
            value: total_income,
            share_pct: (total_income / total) * 100.0,
        },
        BreakdownSlice {
            kind: RecordKind::Expense,
            value: total_expense,
            share_pct: (total_expense / total) * 100.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::coerce_amount;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(amount: f64, date: Option<DateTime<Utc>>) -> TransactionRecord {
        TransactionRecord {
            id: "test".to_string(),
            category: "Misc".to_string(),
            amount,
            date,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_aggregate_empty_input_is_zeroed() {
        let totals = aggregate(&[], fixed_now(), 30);
        assert_eq!(totals.lifetime_total, 0.0);
        assert_eq!(totals.trailing_window_total, 0.0);
    }

    #[test]
    fn test_aggregate_splits_lifetime_and_window() {
        let now = fixed_now();
        let records = vec![
            record(100.0, Some(now - Duration::days(2))),
            record(40.0, Some(now - Duration::days(45))),
        ];

        let totals = aggregate(&records, now, 30);
        assert_eq!(totals.lifetime_total, 140.0);
        assert_eq!(totals.trailing_window_total, 100.0);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let now = fixed_now();
        let mut records = vec![
            record(10.0, Some(now)),
            record(20.0, Some(now - Duration::days(10))),
            record(30.0, Some(now - Duration::days(40))),
        ];

        let forward = aggregate(&records, now, 30);
        records.reverse();
        let backward = aggregate(&records, now, 30);

        assert_eq!(forward, backward);
        assert_eq!(forward.lifetime_total, 60.0);
        assert_eq!(forward.trailing_window_total, 30.0);
    }

    #[test]
    fn test_aggregate_cutoff_day_is_inclusive() {
        let now = fixed_now();

        // Same calendar day as the cutoff, but at a later time of day than
        // `now` carries. Day granularity keeps it inside the window.
        let late_on_cutoff_day = Utc.with_ymd_and_hms(2024, 5, 16, 23, 30, 0).unwrap();
        let one_day_outside = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();

        let records = vec![
            record(50.0, Some(late_on_cutoff_day)),
            record(70.0, Some(one_day_outside)),
        ];

        let totals = aggregate(&records, now, 30);
        assert_eq!(totals.lifetime_total, 120.0);
        assert_eq!(totals.trailing_window_total, 50.0);
    }

    #[test]
    fn test_aggregate_undated_record_counts_lifetime_only() {
        let now = fixed_now();
        let records = vec![record(25.0, None), record(5.0, Some(now))];

        let totals = aggregate(&records, now, 30);
        assert_eq!(totals.lifetime_total, 30.0);
        assert_eq!(totals.trailing_window_total, 5.0);
    }

    #[test]
    fn test_aggregate_passes_negative_amounts_through() {
        let now = fixed_now();
        let records = vec![record(-10.0, Some(now)), record(4.0, Some(now))];

        let totals = aggregate(&records, now, 30);
        assert_eq!(totals.lifetime_total, -6.0);
        assert_eq!(totals.trailing_window_total, -6.0);
    }

    #[test]
    fn test_aggregate_string_and_null_amounts_after_coercion() {
        let now = fixed_now();
        let records = vec![
            record(coerce_amount(&json!("50.5")), Some(now)),
            record(coerce_amount(&json!(null)), Some(now - Duration::days(40))),
        ];

        let totals = aggregate(&records, now, 30);
        assert_eq!(totals.lifetime_total, 50.5);
        assert_eq!(totals.trailing_window_total, 50.5);
    }

    #[test]
    fn test_kind_breakdown_zero_total_is_empty() {
        assert!(kind_breakdown(0.0, 0.0).is_empty());
    }

    #[test]
    fn test_kind_breakdown_shares_sum_to_hundred() {
        let slices = kind_breakdown(300.0, 100.0);
        assert_eq!(slices.len(), 2);

        assert_eq!(slices[0].kind, RecordKind::Income);
        assert_eq!(slices[0].value, 300.0);
        assert_eq!(slices[0].share_pct, 75.0);

        assert_eq!(slices[1].kind, RecordKind::Expense);
        assert_eq!(slices[1].value, 100.0);
        assert_eq!(slices[1].share_pct, 25.0);

        let total_pct: f64 = slices.iter().map(|s| s.share_pct).sum();
        assert!((total_pct - 100.0).abs() < 1e-9);
    }
}
