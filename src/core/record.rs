//! Transaction records and the amount/date normalization helpers

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Income,
    Expense,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RecordKind::Income => "Income",
                RecordKind::Expense => "Expense",
            }
        )
    }
}

impl FromStr for RecordKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(RecordKind::Income),
            "expense" => Ok(RecordKind::Expense),
            _ => Err(anyhow::anyhow!("Invalid record kind: {}", s)),
        }
    }
}

/// One income or expense entry as returned by the backend.
///
/// `date` is `None` when the backend timestamp could not be parsed; such
/// records still count toward lifetime totals but never match a chart bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: String,
    pub category: String,
    pub amount: f64,
    pub date: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    /// Calendar day of the record, for day-granularity comparisons.
    pub fn day(&self) -> Option<NaiveDate> {
        self.date.map(|d| d.date_naive())
    }
}

/// A record tagged with the list it came from, for the merged display feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub kind: RecordKind,
    pub record: TransactionRecord,
}

#[async_trait]
pub trait TransactionProvider: Send + Sync {
    async fn fetch(&self, kind: RecordKind) -> Result<Vec<TransactionRecord>>;
}

/// Coerces a wire amount into a sum-safe number.
///
/// The backend is loose here: amounts arrive as JSON numbers or as numeric
/// strings, and older records may carry null. Anything that does not parse to
/// a finite number becomes 0, so one bad record never poisons a running total.
pub fn coerce_amount(raw: &serde_json::Value) -> f64 {
    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Parses a backend timestamp into UTC.
///
/// Tries RFC 3339 first, then a bare calendar date (taken as midnight UTC),
/// then a naive date-time without offset. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    None
}
