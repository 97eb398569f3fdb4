//! Core business logic abstractions

pub mod config;
pub mod feed;
pub mod log;
pub mod record;
pub mod series;
pub mod summary;

// Re-export main types for cleaner imports
pub use feed::combine;
pub use record::{FeedEntry, RecordKind, TransactionProvider, TransactionRecord};
pub use series::{DailyBucket, DayLabel, build_daily_series};
pub use summary::{BreakdownSlice, SummaryTotals, aggregate, kind_breakdown};
