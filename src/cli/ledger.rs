use super::ui;
use crate::core::record::{FeedEntry, RecordKind, TransactionProvider};
use crate::core::series::{DailyBucket, DayLabel};
use crate::core::{aggregate, build_daily_series, combine};
use anyhow::Result;
use chrono::Utc;
use comfy_table::{Cell, Color};

/// Width of the daily chart bars, in block characters.
const CHART_BAR_WIDTH: usize = 40;

/// Income charts label days by weekday name, expense charts by month/day.
fn chart_label(kind: RecordKind) -> DayLabel {
    match kind {
        RecordKind::Income => DayLabel::Weekday,
        RecordKind::Expense => DayLabel::MonthDay,
    }
}

fn display_chart_table(series: &[DailyBucket], kind: RecordKind, currency_symbol: &str) -> String {
    let max_total = series.iter().map(|b| b.total).fold(0.0_f64, f64::max);
    let (_, color) = ui::kind_glyph(kind);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Day"),
        ui::header_cell("Spread"),
        ui::header_cell("Total"),
    ]);

    for bucket in series {
        table.add_row(vec![
            Cell::new(bucket.date.format("%Y-%m-%d").to_string()),
            Cell::new(&bucket.label),
            Cell::new(ui::bar_string(bucket.total, max_total, CHART_BAR_WIDTH)).fg(color),
            ui::amount_cell(bucket.total, currency_symbol),
        ]);
    }

    table.to_string()
}

fn display_records_table(feed: &[FeedEntry], currency_symbol: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
        ui::header_cell("Id"),
    ]);

    for entry in feed {
        table.add_row(vec![
            ui::format_optional_cell(entry.record.day(), |d| d.format("%Y-%m-%d").to_string()),
            Cell::new(&entry.record.category),
            ui::signed_amount_cell(entry.kind, entry.record.amount, currency_symbol),
            Cell::new(&entry.record.id).fg(Color::DarkGrey),
        ]);
    }

    table.to_string()
}

pub async fn run(
    provider: &dyn TransactionProvider,
    kind: RecordKind,
    currency_symbol: &str,
    window_days: u32,
) -> Result<()> {
    let pb = ui::new_progress_bar(1, true);
    pb.set_message(format!("Fetching {kind} records..."));
    let records = provider.fetch(kind).await?;
    pb.inc(1);
    pb.finish_and_clear();

    let now = Utc::now();
    let totals = aggregate(&records, now, window_days);
    let series = build_daily_series(&records, window_days, now.date_naive(), chart_label(kind));

    // Reuses the feed merge for its date-descending ordering.
    let feed = match kind {
        RecordKind::Income => combine(records, Vec::new()),
        RecordKind::Expense => combine(Vec::new(), records),
    };

    println!(
        "{}\n",
        ui::style_text(&format!("{kind} Overview"), ui::StyleType::Title)
    );
    println!(
        "{} {}",
        ui::style_text(&format!("Total {kind}:"), ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{currency_symbol}{:.2}", totals.lifetime_total),
            ui::StyleType::TotalValue
        )
    );
    println!(
        "{} {currency_symbol}{:.2}\n",
        ui::style_text(&format!("Last {window_days} Days:"), ui::StyleType::TotalLabel),
        totals.trailing_window_total
    );

    if feed.is_empty() {
        println!(
            "{}",
            ui::style_text(&format!("No {kind} records yet."), ui::StyleType::Subtle)
        );
        return Ok(());
    }

    println!("{}", display_chart_table(&series, kind, currency_symbol));
    ui::print_separator();
    println!(
        "\n{}\n",
        ui::style_text(&format!("All {kind} Records"), ui::StyleType::Title)
    );
    println!("{}", display_records_table(&feed, currency_symbol));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::TransactionRecord;
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate};

    struct StubProvider {
        records: Vec<TransactionRecord>,
    }

    #[async_trait]
    impl TransactionProvider for StubProvider {
        async fn fetch(&self, _kind: RecordKind) -> Result<Vec<TransactionRecord>> {
            Ok(self.records.clone())
        }
    }

    fn record(id: &str, amount: f64, date: &str) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            category: "Groceries".to_string(),
            amount,
            date: Some(date.parse::<DateTime<Utc>>().unwrap()),
        }
    }

    #[test]
    fn test_chart_label_per_kind() {
        assert_eq!(chart_label(RecordKind::Income), DayLabel::Weekday);
        assert_eq!(chart_label(RecordKind::Expense), DayLabel::MonthDay);
    }

    #[test]
    fn test_display_chart_table_scales_bars() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let series = vec![
            DailyBucket {
                date: day.pred_opt().unwrap(),
                label: "6/14".to_string(),
                total: 50.0,
            },
            DailyBucket {
                date: day,
                label: "6/15".to_string(),
                total: 100.0,
            },
        ];

        let output = display_chart_table(&series, RecordKind::Expense, "$");
        assert!(output.contains("6/14"));
        assert!(output.contains("$100.00"));
        assert!(output.contains(&"█".repeat(CHART_BAR_WIDTH)));
    }

    #[tokio::test]
    async fn test_run_with_records() {
        let provider = StubProvider {
            records: vec![
                record("1", 40.0, "2024-06-10T00:00:00Z"),
                record("2", 15.5, "2024-06-12T09:30:00Z"),
            ],
        };

        let result = run(&provider, RecordKind::Expense, "$", 30).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_with_no_records() {
        let provider = StubProvider { records: vec![] };

        let result = run(&provider, RecordKind::Income, "$", 30).await;
        assert!(result.is_ok());
    }
}
