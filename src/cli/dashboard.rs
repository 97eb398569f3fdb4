use super::ui;
use crate::core::record::{FeedEntry, RecordKind, TransactionProvider};
use crate::core::summary::BreakdownSlice;
use crate::core::{aggregate, combine, kind_breakdown};
use anyhow::Result;
use chrono::Utc;
use comfy_table::Cell;

/// Number of entries shown in the recent transactions list.
const RECENT_FEED_LIMIT: usize = 8;

fn display_totals(income_total: f64, expense_total: f64, currency_symbol: &str) -> String {
    let balance = income_total - expense_total;
    let balance_style = if balance >= 0.0 {
        ui::StyleType::TotalValue
    } else {
        ui::StyleType::Error
    };

    let mut output = format!(
        "{} {}\n",
        ui::style_text("Balance:", ui::StyleType::TotalLabel),
        ui::style_text(&format!("{currency_symbol}{balance:.2}"), balance_style)
    );
    output.push_str(&format!(
        "{} {currency_symbol}{income_total:.2}\n",
        ui::style_text("Total Income:", ui::StyleType::TotalLabel)
    ));
    output.push_str(&format!(
        "{} {currency_symbol}{expense_total:.2}\n",
        ui::style_text("Total Expense:", ui::StyleType::TotalLabel)
    ));
    output
}

fn display_breakdown_table(slices: &[BreakdownSlice], currency_symbol: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Type"),
        ui::header_cell("Total"),
        ui::header_cell("Share (%)"),
    ]);

    for slice in slices {
        table.add_row(vec![
            ui::kind_cell(slice.kind),
            ui::amount_cell(slice.value, currency_symbol),
            ui::share_cell(slice.share_pct),
        ]);
    }

    table.to_string()
}

fn display_feed_table(feed: &[FeedEntry], currency_symbol: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Category"),
        ui::header_cell("Type"),
        ui::header_cell("Amount"),
    ]);

    for entry in feed {
        table.add_row(vec![
            ui::format_optional_cell(entry.record.day(), |d| d.format("%Y-%m-%d").to_string()),
            Cell::new(&entry.record.category),
            ui::kind_cell(entry.kind),
            ui::signed_amount_cell(entry.kind, entry.record.amount, currency_symbol),
        ]);
    }

    table.to_string()
}

pub async fn run(
    provider: &dyn TransactionProvider,
    currency_symbol: &str,
    window_days: u32,
) -> Result<()> {
    let pb = ui::new_progress_bar(2, true);
    pb.set_message("Fetching transactions...");

    let income_pb = pb.clone();
    let expense_pb = pb.clone();
    let (income_res, expense_res) = futures::join!(
        async move {
            let res = provider.fetch(RecordKind::Income).await;
            income_pb.inc(1);
            res
        },
        async move {
            let res = provider.fetch(RecordKind::Expense).await;
            expense_pb.inc(1);
            res
        }
    );
    pb.finish_and_clear();

    let income = income_res?;
    let expense = expense_res?;

    let now = Utc::now();
    let income_totals = aggregate(&income, now, window_days);
    let expense_totals = aggregate(&expense, now, window_days);
    let slices = kind_breakdown(
        income_totals.lifetime_total,
        expense_totals.lifetime_total,
    );
    let feed = combine(income, expense);

    println!("{}\n", ui::style_text("Dashboard", ui::StyleType::Title));
    println!(
        "{}",
        display_totals(
            income_totals.lifetime_total,
            expense_totals.lifetime_total,
            currency_symbol
        )
    );

    if feed.is_empty() {
        println!(
            "{}",
            ui::style_text("No transactions recorded yet.", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    if !slices.is_empty() {
        println!("{}", display_breakdown_table(&slices, currency_symbol));
    }

    ui::print_separator();
    println!(
        "\n{}\n",
        ui::style_text("Recent Transactions", ui::StyleType::Title)
    );
    let recent: Vec<FeedEntry> = feed.into_iter().take(RECENT_FEED_LIMIT).collect();
    println!("{}", display_feed_table(&recent, currency_symbol));

    Ok(())
}
