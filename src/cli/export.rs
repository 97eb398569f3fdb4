use super::ui;
use crate::core::record::{RecordKind, TransactionProvider};
use crate::core::combine;
use crate::export::{default_export_filename, write_feed_csv};
use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;

pub async fn run(
    provider: &dyn TransactionProvider,
    currency_symbol: &str,
    output: Option<&str>,
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

    let feed = combine(income_res?, expense_res?);

    let path = match output {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(default_export_filename(Utc::now().date_naive())),
    };

    write_feed_csv(&path, &feed, currency_symbol)?;
    println!(
        "{}",
        ui::style_text(
            &format!("Exported {} transactions to {}", feed.len(), path.display()),
            ui::StyleType::TotalValue
        )
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::TransactionRecord;
    use async_trait::async_trait;
    use chrono::DateTime;

    struct StubProvider;

    #[async_trait]
    impl TransactionProvider for StubProvider {
        async fn fetch(&self, kind: RecordKind) -> Result<Vec<TransactionRecord>> {
            let (id, category, amount) = match kind {
                RecordKind::Income => ("1", "Salary", 1200.0),
                RecordKind::Expense => ("2", "Groceries", 40.5),
            };
            Ok(vec![TransactionRecord {
                id: id.to_string(),
                category: category.to_string(),
                amount,
                date: Some("2024-06-10T00:00:00Z".parse::<DateTime<Utc>>().unwrap()),
            }])
        }
    }

    #[tokio::test]
    async fn test_run_writes_csv_to_requested_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");

        let result = run(&StubProvider, "$", out.to_str()).await;
        assert!(result.is_ok(), "export failed with: {:?}", result.err());

        let contents = std::fs::read_to_string(&out).unwrap();
        assert!(contents.starts_with("Date,Category,Type,Amount"));
        assert!(contents.contains("2024-06-10,Salary,Income,$1200.00"));
        assert!(contents.contains("2024-06-10,Groceries,Expense,$40.50"));
    }
}
