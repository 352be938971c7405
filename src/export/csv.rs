//! CSV export of the transaction list
//!
//! Serializes rows exactly as the filter/sort pipeline produced them:
//! `Date,Type,Category,Description,Amount`, with expenses written as negative
//! amounts.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::FinTrackResult;
use crate::reports::TransactionRow;

const HEADERS: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];

/// Write transaction rows as CSV
pub fn export_transactions_csv<W: Write>(rows: &[TransactionRow], writer: W) -> FinTrackResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(HEADERS)?;

    for row in rows {
        let txn = &row.transaction;
        // Dangling references keep the raw ID so the export stays traceable
        let category = match &row.category {
            Some(category) => category.name.as_str(),
            None => txn.category_id.as_str(),
        };

        csv_writer.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            txn.kind.to_string(),
            category.to_string(),
            txn.description.clone(),
            format!("{:.2}", txn.signed_amount()),
        ])?;
    }

    csv_writer.flush()?;
    tracing::debug!(rows = rows.len(), "exported transactions to CSV");
    Ok(())
}

/// Suggested export file name for a given day
pub fn export_file_name(today: NaiveDate) -> String {
    format!("fintrack-transactions-{}.csv", today.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryId, CategoryKind, Transaction, TransactionType};

    fn row(kind: TransactionType, amount: f64, description: &str, category: Option<Category>) -> TransactionRow {
        TransactionRow {
            transaction: Transaction::new(
                kind,
                amount,
                category
                    .as_ref()
                    .map(|c| c.id.clone())
                    .unwrap_or_else(|| CategoryId::from("cat_gone")),
                description,
                NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            ),
            category,
        }
    }

    fn export(rows: &[TransactionRow]) -> String {
        let mut buffer = Vec::new();
        export_transactions_csv(rows, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_export_rows() {
        let food = Category::with_id("cat_02", "Food & Dining", "🍔", "#f59e0b", CategoryKind::Expense);
        let salary = Category::with_id("cat_08", "Salary", "💼", "#22c55e", CategoryKind::Income);
        let output = export(&[
            row(TransactionType::Expense, 85.5, "Weekly groceries", Some(food)),
            row(TransactionType::Income, 5000.0, "June salary", Some(salary)),
        ]);

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "Date,Type,Category,Description,Amount");
        assert_eq!(lines[1], "2025-06-03,Expense,Food & Dining,Weekly groceries,-85.50");
        assert_eq!(lines[2], "2025-06-03,Income,Salary,June salary,5000.00");
    }

    #[test]
    fn test_export_escapes_description() {
        let output = export(&[row(
            TransactionType::Expense,
            12.0,
            r#"Pizza, "large""#,
            None,
        )]);

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[1], r#"2025-06-03,Expense,cat_gone,"Pizza, ""large""",-12.00"#);
    }

    #[test]
    fn test_export_empty_has_header() {
        assert_eq!(export(&[]), "Date,Type,Category,Description,Amount\n");
    }

    #[test]
    fn test_export_file_name() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(export_file_name(day), "fintrack-transactions-2025-01-09.csv");
    }
}
