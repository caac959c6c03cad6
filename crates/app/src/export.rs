use std::io::Write;

use api_types::expense::Expense;
use csv::WriterBuilder;
use engine::MoneyCents;
use serde::Serialize;

use crate::error::Result;

const HEADER: [&str; 4] = ["Date", "Description", "Category", "Amount"];

#[derive(Serialize)]
struct ExportRow<'a> {
    date: String,
    description: &'a str,
    category: &'a str,
    amount: String,
}

/// Writes `Date,Description,Category,Amount` rows in input order. Dates are
/// ISO `YYYY-MM-DD`, amounts plain decimals. An empty list still gets the
/// header row.
pub fn write_expenses_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(HEADER)?;
    for expense in expenses {
        writer.serialize(ExportRow {
            date: expense.date.to_string(),
            description: &expense.description,
            category: &expense.category,
            amount: MoneyCents::new(expense.amount_minor).to_string(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn expenses_to_csv_string(expenses: &[Expense]) -> Result<String> {
    let mut data = Vec::new();
    write_expenses_csv(&mut data, expenses)?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}
