//! Serializes transactions as the CSV file offered by the export button.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::Error;

use super::core::{Transaction, iso_date::DATE_FORMAT};

/// The header row of an exported CSV file.
pub const CSV_HEADER: [&str; 6] = ["Date", "Description", "Category", "Amount", "Type", "Status"];

/// Write `transactions` as CSV, one row per transaction in the given order.
///
/// Descriptions are wrapped in double quotes. No other quoting or escaping
/// is done, so a quote or comma inside a description or category is written
/// as-is. Rows are separated by `\n` and there is no trailing newline.
///
/// # Errors
/// Returns an [Error::CsvExport] if a row cannot be written or a date cannot be formatted.
pub fn export_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for transaction in transactions {
        let date = transaction
            .date
            .format(DATE_FORMAT)
            .map_err(|error| Error::CsvExport(error.to_string()))?;
        let description = format!("\"{}\"", transaction.description);
        let amount = transaction.amount.to_string();

        writer.write_record([
            date.as_str(),
            description.as_str(),
            transaction.category.as_str(),
            amount.as_str(),
            transaction.kind.as_str(),
            transaction.status.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvExport(error.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|error| Error::CsvExport(error.to_string()))?;

    if text.ends_with('\n') {
        text.pop();
    }

    Ok(text)
}
