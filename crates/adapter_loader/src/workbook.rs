//! Spreadsheet trade books.
//!
//! The first worksheet is read; its first non-empty row is the header. Cells
//! follow the same column rules as delimited text.

use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use pricer_models::validation::{RawRecord, RawValue};
use tracing::debug;

use crate::error::LoaderError;
use crate::trades::{classify_columns, parse_cell};

/// File extensions opened as workbooks.
pub(crate) const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Reads the first worksheet of the workbook at `path`.
///
/// Numeric cells in identifier, currency, option type and date columns are
/// kept as text, with whole numbers written without a fractional part.
/// Date cells become `YYYY-MM-DD` text. Rows with no values are skipped.
///
/// # Errors
///
/// [`LoaderError::Io`] if the file cannot be opened,
/// [`LoaderError::Spreadsheet`] if it is not a readable workbook,
/// [`LoaderError::MissingHeader`] if the first sheet is absent or empty.
pub fn parse_workbook(path: &Path) -> Result<Vec<RawRecord>, LoaderError> {
    File::open(path).map_err(|e| LoaderError::io(path, e))?;
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook.sheet_names().first().cloned().unwrap_or_default();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoaderError::MissingHeader)??;
    debug!(sheet = %sheet, rows = range.height(), "Reading worksheet");

    let mut rows = range.rows().filter(|row| !row.iter().all(Data::is_empty));
    let headers: Vec<String> = rows
        .next()
        .ok_or(LoaderError::MissingHeader)?
        .iter()
        .map(header_name)
        .collect();
    let columns = classify_columns(headers.iter().map(String::as_str));

    Ok(rows
        .enumerate()
        .map(|(row, cells)| {
            let mut record = RawRecord::new(row);
            for ((name, numeric), cell) in headers.iter().zip(&columns).zip(cells) {
                if !name.is_empty() {
                    record.insert(name.as_str(), workbook_cell(cell, *numeric));
                }
            }
            record
        })
        .collect())
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => workbook_cell(other, false).to_string(),
    }
}

fn workbook_cell(cell: &Data, numeric: bool) -> RawValue {
    match cell {
        Data::Empty => RawValue::Missing,
        Data::Int(v) => number_cell(*v as f64, numeric),
        Data::Float(v) => number_cell(*v, numeric),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            parse_cell(s, numeric, false)
        }
        Data::Bool(b) => RawValue::Text(b.to_string()),
        Data::DateTime(_) => match cell.as_date() {
            Some(date) => RawValue::Text(date.format("%Y-%m-%d").to_string()),
            None => RawValue::Text(cell.to_string()),
        },
        Data::Error(e) => RawValue::Text(e.to_string()),
    }
}

fn number_cell(v: f64, numeric: bool) -> RawValue {
    let value = RawValue::Number(v);
    if numeric {
        value
    } else {
        RawValue::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_in_text_columns_stay_text() {
        assert_eq!(workbook_cell(&Data::Float(1001.0), false), RawValue::Text("1001".into()));
        assert_eq!(workbook_cell(&Data::Int(7), false), RawValue::Text("7".into()));
        assert_eq!(workbook_cell(&Data::Float(1.25), false), RawValue::Text("1.25".into()));
    }

    #[test]
    fn test_numeric_columns() {
        assert_eq!(workbook_cell(&Data::Float(0.1), true), RawValue::Number(0.1));
        assert_eq!(workbook_cell(&Data::Int(150), true), RawValue::Number(150.0));
        assert_eq!(
            workbook_cell(&Data::String(" 148.5 ".into()), true),
            RawValue::Number(148.5)
        );
        assert_eq!(
            workbook_cell(&Data::String("1,000".into()), true),
            RawValue::Text("1,000".into())
        );
    }

    #[test]
    fn test_empty_and_other_cells() {
        assert_eq!(workbook_cell(&Data::Empty, true), RawValue::Missing);
        assert_eq!(workbook_cell(&Data::Bool(true), true), RawValue::Text("true".into()));
        assert_eq!(header_name(&Data::String("TradeID".into())), "TradeID");
        assert_eq!(header_name(&Data::Empty), "");
    }
}
