//! Trade book loading.
//!
//! A book is a `.json` file holding an array of objects, a spreadsheet
//! workbook, or delimited text with a header row. Column names are kept as they appear in the file;
//! the gatekeeper resolves canonical names and spreadsheet aliases.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use pricer_models::validation::{RawRecord, RawValue, TradeField};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::LoaderError;
use crate::workbook::{parse_workbook, WORKBOOK_EXTENSIONS};

/// Loads a trade book from `path`.
///
/// The extension (any case) picks the reader: `.json` is read as JSON,
/// `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods` as a workbook, anything else
/// as delimited text.
///
/// # Errors
///
/// Returns [`LoaderError`] if the file cannot be read or its structure is
/// malformed. Invalid values inside well-formed rows are not errors.
pub fn load_trades(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, LoaderError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let records = if extension == "json" {
        parse_json(&read_text(path)?)?
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        parse_workbook(path)?
    } else {
        parse_delimited(&read_text(path)?)?
    };

    info!(path = %path.display(), rows = records.len(), "Loaded trade book");
    Ok(records)
}

fn read_text(path: &Path) -> Result<String, LoaderError> {
    let text = fs::read_to_string(path).map_err(|e| LoaderError::io(path, e))?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Picks the delimiter from a header line.
///
/// Tab wins if present, then semicolon when the line has no commas,
/// otherwise comma.
///
/// # Examples
/// ```
/// use adapter_loader::detect_delimiter;
///
/// assert_eq!(detect_delimiter("TradeID\tSpot"), b'\t');
/// assert_eq!(detect_delimiter("TradeID;Spot"), b';');
/// assert_eq!(detect_delimiter("TradeID,Spot;x"), b',');
/// ```
pub fn detect_delimiter(header: &str) -> u8 {
    if header.contains('\t') {
        b'\t'
    } else if header.contains(';') && !header.contains(',') {
        b';'
    } else {
        b','
    }
}

/// Parses delimited text with a header row.
///
/// Empty cells become [`RawValue::Missing`]. Cells in numeric or unknown
/// columns that parse as numbers become [`RawValue::Number`]; identifier,
/// currency, option type and date columns always stay text so that values
/// such as `007` keep their exact spelling. In tab-separated input, thousands
/// separators inside numbers are dropped (`1,000,000` reads as `1000000`).
///
/// # Errors
///
/// [`LoaderError::MissingHeader`] for blank input, [`LoaderError::Csv`] for
/// ragged rows or bad quoting.
pub fn parse_delimited(text: &str) -> Result<Vec<RawRecord>, LoaderError> {
    let header_line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or(LoaderError::MissingHeader)?;
    let delimiter = detect_delimiter(header_line);
    debug!(delimiter = %char::from(delimiter).escape_default(), "Detected delimiter");

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = classify_columns(headers.iter());
    let strip_thousands = delimiter == b'\t';

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let row_data = result?;
        let mut record = RawRecord::new(row);
        for ((name, numeric), cell) in headers.iter().zip(&columns).zip(row_data.iter()) {
            record.insert(name, parse_cell(cell, *numeric, strip_thousands));
        }
        records.push(record);
    }
    Ok(records)
}

/// Whether each column may hold numeric cells.
pub(crate) fn classify_columns<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<bool> {
    headers
        .map(|name| match TradeField::from_header(name) {
            Some(field) => TradeField::NUMERIC.contains(&field),
            None => true,
        })
        .collect()
}

pub(crate) fn parse_cell(cell: &str, numeric: bool, strip_thousands: bool) -> RawValue {
    let cell = cell.trim();
    if cell.is_empty() {
        return RawValue::Missing;
    }
    if numeric {
        let candidate: Cow<'_, str> = if strip_thousands && cell.contains(',') {
            Cow::Owned(cell.replace(',', ""))
        } else {
            Cow::Borrowed(cell)
        };
        if let Ok(v) = candidate.parse::<f64>() {
            return RawValue::Number(v);
        }
    }
    RawValue::Text(cell.to_string())
}

/// Parses a JSON array of objects.
///
/// Numbers map to [`RawValue::Number`], strings to [`RawValue::Text`], `null`
/// to [`RawValue::Missing`]. Booleans and nested values are kept as their
/// JSON text and left to the gatekeeper.
///
/// # Errors
///
/// [`LoaderError::Json`] if the text does not parse,
/// [`LoaderError::UnexpectedShape`] if it is not an array of objects.
pub fn parse_json(text: &str) -> Result<Vec<RawRecord>, LoaderError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(LoaderError::UnexpectedShape(describe(&other).to_string())),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(row, item)| match item {
            Value::Object(map) => {
                let mut record = RawRecord::new(row);
                for (name, value) in map {
                    record.insert(name, json_cell(value));
                }
                Ok(record)
            }
            other => Err(LoaderError::UnexpectedShape(format!(
                "{} at index {}",
                describe(&other),
                row
            ))),
        })
        .collect()
}

fn json_cell(value: Value) -> RawValue {
    match value {
        Value::Null => RawValue::Missing,
        Value::Number(n) => n.as_f64().map_or(RawValue::Missing, RawValue::Number),
        Value::String(s) => RawValue::Text(s),
        other => RawValue::Text(other.to_string()),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
