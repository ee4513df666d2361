//! CSV tabular source.

use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use serde_json::{Number, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::models::{Attributes, Table};

/// Load a CSV table with a header row; `.gz` files are decompressed
pub fn read_table(path: &Path) -> Result<Table> {
    info!("Loading table from {}", path.display());

    let file = File::open(path)?;
    let reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let table = read_table_from_reader(reader)?;
    info!("Loaded {} rows", table.len());
    Ok(table)
}

/// Parse CSV from any reader.
///
/// Integer and finite float cells become numbers, empty cells become
/// `null`, anything else is kept as text.
pub fn read_table_from_reader<R: Read>(reader: R) -> Result<Table> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut table = Table::new(headers.iter());

    for result in csv_reader.records() {
        let record = result?;
        let mut row = Attributes::new();
        for (column, cell) in headers.iter().zip(record.iter()) {
            row.insert(column.to_string(), parse_cell(cell));
        }
        table.push_row(row);
    }

    Ok(table)
}

fn parse_cell(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Some(n) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(trimmed.to_string())
}
