use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use super::model::{CellValue, RawRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Decode a tabular file into raw records.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`            – first row is the header
/// * `.xlsx` / `.xls`  – first sheet, first row is the header
///
/// Every record carries the full header key set; cells missing from a short
/// row are filled with `Empty` (the empty-string default the normalizer
/// assumes).
pub fn decode_file(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => decode_csv(path),
        "xlsx" | "xls" => decode_workbook(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV decoder
// ---------------------------------------------------------------------------

fn decode_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let rec: RawRecord = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), parse_cell(record.get(idx).unwrap_or(""))))
            .collect();
        records.push(rec);
    }

    Ok(records)
}

/// Interpret a textual CSV cell as a typed value.
fn parse_cell(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Workbook decoder
// ---------------------------------------------------------------------------

fn decode_workbook(path: &Path) -> Result<Vec<RawRecord>> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no sheets")?
        .context("reading first sheet")?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    let records = rows
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, name)| {
                    let value = row.get(idx).map(workbook_cell).unwrap_or(CellValue::Empty);
                    (name.clone(), value)
                })
                .collect()
        })
        .collect();

    Ok(records)
}

/// Map a calamine cell to a [`CellValue`]. Workbook cells arrive already
/// typed; dates and error cells fall back to their textual form.
fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(v) => CellValue::Float(*v),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::String(other.to_string()),
    }
}
