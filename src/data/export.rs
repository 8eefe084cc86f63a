use std::path::Path;

use anyhow::{Context, Result};

use super::model::AugmentedRow;

/// Name of the appended prediction column in exports.
pub const PREDICTION_COLUMN: &str = "prediction";

// ---------------------------------------------------------------------------
// Export adapter: augmented rows → flat records for a tabular serializer
// ---------------------------------------------------------------------------

/// Export column order: the original columns in their canonical order,
/// `prediction` last.
pub fn export_header(columns: &[String]) -> Vec<String> {
    let mut header: Vec<String> = columns.to_vec();
    header.push(PREDICTION_COLUMN.to_string());
    header
}

/// Flatten augmented rows to string records in header order. Values keep
/// their plain textual form; display-only formatting stays in the UI.
pub fn export_records(rows: &[AugmentedRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            let mut record: Vec<String> = row.values.iter().map(|v| v.to_string()).collect();
            record.push(row.prediction.to_string());
            record
        })
        .collect()
}

/// Derive the export file name from the uploaded file's base name.
pub fn export_file_name(original: &str) -> String {
    let base = original.split('.').next().unwrap_or(original);
    format!("predictions_{base}.csv")
}

/// Serialize augmented rows to a CSV file.
pub fn write_csv(path: &Path, columns: &[String], rows: &[AugmentedRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating export file")?;
    writer
        .write_record(export_header(columns))
        .context("writing export header")?;
    for record in export_records(rows) {
        writer.write_record(&record).context("writing export row")?;
    }
    writer.flush().context("flushing export file")?;
    Ok(())
}
