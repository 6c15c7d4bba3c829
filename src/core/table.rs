use crate::domain::model::{Record, Table};
use crate::utils::error::{AnnotateError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses comma-separated bytes with a header row into a [`Table`].
///
/// Rows shorter than the header are accepted and padded with empty cells.
/// Fails with `SchemaError` when `ID` or `Image Src` is missing, with
/// `RowLengthError` when a row has more fields than the header, and with
/// `CsvError` on invalid UTF-8.
pub fn parse_csv(data: &[u8]) -> Result<Table> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(AnnotateError::RowLengthError {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: headers.len(),
                found: record.len(),
            });
        }
        rows.push(Record {
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    tracing::debug!("Parsed {} rows with {} columns", rows.len(), headers.len());
    Table::new(headers, rows)
}

/// Serializes the table, headers first, rows in their original order.
pub fn write_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(&row.fields)?;
    }

    writer
        .into_inner()
        .map_err(|e| AnnotateError::IoError(e.into_error()))
}
