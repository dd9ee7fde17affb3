//! Spreadsheet assembly
//!
//! The first appended record fixes the column set and order for the whole run.
//! Later records are written positionally against that header: fields it lacks
//! become empty cells and fields the header lacks are dropped.

use crate::error::Result;
use crate::types::Record;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Accumulates records into rows under a canonical header
///
/// Single owner: apply outcomes after the fetch phase has joined.
#[derive(Debug, Default)]
pub struct TableBuilder {
    header: Option<Vec<String>>,
    rows: Vec<Vec<Value>>,
}

impl TableBuilder {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record as a row
    ///
    /// The first call commits the record's field order as the header.
    pub fn append(&mut self, record: &Record) {
        let header = self
            .header
            .get_or_insert_with(|| record.keys().map(str::to_string).collect());

        let row: Vec<Value> = header
            .iter()
            .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
            .collect();

        let dropped = record
            .keys()
            .filter(|key| !header.iter().any(|column| column == key))
            .count();
        if dropped > 0 {
            tracing::debug!(
                roll_number = %record.identifier(),
                dropped,
                "Fields outside the header were dropped"
            );
        }

        self.rows.push(row);
        tracing::debug!(roll_number = %record.identifier(), row = self.rows.len(), "Wrote row");
    }

    /// Canonical header, once a record has been appended
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Data rows, excluding the header
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows have been appended
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as an `.xlsx` workbook with one sheet
    ///
    /// Consumes the builder. A table with no rows produces an empty sheet.
    pub fn finalize(self, path: &Path, sheet_name: &str) -> Result<PathBuf> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        if let Some(header) = &self.header {
            for (col, name) in header.iter().enumerate() {
                worksheet.write_string(0, col_index(col), name.as_str())?;
            }
        }

        for (i, row) in self.rows.iter().enumerate() {
            let row_num = u32::try_from(i + 1).unwrap_or(u32::MAX);
            for (col, value) in row.iter().enumerate() {
                write_cell(worksheet, row_num, col_index(col), value)?;
            }
        }

        workbook.save(path)?;
        tracing::info!(path = %path.display(), rows = self.rows.len(), "Spreadsheet saved");
        Ok(path.to_path_buf())
    }
}

/// Out-of-range indices are left for the writer to reject
fn col_index(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}

/// Write one JSON value into a typed cell; null stays empty
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
) -> std::result::Result<(), XlsxError> {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) => {
                worksheet.write_number(row, col, f)?;
            }
            None => {
                worksheet.write_string(row, col, n.to_string())?;
            }
        },
        Value::String(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        other => {
            worksheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}
