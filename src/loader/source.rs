use std::collections::BTreeMap;
use std::path::Path;

use csv::StringRecord;

use crate::loader::LoadError;

/// A fully read CSV source: header positions plus every data record.
#[derive(Debug, Clone)]
pub struct CsvTable {
    file: String,
    columns: BTreeMap<String, usize>,
    records: Vec<StringRecord>,
}

impl CsvTable {
    /// Read `path` into memory. `file` is the name used in diagnostics.
    pub fn read(path: &Path, file: &str) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::MissingSource {
                path: path.to_path_buf(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let columns = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_string(), idx))
            .collect();

        let records = reader.records().collect::<Result<Vec<_>, _>>()?;

        Ok(CsvTable {
            file: file.to_string(),
            columns,
            records,
        })
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True for a source with neither a header line nor data rows.
    pub fn is_blank(&self) -> bool {
        self.columns.is_empty() && self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Fail on the first of `required` that is not a header of this table.
    pub fn require_columns(&self, required: &[&str]) -> Result<(), LoadError> {
        match self.missing_columns(required).into_iter().next() {
            Some(column) => Err(LoadError::MissingColumn {
                file: self.file.clone(),
                column,
            }),
            None => Ok(()),
        }
    }

    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = CsvRow<'_>> {
        let columns = &self.columns;
        self.records
            .iter()
            .enumerate()
            .map(move |(index, record)| CsvRow {
                index,
                columns,
                record,
            })
    }
}

/// One data row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct CsvRow<'a> {
    /// 0-based data row index; the header is not counted.
    pub index: usize,
    columns: &'a BTreeMap<String, usize>,
    record: &'a StringRecord,
}

impl<'a> CsvRow<'a> {
    /// Cell value, or `None` when the column is absent or the cell is blank.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = *self.columns.get(column)?;
        self.record.get(idx).filter(|v| !v.trim().is_empty())
    }
}
