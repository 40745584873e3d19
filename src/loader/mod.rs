pub mod source;
pub mod validation;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::types::records::{
    Contact, Education, ExperienceRow, Patent, Publication, SkillRow, SummaryRow,
};
pub use source::{CsvRow, CsvTable};
pub use validation::{
    parse_row, Coercion, CsvRecord, FieldViolation, RowViolation, SourceCheck,
    ValidationReport, ViolationKind,
};

/// Summary variant used when the requested one is absent.
pub const DEFAULT_SUMMARY_VARIANT: &str = "default";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Data directory not found: {0}")]
    DataDirNotFound(PathBuf),
    #[error("CSV file not found: {path}")]
    MissingSource { path: PathBuf },
    #[error("{file} is empty")]
    EmptySource { file: String },
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },
    #[error("{file}: {violation}")]
    MalformedRow { file: String, violation: RowViolation },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads the CSV sources of one data directory into typed records.
///
/// Ordinary loads fail on the first structural problem or malformed row.
/// [`CvDataLoader::validate_all`] instead scans everything and reports all
/// problems without stopping.
#[derive(Debug, Clone)]
pub struct CvDataLoader {
    data_dir: PathBuf,
}

impl CvDataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let data_dir = data_dir.into();
        if !data_dir.is_dir() {
            return Err(LoadError::DataDirNotFound(data_dir));
        }
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn source_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn table<T: CsvRecord>(&self) -> Result<CsvTable, LoadError> {
        let table = CsvTable::read(&self.source_path(T::SOURCE), T::SOURCE)?;
        table.require_columns(T::REQUIRED_COLUMNS)?;
        Ok(table)
    }

    fn load_rows<T: CsvRecord>(&self) -> Result<Vec<T>, LoadError> {
        let table = self.table::<T>()?;
        let rows = table
            .rows()
            .map(|row| {
                parse_row::<T>(row, Coercion::Lenient).map_err(|violation| {
                    LoadError::MalformedRow {
                        file: T::SOURCE.to_string(),
                        violation,
                    }
                })
            })
            .collect::<Result<Vec<T>, LoadError>>()?;

        debug!(source = T::SOURCE, rows = rows.len(), "loaded source");
        Ok(rows)
    }

    fn empty_contact() -> LoadError {
        LoadError::EmptySource {
            file: Contact::SOURCE.to_string(),
        }
    }

    /// Contact information from the first row of `contact.csv`.
    ///
    /// A zero-byte file counts as empty, not as one missing every column.
    pub fn load_contact(&self) -> Result<Contact, LoadError> {
        let table = CsvTable::read(&self.source_path(Contact::SOURCE), Contact::SOURCE)?;
        if table.is_blank() {
            return Err(Self::empty_contact());
        }
        table.require_columns(Contact::REQUIRED_COLUMNS)?;

        let row = table.rows().next().ok_or_else(Self::empty_contact)?;
        parse_row::<Contact>(row, Coercion::Lenient).map_err(|violation| LoadError::MalformedRow {
            file: Contact::SOURCE.to_string(),
            violation,
        })
    }

    /// Summary text for `variant`, falling back to the default variant.
    ///
    /// `summary.csv` is optional: a missing file yields an empty summary.
    pub fn load_summary(&self, variant: &str) -> Result<String, LoadError> {
        let rows = match self.load_rows::<SummaryRow>() {
            Ok(rows) => rows,
            Err(LoadError::MissingSource { .. }) => return Ok(String::new()),
            Err(e) => return Err(e),
        };

        // Later rows override earlier ones with the same variant.
        let lookup = |wanted: &str| {
            rows.iter()
                .rev()
                .find(|r| r.variant == wanted)
                .map(|r| r.text.clone())
        };

        Ok(lookup(variant)
            .or_else(|| lookup(DEFAULT_SUMMARY_VARIANT))
            .unwrap_or_default())
    }

    pub fn load_experiences(&self) -> Result<Vec<ExperienceRow>, LoadError> {
        self.load_rows()
    }

    pub fn load_skills(&self) -> Result<Vec<SkillRow>, LoadError> {
        self.load_rows()
    }

    /// Education entries. These are never tag-filtered.
    pub fn load_education(&self) -> Result<Vec<Education>, LoadError> {
        self.load_rows()
    }

    pub fn load_patents(&self) -> Result<Vec<Patent>, LoadError> {
        self.load_rows()
    }

    pub fn load_publications(&self) -> Result<Vec<Publication>, LoadError> {
        self.load_rows()
    }

    /// Check every required source and collect all problems.
    ///
    /// Never stops early: a missing file or column is recorded for its source
    /// and the scan moves on; within a source every malformed row is reported.
    pub fn validate_all(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        report.push(Contact::SOURCE, self.check_contact());
        report.push(ExperienceRow::SOURCE, self.check_source::<ExperienceRow>());
        report.push(SkillRow::SOURCE, self.check_source::<SkillRow>());
        report.push(Education::SOURCE, self.check_source::<Education>());
        report.push(Patent::SOURCE, self.check_source::<Patent>());
        report.push(Publication::SOURCE, self.check_source::<Publication>());

        debug!(issues = report.issue_count(), "validation finished");
        report
    }

    fn check_read<T: CsvRecord>(&self) -> Result<CsvTable, SourceCheck> {
        CsvTable::read(&self.source_path(T::SOURCE), T::SOURCE).map_err(|e| SourceCheck::Failed {
            issues: vec![e.to_string()],
        })
    }

    fn check_columns<T: CsvRecord>(table: &CsvTable) -> Result<(), SourceCheck> {
        let missing = table.missing_columns(T::REQUIRED_COLUMNS);
        if missing.is_empty() {
            return Ok(());
        }
        let issues = missing
            .into_iter()
            .map(|column| {
                LoadError::MissingColumn {
                    file: T::SOURCE.to_string(),
                    column,
                }
                .to_string()
            })
            .collect();
        Err(SourceCheck::Failed { issues })
    }

    fn check_source<T: CsvRecord>(&self) -> SourceCheck {
        let table = match self.check_read::<T>() {
            Ok(table) => table,
            Err(check) => return check,
        };
        if let Err(check) = Self::check_columns::<T>(&table) {
            return check;
        }

        let issues: Vec<String> = table
            .rows()
            .filter_map(|row| parse_row::<T>(row, Coercion::Strict).err())
            .map(|violation| violation.to_string())
            .collect();

        if issues.is_empty() {
            SourceCheck::Ok { rows: table.len() }
        } else {
            SourceCheck::Failed { issues }
        }
    }

    fn check_contact(&self) -> SourceCheck {
        let empty = || SourceCheck::Failed {
            issues: vec![Self::empty_contact().to_string()],
        };

        let table = match self.check_read::<Contact>() {
            Ok(table) if table.is_blank() => return empty(),
            Ok(table) => table,
            Err(check) => return check,
        };
        if let Err(check) = Self::check_columns::<Contact>(&table) {
            return check;
        }

        let Some(row) = table.rows().next() else {
            return empty();
        };

        match parse_row::<Contact>(row, Coercion::Strict) {
            Ok(_) => SourceCheck::Ok { rows: table.len() },
            Err(violation) => SourceCheck::Failed {
                issues: vec![violation.to_string()],
            },
        }
    }
}
