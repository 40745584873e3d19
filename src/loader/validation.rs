//! Per-field row checking.
//!
//! Every record type declares its fields through [`CsvRecord::read`], which
//! pulls values out of a [`FieldReader`]. The reader never stops at the first
//! bad field: it records a [`FieldViolation`] and keeps going, so one row
//! always reports all of its problems at once. Whether a whole source stops at
//! the first bad row or collects all of them is the caller's choice.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::loader::source::CsvRow;
use crate::types::records::{
    Contact, Education, ExperienceRow, Patent, Publication, SkillRow, SummaryRow,
    DEFAULT_SKILL_ICON,
};

/// How optional integer columns with unparseable values are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Ordinary loads: fall back to the default and log a warning.
    Lenient,
    /// Validation pass: report the value as a violation.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    NotAnInteger { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{}: field required", self.field),
            ViolationKind::NotAnInteger { value } => {
                write!(f, "{}: expected an integer, got {value:?}", self.field)
            }
        }
    }
}

/// All field violations of a single data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowViolation {
    /// 0-based data row index.
    pub row: usize,
    pub fields: Vec<FieldViolation>,
}

impl fmt::Display for RowViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: ", self.row)?;
        for (i, v) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Parse an integer cell. Accepts `"3"` and the float spelling `"3.0"`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

pub struct FieldReader<'a> {
    row: CsvRow<'a>,
    file: &'a str,
    coercion: Coercion,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    pub fn new(row: CsvRow<'a>, file: &'a str, coercion: Coercion) -> Self {
        Self {
            row,
            file,
            coercion,
            violations: Vec::new(),
        }
    }

    fn violation(&mut self, field: &str, kind: ViolationKind) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            kind,
        });
    }

    pub fn required_text(&mut self, field: &str) -> String {
        match self.row.get(field) {
            Some(v) => v.to_string(),
            None => {
                self.violation(field, ViolationKind::Missing);
                String::new()
            }
        }
    }

    pub fn text_or(&mut self, field: &str, default: &str) -> String {
        self.row.get(field).unwrap_or(default).to_string()
    }

    pub fn required_int(&mut self, field: &str) -> i64 {
        let Some(raw) = self.row.get(field) else {
            self.violation(field, ViolationKind::Missing);
            return 0;
        };
        match parse_int(raw) {
            Some(n) => n,
            None => {
                self.violation(
                    field,
                    ViolationKind::NotAnInteger {
                        value: raw.to_string(),
                    },
                );
                0
            }
        }
    }

    /// Optional integer column; blank or absent cells become 0.
    pub fn int_or_zero(&mut self, field: &str) -> i64 {
        let Some(raw) = self.row.get(field) else {
            return 0;
        };
        if let Some(n) = parse_int(raw) {
            return n;
        }
        match self.coercion {
            Coercion::Strict => self.violation(
                field,
                ViolationKind::NotAnInteger {
                    value: raw.to_string(),
                },
            ),
            Coercion::Lenient => warn!(
                file = self.file,
                row = self.row.index,
                field,
                value = raw,
                "non-integer value coerced to 0"
            ),
        }
        0
    }

    pub fn finish<T>(self, value: T) -> Result<T, RowViolation> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(RowViolation {
                row: self.row.index,
                fields: self.violations,
            })
        }
    }
}

/// A record type read from one CSV source.
pub trait CsvRecord: Sized {
    /// File name of the source inside the data directory.
    const SOURCE: &'static str;
    /// Columns that must be present in the header.
    const REQUIRED_COLUMNS: &'static [&'static str];

    fn read(fields: &mut FieldReader<'_>) -> Self;
}

/// Build one record from `row`, collecting every field violation.
pub fn parse_row<T: CsvRecord>(row: CsvRow<'_>, coercion: Coercion) -> Result<T, RowViolation> {
    let mut fields = FieldReader::new(row, T::SOURCE, coercion);
    let value = T::read(&mut fields);
    fields.finish(value)
}

impl CsvRecord for Contact {
    const SOURCE: &'static str = "contact.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["name", "email", "phone", "linkedin", "scholar"];

    fn read(f: &mut FieldReader<'_>) -> Self {
        Contact {
            name: f.required_text("name"),
            email: f.required_text("email"),
            phone: f.required_text("phone"),
            linkedin: f.required_text("linkedin"),
            scholar: f.required_text("scholar"),
            location: f.text_or("location", ""),
            website: f.text_or("website", ""),
            github: f.text_or("github", ""),
        }
    }
}

impl CsvRecord for SummaryRow {
    const SOURCE: &'static str = "summary.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["variant", "text"];

    fn read(f: &mut FieldReader<'_>) -> Self {
        SummaryRow {
            variant: f.required_text("variant"),
            text: f.text_or("text", ""),
        }
    }
}

impl CsvRecord for ExperienceRow {
    const SOURCE: &'static str = "experiences.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "company",
        "location",
        "position",
        "period",
        "achievement_text",
    ];

    fn read(f: &mut FieldReader<'_>) -> Self {
        ExperienceRow {
            company: f.required_text("company"),
            location: f.required_text("location"),
            position: f.required_text("position"),
            period: f.required_text("period"),
            achievement_group: f.text_or("achievement_group", ""),
            achievement_text: f.required_text("achievement_text"),
            papers: f.int_or_zero("papers"),
            patents: f.int_or_zero("patents"),
            tags: f.text_or("tags", ""),
            weight: f.int_or_zero("weight"),
        }
    }
}

impl CsvRecord for SkillRow {
    const SOURCE: &'static str = "skills.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["category", "skill"];

    fn read(f: &mut FieldReader<'_>) -> Self {
        SkillRow {
            category: f.required_text("category"),
            skill: f.required_text("skill"),
            tags: f.text_or("tags", ""),
            icon: f.text_or("icon", DEFAULT_SKILL_ICON),
            weight: f.int_or_zero("weight"),
        }
    }
}

impl CsvRecord for Education {
    const SOURCE: &'static str = "education.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["institution", "location", "degree", "period"];

    fn read(f: &mut FieldReader<'_>) -> Self {
        Education {
            institution: f.required_text("institution"),
            location: f.required_text("location"),
            degree: f.required_text("degree"),
            period: f.required_text("period"),
            description: f.text_or("description", ""),
            tags: f.text_or("tags", ""),
        }
    }
}

impl CsvRecord for Patent {
    const SOURCE: &'static str = "patents.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["authors", "title", "reference", "url", "year"];

    fn read(f: &mut FieldReader<'_>) -> Self {
        Patent {
            authors: f.required_text("authors"),
            title: f.required_text("title"),
            reference: f.required_text("reference"),
            url: f.required_text("url"),
            year: f.required_int("year"),
            tags: f.text_or("tags", ""),
            weight: f.int_or_zero("weight"),
        }
    }
}

impl CsvRecord for Publication {
    const SOURCE: &'static str = "publications.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["authors", "title", "venue", "year", "url"];

    fn read(f: &mut FieldReader<'_>) -> Self {
        Publication {
            authors: f.required_text("authors"),
            title: f.required_text("title"),
            venue: f.required_text("venue"),
            year: f.required_int("year"),
            url: f.required_text("url"),
            tags: f.text_or("tags", ""),
            weight: f.int_or_zero("weight"),
        }
    }
}

/// Outcome of checking one source during [`crate::loader::CvDataLoader::validate_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceCheck {
    Ok { rows: usize },
    Failed { issues: Vec<String> },
}

/// Result of the exhaustive validation pass, one entry per source in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub sources: Vec<(String, SourceCheck)>,
}

impl ValidationReport {
    pub fn push(&mut self, file: &str, check: SourceCheck) {
        self.sources.push((file.to_string(), check));
    }

    pub fn is_ok(&self) -> bool {
        self.failed_sources().next().is_none()
    }

    /// Sources with at least one issue.
    pub fn failed_sources(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sources.iter().filter_map(|(file, check)| match check {
            SourceCheck::Failed { issues } => Some((file.as_str(), issues.as_slice())),
            SourceCheck::Ok { .. } => None,
        })
    }

    pub fn issue_count(&self) -> usize {
        self.failed_sources().map(|(_, issues)| issues.len()).sum()
    }

    pub fn get(&self, file: &str) -> Option<&SourceCheck> {
        self.sources
            .iter()
            .find(|(f, _)| f == file)
            .map(|(_, check)| check)
    }
}
