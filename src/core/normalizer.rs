//! Record normalizer: raw CSV rows into typed [`WorkPeriod`] records.
//!
//! Bad rows are logged and skipped so one typo does not abort the run;
//! an unreadable file is the caller's (fatal) problem.

use crate::domain::model::WorkPeriod;
use crate::utils::error::{AnalyzerError, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

/// Accepted date layouts, tried in order; first match wins. Keeping
/// `%m/%d/%Y` ahead of `%d/%m/%Y` means ambiguous slash dates read as
/// month-first.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Parse a date string against the supported layouts.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }

    Err(AnalyzerError::DateParseError {
        value: value.to_string(),
    })
}

pub struct Normalizer {
    as_of: NaiveDate,
}

impl Normalizer {
    /// `as_of` resolves open-ended periods (DateTo of NULL or empty).
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    /// Normalize a whole CSV document. Expected columns:
    /// `EmpID, ProjectID, DateFrom, DateTo`.
    ///
    /// A leading header row is detected the same way the data rows are
    /// read: if the first field of the first row is not an integer, the
    /// row is treated as a header and skipped.
    pub fn normalize_csv(&self, data: &[u8]) -> Result<Vec<WorkPeriod>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(data);

        let mut periods = Vec::new();
        let mut skipped = 0usize;

        for (index, row) in reader.records().enumerate() {
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Skipping unreadable row {}: {}", index + 1, e);
                    skipped += 1;
                    continue;
                }
            };

            if index == 0 && looks_like_header(&record) {
                tracing::debug!("Skipping header row: {:?}", record);
                continue;
            }

            match self.normalize_record(&record) {
                Ok(period) => periods.push(period),
                Err(e) => {
                    tracing::warn!("Skipping row {}: {}", index + 1, e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("⚠️ Skipped {} malformed row(s)", skipped);
        }
        tracing::debug!("Normalized {} work period(s)", periods.len());

        Ok(periods)
    }

    fn normalize_record(&self, record: &StringRecord) -> Result<WorkPeriod> {
        if record.len() < 4 {
            return Err(AnalyzerError::RecordError {
                message: format!("expected at least 4 fields, got {}", record.len()),
            });
        }

        let employee_id = parse_id("EmpID", &record[0])?;
        let project_id = parse_id("ProjectID", &record[1])?;
        let start = parse_date(&record[2])?;

        let end_field = &record[3];
        let end = if end_field.is_empty() || end_field.eq_ignore_ascii_case("null") {
            self.as_of
        } else {
            parse_date(end_field)?
        };

        Ok(WorkPeriod::new(employee_id, project_id, start, end))
    }
}

fn parse_id(field: &str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|_| AnalyzerError::RecordError {
        message: format!("invalid {}: '{}'", field, value),
    })
}

fn looks_like_header(record: &StringRecord) -> bool {
    record
        .get(0)
        .map(|field| field.parse::<u32>().is_err())
        .unwrap_or(false)
}
