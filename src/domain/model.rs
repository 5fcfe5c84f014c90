use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One normalized assignment row: an employee worked on a project over an
/// inclusive date range. `start <= end` is not enforced; inverted ranges
/// simply never overlap anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPeriod {
    pub employee_id: u32,
    pub project_id: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WorkPeriod {
    pub fn new(employee_id: u32, project_id: u32, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            employee_id,
            project_id,
            start,
            end,
        }
    }
}

/// Unordered pair of two distinct employee ids, stored canonically with the
/// smaller id first so that (a, b) and (b, a) hash and compare as the same
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmployeePair {
    low: u32,
    high: u32,
}

impl EmployeePair {
    pub fn new(a: u32, b: u32) -> Self {
        debug_assert_ne!(a, b, "pairs are only formed across distinct employees");
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }
}

/// One row of the report listing. `employee_a < employee_b` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDuration {
    pub employee_a: u32,
    pub employee_b: u32,
    pub total_days: i64,
}

impl PairDuration {
    pub fn from_entry(pair: EmployeePair, total_days: i64) -> Self {
        Self {
            employee_a: pair.low(),
            employee_b: pair.high(),
            total_days,
        }
    }
}

/// Output of the transform stage: the raw pair-duration map plus the
/// presentation-ready views derived from it.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub pair_durations: HashMap<EmployeePair, i64>,
    pub ranked: Vec<PairDuration>,
    pub longest: Option<PairDuration>,
    pub records_analyzed: usize,
    pub csv_output: String,
}

/// Shape of report.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub longest: Option<PairDuration>,
    pub pairs: Vec<PairDuration>,
    pub records_analyzed: usize,
}
