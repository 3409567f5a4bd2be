//! Market salary benchmarks: aggregate and gender-disaggregated, each resolved
//! from the salary warehouse with a static table behind it.

pub mod resolver;
pub mod tables;
pub mod warehouse;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalaryRange {
    pub min: i64,
    pub max: i64,
}

/// Aggregate market benchmark for one role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleBenchmark {
    pub role: String,
    pub average: i64,
    pub range: SalaryRange,
    pub sample_size: i64,
}

/// Statistics for one gender within a role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenderSlice {
    pub avg: i64,
    pub count: i64,
    pub range: SalaryRange,
}

/// Male/female benchmark for one role.
///
/// `gap` is signed: a negative gap means women out-earn men for the role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderBenchmark {
    pub role: String,
    pub male: GenderSlice,
    pub female: GenderSlice,
    pub gap: i64,
    pub gap_percent: f64,
}

impl GenderBenchmark {
    pub fn new(role: impl Into<String>, male: GenderSlice, female: GenderSlice) -> Self {
        let gap = male.avg - female.avg;
        let gap_percent = if male.avg > 0 {
            round_to_tenth(gap as f64 / male.avg as f64 * 100.0)
        } else {
            0.0
        };
        Self {
            role: role.into(),
            male,
            female,
            gap,
            gap_percent,
        }
    }
}

/// Trims and case-folds a role so live and table lookups share one key.
pub fn normalize_role(role: &str) -> String {
    role.trim().to_lowercase()
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
