//! Static benchmark tables used whenever the warehouse cannot answer.
//!
//! Values are illustrative market figures, not survey data.

use std::collections::HashMap;

use crate::benchmark::{GenderBenchmark, GenderSlice, RoleBenchmark, SalaryRange};

const ROLE_AVERAGES: &[(&str, i64)] = &[
    ("software engineer", 128_000),
    ("data analyst", 85_000),
    ("data scientist", 120_000),
    ("product manager", 135_000),
    ("ux designer", 95_000),
    ("marketing manager", 88_000),
    ("financial analyst", 78_000),
    ("project manager", 92_000),
    ("devops engineer", 130_000),
    ("machine learning engineer", 140_000),
];

// (male average, female average)
const GENDERED_AVERAGES: &[(&str, i64, i64)] = &[
    ("software engineer", 134_000, 121_000),
    ("data analyst", 88_000, 81_000),
    ("data scientist", 126_000, 113_000),
    ("product manager", 142_000, 127_000),
    ("ux designer", 98_000, 91_000),
    ("marketing manager", 94_000, 83_000),
    ("financial analyst", 82_000, 74_000),
    ("project manager", 97_000, 87_000),
    ("devops engineer", 135_000, 122_000),
    ("machine learning engineer", 147_000, 131_000),
];

/// Immutable role→benchmark tables plus the defaults used for unknown roles.
#[derive(Debug, Clone)]
pub struct BenchmarkTables {
    pub averages: HashMap<String, i64>,
    pub gendered: HashMap<String, (i64, i64)>,
    pub default_average: i64,
    pub default_gendered: (i64, i64),
    /// Fallback ranges are derived as `avg × range_low` .. `avg × range_high`.
    pub range_low: f64,
    pub range_high: f64,
    pub sample_size: i64,
    pub gender_sample_size: i64,
}

impl Default for BenchmarkTables {
    fn default() -> Self {
        Self {
            averages: ROLE_AVERAGES
                .iter()
                .map(|(role, avg)| (role.to_string(), *avg))
                .collect(),
            gendered: GENDERED_AVERAGES
                .iter()
                .map(|(role, m, f)| (role.to_string(), (*m, *f)))
                .collect(),
            default_average: 90_000,
            default_gendered: (95_000, 86_000),
            range_low: 0.8,
            range_high: 1.25,
            sample_size: 150,
            gender_sample_size: 75,
        }
    }
}

impl BenchmarkTables {
    /// Table benchmark for a normalized role key; unknown roles get the default average.
    pub fn benchmark(&self, key: &str, role: &str) -> RoleBenchmark {
        let average = self
            .averages
            .get(key)
            .copied()
            .unwrap_or(self.default_average);
        RoleBenchmark {
            role: role.to_string(),
            average,
            range: self.range_around(average),
            sample_size: self.sample_size,
        }
    }

    /// Gendered benchmark for a known role, `None` when the table has no entry.
    pub fn known_gender_benchmark(&self, key: &str, role: &str) -> Option<GenderBenchmark> {
        self.gendered
            .get(key)
            .map(|&(male, female)| self.gender_benchmark_from(role, male, female))
    }

    /// Gendered benchmark with the documented default for unknown roles.
    pub fn gender_benchmark(&self, key: &str, role: &str) -> GenderBenchmark {
        self.known_gender_benchmark(key, role).unwrap_or_else(|| {
            let (male, female) = self.default_gendered;
            self.gender_benchmark_from(role, male, female)
        })
    }

    fn gender_benchmark_from(&self, role: &str, male: i64, female: i64) -> GenderBenchmark {
        GenderBenchmark::new(role, self.slice(male), self.slice(female))
    }

    fn slice(&self, avg: i64) -> GenderSlice {
        GenderSlice {
            avg,
            count: self.gender_sample_size,
            range: self.range_around(avg),
        }
    }

    fn range_around(&self, average: i64) -> SalaryRange {
        SalaryRange {
            min: (average as f64 * self.range_low) as i64,
            max: (average as f64 * self.range_high) as i64,
        }
    }
}
