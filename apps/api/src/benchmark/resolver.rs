use std::sync::Arc;
use std::time::Duration;

use crate::benchmark::tables::BenchmarkTables;
use crate::benchmark::warehouse::SalaryWarehouse;
use crate::benchmark::{
    normalize_role, GenderBenchmark, GenderSlice, RoleBenchmark, SalaryRange,
};
use crate::errors::SourceError;
use crate::models::salary::{GenderAggregateRow, RoleAggregateRow};
use crate::resolution::{resolve, Resolved};

const SOURCE: &str = "salary warehouse";

/// Role → aggregate market benchmark. Always produces a value.
#[derive(Clone)]
pub struct BenchmarkResolver {
    warehouse: Option<Arc<dyn SalaryWarehouse>>,
    tables: Arc<BenchmarkTables>,
    timeout: Duration,
}

impl BenchmarkResolver {
    pub fn new(
        warehouse: Option<Arc<dyn SalaryWarehouse>>,
        tables: Arc<BenchmarkTables>,
        timeout: Duration,
    ) -> Self {
        Self {
            warehouse,
            tables,
            timeout,
        }
    }

    pub async fn resolve(&self, role: &str) -> Resolved<RoleBenchmark> {
        let key = normalize_role(role);
        let display = role.trim();

        let live = async {
            let warehouse = self
                .warehouse
                .as_ref()
                .ok_or(SourceError::Unconfigured(SOURCE))?;
            let row = warehouse.role_aggregate(&key).await?;
            benchmark_from_row(display, row)
        };

        resolve(SOURCE, self.timeout, live, || {
            self.tables.benchmark(&key, display)
        })
        .await
    }
}

fn benchmark_from_row(role: &str, row: RoleAggregateRow) -> Result<RoleBenchmark, SourceError> {
    let average = row.avg_salary.ok_or(SourceError::NoData)?;
    if row.sample_size == 0 {
        return Err(SourceError::NoData);
    }
    Ok(RoleBenchmark {
        role: role.to_string(),
        average: average as i64,
        range: SalaryRange {
            min: row.min_salary.unwrap_or(average) as i64,
            max: row.max_salary.unwrap_or(average) as i64,
        },
        sample_size: row.sample_size,
    })
}

/// Role → male/female benchmark.
#[derive(Clone)]
pub struct GenderBenchmarkResolver {
    warehouse: Option<Arc<dyn SalaryWarehouse>>,
    tables: Arc<BenchmarkTables>,
    timeout: Duration,
}

impl GenderBenchmarkResolver {
    pub fn new(
        warehouse: Option<Arc<dyn SalaryWarehouse>>,
        tables: Arc<BenchmarkTables>,
        timeout: Duration,
    ) -> Self {
        Self {
            warehouse,
            tables,
            timeout,
        }
    }

    /// Always answers; unknown roles get the default male/female pair.
    pub async fn resolve(&self, role: &str) -> Resolved<GenderBenchmark> {
        let key = normalize_role(role);
        let display = role.trim();
        resolve(SOURCE, self.timeout, self.live(&key, display), || {
            self.tables.gender_benchmark(&key, display)
        })
        .await
    }

    /// Answers only when the warehouse or the table knows the role.
    pub async fn resolve_known(&self, role: &str) -> Resolved<Option<GenderBenchmark>> {
        let key = normalize_role(role);
        let display = role.trim();
        let live = async { self.live(&key, display).await.map(Some) };
        resolve(SOURCE, self.timeout, live, || {
            self.tables.known_gender_benchmark(&key, display)
        })
        .await
    }

    async fn live(&self, key: &str, role: &str) -> Result<GenderBenchmark, SourceError> {
        let warehouse = self
            .warehouse
            .as_ref()
            .ok_or(SourceError::Unconfigured(SOURCE))?;
        let rows = warehouse.gender_aggregates(key).await?;
        gender_benchmark_from_rows(role, &rows)
    }
}

fn gender_benchmark_from_rows(
    role: &str,
    rows: &[GenderAggregateRow],
) -> Result<GenderBenchmark, SourceError> {
    let empty = GenderSlice {
        avg: 0,
        count: 0,
        range: SalaryRange { min: 0, max: 0 },
    };
    let mut male = empty;
    let mut female = empty;

    for row in rows {
        let slice = GenderSlice {
            avg: row.avg_salary as i64,
            count: row.sample_size,
            range: SalaryRange {
                min: row.min_salary as i64,
                max: row.max_salary as i64,
            },
        };
        match row.gender.as_deref().map(|g| g.trim().to_uppercase()) {
            Some(g) if g == "MALE" => male = slice,
            Some(g) if g == "FEMALE" => female = slice,
            _ => {}
        }
    }

    if male.avg == 0 && female.avg == 0 {
        return Err(SourceError::NoData);
    }
    Ok(GenderBenchmark::new(role, male, female))
}
