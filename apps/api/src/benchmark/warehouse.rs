//! Salary warehouse access. One grouped aggregate query per resolution call.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::SourceError;
use crate::models::salary::{GenderAggregateRow, RoleAggregateRow};

/// The tabular salary source the benchmark resolvers try first.
#[async_trait]
pub trait SalaryWarehouse: Send + Sync {
    /// Aggregate over all rows whose job title matches `role`, case-insensitively.
    async fn role_aggregate(&self, role: &str) -> Result<RoleAggregateRow, SourceError>;

    /// Per-gender aggregates for `role`; empty when nothing matched.
    async fn gender_aggregates(&self, role: &str) -> Result<Vec<GenderAggregateRow>, SourceError>;
}

const ROLE_AGGREGATE_SQL: &str = r#"
    SELECT
        AVG(annual_salary)::FLOAT8 AS avg_salary,
        MIN(annual_salary)::FLOAT8 AS min_salary,
        MAX(annual_salary)::FLOAT8 AS max_salary,
        COUNT(*)                   AS sample_size
    FROM salaries
    WHERE UPPER(job_title) = UPPER($1)
"#;

const GENDER_AGGREGATE_SQL: &str = r#"
    SELECT
        gender,
        AVG(annual_salary)::FLOAT8 AS avg_salary,
        MIN(annual_salary)::FLOAT8 AS min_salary,
        MAX(annual_salary)::FLOAT8 AS max_salary,
        COUNT(*)                   AS sample_size
    FROM salaries
    WHERE UPPER(job_title) = UPPER($1)
    GROUP BY gender
"#;

/// Postgres-backed warehouse over `salaries(job_title, gender, annual_salary)`.
#[derive(Clone)]
pub struct PgSalaryWarehouse {
    pool: PgPool,
}

impl PgSalaryWarehouse {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalaryWarehouse for PgSalaryWarehouse {
    async fn role_aggregate(&self, role: &str) -> Result<RoleAggregateRow, SourceError> {
        let row = sqlx::query_as::<_, RoleAggregateRow>(ROLE_AGGREGATE_SQL)
            .bind(role)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn gender_aggregates(&self, role: &str) -> Result<Vec<GenderAggregateRow>, SourceError> {
        let rows = sqlx::query_as::<_, GenderAggregateRow>(GENDER_AGGREGATE_SQL)
            .bind(role)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
