use sqlx::FromRow;

/// Aggregate over every warehouse row whose job title matches a role.
/// All aggregates are NULL when nothing matched.
#[derive(Debug, Clone, FromRow)]
pub struct RoleAggregateRow {
    pub avg_salary: Option<f64>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub sample_size: i64,
}

/// One `GROUP BY gender` row for a role.
#[derive(Debug, Clone, FromRow)]
pub struct GenderAggregateRow {
    pub gender: Option<String>,
    pub avg_salary: f64,
    pub min_salary: f64,
    pub max_salary: f64,
    pub sample_size: i64,
}
