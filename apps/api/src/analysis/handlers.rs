//! Axum route handlers for the benchmark, gap check and lifetime impact endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::analysis::gap::{evaluate_gap, GapEvaluation, Verdict};
use crate::analysis::lifetime::{dollars, DEFAULT_YEARS};
use crate::benchmark::{GenderBenchmark, SalaryRange};
use crate::errors::AppError;
use crate::extract::{integer, number, text, Payload};
use crate::resolution::Provenance;
use crate::routes::guard::guarded;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenderSummary {
    pub male_avg: i64,
    pub female_avg: i64,
    pub gender_gap: i64,
    pub gender_gap_percent: f64,
}

impl From<&GenderBenchmark> for GenderSummary {
    fn from(b: &GenderBenchmark) -> Self {
        Self {
            male_avg: b.male.avg,
            female_avg: b.female.avg,
            gender_gap: b.gap,
            gender_gap_percent: b.gap_percent,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GapCheckResponse {
    #[serde(flatten)]
    pub evaluation: GapEvaluation,
    #[serde(flatten)]
    pub gender: Option<GenderSummary>,
}

impl GapCheckResponse {
    fn literal(market_average: i64, message: &str) -> Self {
        Self {
            evaluation: GapEvaluation {
                verdict: Verdict::FairRate,
                gap_amount: 0,
                market_average,
                message: message.to_string(),
            },
            gender: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BenchmarkResponse {
    pub success: bool,
    pub role: String,
    pub average_salary: i64,
    pub salary_range: SalaryRange,
    pub sample_size: i64,
    pub source: Provenance,
}

#[derive(Debug, Serialize)]
pub struct LifetimeResponse {
    pub success: bool,
    pub role: String,
    pub male_avg: i64,
    pub female_avg: i64,
    pub gap: i64,
    pub gap_percent: f64,
    pub male_count: i64,
    pub female_count: i64,
    pub male_range: SalaryRange,
    pub female_range: SalaryRange,
    pub male_trajectory: Vec<i64>,
    pub female_trajectory: Vec<i64>,
    pub gap_trajectory: Vec<i64>,
    pub year_labels: Vec<String>,
    pub annual_gap_start: i64,
    pub annual_gap_year30: i64,
    pub total_lost_salary: i64,
    pub total_lost_retirement: i64,
    pub total_lost_investment: i64,
    pub total_compound_loss: i64,
    pub years: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /benchmark
///
/// Market average, range and sample size for a role.
pub async fn handle_benchmark(State(state): State<AppState>, Payload(body): Payload) -> Response {
    guarded("benchmark", role_benchmark(state, body), || {
        Json(serde_json::json!({
            "success": false,
            "error": "Unable to fetch the market benchmark right now. Please try again."
        }))
        .into_response()
    })
    .await
}

async fn role_benchmark(state: AppState, body: Value) -> Result<Response, AppError> {
    let role = text(body.get("role"))
        .ok_or_else(|| AppError::Validation("Missing 'role' in request body".to_string()))?;

    let resolved = state.benchmarks.resolve(&role).await;
    info!("benchmark: role={role} provenance={:?}", resolved.provenance);

    let benchmark = resolved.value;
    Ok(Json(BenchmarkResponse {
        success: true,
        role: benchmark.role,
        average_salary: benchmark.average,
        salary_range: benchmark.range,
        sample_size: benchmark.sample_size,
        source: resolved.provenance,
    })
    .into_response())
}

/// POST /gap-check
///
/// Compares the user's salary with the market benchmark for their role and,
/// when the role has gendered data, adds the male/female split.
pub async fn handle_gap_check(State(state): State<AppState>, Payload(body): Payload) -> Response {
    guarded("gap-check", gap_check(state, body), || {
        Json(GapCheckResponse::literal(
            90_000,
            "Unable to analyze right now. Keep researching your market rate!",
        ))
        .into_response()
    })
    .await
}

async fn gap_check(state: AppState, body: Value) -> Result<Response, AppError> {
    let Some(role) = text(body.get("role")) else {
        let body = GapCheckResponse::literal(0, "Please provide a job role to analyze.");
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    };
    let current_salary = number(body.get("current_salary")).unwrap_or(0.0).max(0.0);

    let (benchmark, gender) = tokio::join!(
        state.benchmarks.resolve(&role),
        state.gender_benchmarks.resolve_known(&role)
    );
    info!(
        "gap-check: role={role} benchmark={:?} gender={:?}",
        benchmark.provenance, gender.provenance
    );

    let evaluation = evaluate_gap(current_salary, benchmark.value.average);
    Ok(Json(GapCheckResponse {
        evaluation,
        gender: gender.value.as_ref().map(GenderSummary::from),
    })
    .into_response())
}

/// POST /lifetime
///
/// Projects the gender gap for a role over a career. 404 when neither the
/// warehouse nor the table knows the role.
pub async fn handle_lifetime(State(state): State<AppState>, Payload(body): Payload) -> Response {
    guarded("lifetime", lifetime(state, body), || {
        Json(serde_json::json!({
            "success": false,
            "error": "Unable to calculate lifetime impact right now. Please try again."
        }))
        .into_response()
    })
    .await
}

async fn lifetime(state: AppState, body: Value) -> Result<Response, AppError> {
    let role = text(body.get("role"))
        .ok_or_else(|| AppError::Validation("Missing 'role' in request body".to_string()))?;
    let years = integer(body.get("years")).unwrap_or(DEFAULT_YEARS as i64);

    let resolved = state.gender_benchmarks.resolve_known(&role).await;
    let benchmark = resolved
        .value
        .ok_or_else(|| AppError::NotFound(format!("No gender data found for role: {role}")))?;
    info!("lifetime: role={role} provenance={:?}", resolved.provenance);

    let trajectory =
        state
            .projector
            .project(benchmark.male.avg as f64, benchmark.female.avg as f64, years);
    let totals = trajectory.totals;

    Ok(Json(LifetimeResponse {
        success: true,
        role: benchmark.role.clone(),
        male_avg: benchmark.male.avg,
        female_avg: benchmark.female.avg,
        gap: benchmark.gap,
        gap_percent: benchmark.gap_percent,
        male_count: benchmark.male.count,
        female_count: benchmark.female.count,
        male_range: benchmark.male.range,
        female_range: benchmark.female.range,
        male_trajectory: trajectory.male_trajectory(),
        female_trajectory: trajectory.female_trajectory(),
        gap_trajectory: trajectory.gap_trajectory(),
        year_labels: trajectory.year_labels(),
        annual_gap_start: benchmark.male.avg - benchmark.female.avg,
        annual_gap_year30: trajectory.final_gap(),
        total_lost_salary: dollars(totals.lost_salary),
        total_lost_retirement: dollars(totals.lost_retirement_match),
        total_lost_investment: dollars(totals.lost_investment_growth),
        total_compound_loss: dollars(totals.total_compound_loss),
        years: trajectory.years,
    })
    .into_response())
}
