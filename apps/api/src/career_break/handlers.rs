//! Axum route handlers for the career-break simulation and impact estimate.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::analysis::gap::format_dollars;
use crate::career_break::impact::estimate_break_impact;
use crate::career_break::simulator::{SimulationReport, TimelineEntry};
use crate::errors::AppError;
use crate::extract::{integer, number, Payload};
use crate::routes::guard::guarded;
use crate::state::AppState;

const DEFAULT_MONTHS: i64 = 6;
const DEFAULT_MONTHLY_SPEND: f64 = 2_000.0;
/// Rough multiplier for what the drained cash would have grown into.
const COMPOUND_MULTIPLIER: f64 = 3.3;

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub lost: i64,
    pub chart_data: Vec<i64>,
    pub message: String,
    pub simulation: SimulationReport,
    pub timeline: Vec<TimelineEntry>,
}

/// POST /simulate
pub async fn handle_simulate(State(state): State<AppState>, Payload(body): Payload) -> Response {
    guarded("simulate", simulate(state, body), || {
        Json(json!({
            "lost": 12000,
            "chart_data": [25000, 23000, 21000, 19000, 17000, 15000, 13000],
            "message": "A 6-month break costs you $12,000 in cash + $40,000 in future compound interest."
        }))
        .into_response()
    })
    .await
}

async fn simulate(state: AppState, body: Value) -> Result<Response, AppError> {
    let months = integer(body.get("months")).unwrap_or(DEFAULT_MONTHS);
    let monthly_spend = number(body.get("monthly_spend")).unwrap_or(DEFAULT_MONTHLY_SPEND);
    let savings = number(body.get("savings")).unwrap_or(state.simulator.default_balance());

    let timeline = state.simulator.simulate(months, monthly_spend, savings).await;
    let report = timeline.report();
    info!(
        "simulate: months={} source={:?}",
        report.months_simulated, report.source
    );

    let lost = timeline.total_lost.round() as i64;
    let compound_loss = (lost as f64 * COMPOUND_MULTIPLIER).round() as i64;
    let message = format!(
        "A {}-month break costs you ${} in cash + ${} in future compound interest.",
        report.months_simulated,
        format_dollars(lost),
        format_dollars(compound_loss)
    );

    Ok(Json(SimulateResponse {
        lost,
        chart_data: timeline.chart_data(),
        message,
        simulation: report,
        timeline: timeline.entries,
    })
    .into_response())
}

/// POST /calculate-impact
///
/// Arithmetic estimate of a break's cost; never touches the sandbox.
pub async fn handle_calculate_impact(
    State(state): State<AppState>,
    Payload(body): Payload,
) -> Response {
    guarded("calculate-impact", calculate_impact(state, body), || {
        Json(json!({"error": "Unable to calculate impact right now."})).into_response()
    })
    .await
}

async fn calculate_impact(state: AppState, body: Value) -> Result<Response, AppError> {
    let months = integer(body.get("months")).unwrap_or(DEFAULT_MONTHS);
    let salary = number(body.get("salary")).unwrap_or(state.impact.default_salary);

    let impact = estimate_break_impact(months, salary, &state.impact);
    info!("calculate-impact: months={}", impact.months);
    Ok(Json(impact).into_response())
}
