pub mod guard;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::{handle_benchmark, handle_gap_check, handle_lifetime};
use crate::career_break::handlers::{handle_calculate_impact, handle_simulate};
use crate::negotiation::handlers::handle_chat;
use crate::state::AppState;

fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/benchmark", post(handle_benchmark))
        .route("/gap-check", post(handle_gap_check))
        .route("/lifetime", post(handle_lifetime))
        .route("/simulate", post(handle_simulate))
        .route("/calculate-impact", post(handle_calculate_impact))
        .route("/chat", post(handle_chat))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .merge(analytics_routes())
        // the browser front end proxies everything under /api
        .nest("/api", analytics_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::benchmark::warehouse::SalaryWarehouse;
    use crate::config::Config;
    use crate::errors::SourceError;
    use crate::models::salary::{GenderAggregateRow, RoleAggregateRow};
    use crate::negotiation::tips::TipTable;
    use crate::state::Sources;

    fn offline_app() -> Router {
        let config = Config {
            sandbox_pacing: Duration::ZERO,
            ..Config::default()
        };
        build_router(AppState::new(&config, Sources::default()))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        send(offline_app(), "POST", uri, Body::from(body.to_string())).await
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(offline_app(), "GET", "/health", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "running", "project": "The Equity Gap"}));
    }

    #[tokio::test]
    async fn test_benchmark_reports_range_and_sample_size() {
        let (status, body) = post_json("/api/benchmark", json!({"role": " Data Analyst "})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["role"], "Data Analyst");
        assert_eq!(body["average_salary"], 85000);
        assert_eq!(body["salary_range"], json!({"min": 68000, "max": 106250}));
        assert_eq!(body["sample_size"], 150);
        assert_eq!(body["source"], "fallback");
    }

    #[tokio::test]
    async fn test_benchmark_missing_role_is_400() {
        let (status, body) = post_json("/benchmark", json!({"current_salary": 1})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing 'role' in request body");
    }

    #[tokio::test]
    async fn test_calculate_impact_defaults() {
        let (status, body) = post_json("/api/calculate-impact", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["months"], 6);
        assert_eq!(body["lost_income"], 37500.0);
        assert_eq!(body["expenses_during_break"], 18000.0);
        assert_eq!(body["total_financial_impact"], 55500.0);
        assert_eq!(body["investment_opportunity_cost"], 630.0);
        assert_eq!(
            body["savings_depletion"],
            json!({"initial": 25000.0, "final": 7000.0, "percentage_used": 72.0})
        );
    }

    #[tokio::test]
    async fn test_calculate_impact_coerces_inputs() {
        let (_, body) =
            post_json("/calculate-impact", json!({"months": "3", "salary": "120000"})).await;
        assert_eq!(body["months"], 3);
        assert_eq!(body["lost_income"], 30000.0);
    }

    #[tokio::test]
    async fn test_gap_check_data_analyst_underpaid() {
        let (status, body) = post_json(
            "/gap-check",
            json!({"role": "data analyst", "current_salary": 70000}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verdict"], "UNDERPAID");
        assert_eq!(body["gap_amount"], 15000);
        assert_eq!(body["market_average"], 85000);
        assert_eq!(body["message"], "You are leaving $15,000 on the table.");
        assert_eq!(body["male_avg"], 88000);
        assert_eq!(body["female_avg"], 81000);
        assert_eq!(body["gender_gap"], 7000);
    }

    #[tokio::test]
    async fn test_gap_check_unknown_role_uses_default_without_gender_fields() {
        let (status, body) =
            post_json("/api/gap-check", json!({"role": "Astronaut", "current_salary": "abc"}))
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["market_average"], 90000);
        assert_eq!(body["gap_amount"], 90000);
        assert!(body.get("male_avg").is_none());
    }

    #[tokio::test]
    async fn test_gap_check_missing_role_is_400_with_default_body() {
        let (status, body) = post_json("/gap-check", json!({"current_salary": 50000})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["verdict"], "FAIR RATE");
        assert_eq!(body["gap_amount"], 0);
        assert_eq!(body["market_average"], 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_treated_as_empty_input() {
        let (status, body) =
            send(offline_app(), "POST", "/gap-check", Body::from("{role: oops")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["verdict"], "FAIR RATE");

        let (status, body) = send(offline_app(), "POST", "/simulate", Body::from("nope")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lost"], 12000);
    }

    #[tokio::test]
    async fn test_simulate_six_months() {
        let (status, body) = post_json(
            "/simulate",
            json!({"months": 6, "monthly_spend": 2000, "savings": 25000}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["chart_data"],
            json!([25000, 23000, 21000, 19000, 17000, 15000, 13000])
        );
        assert_eq!(body["lost"], 12000);
        assert_eq!(
            body["message"],
            "A 6-month break costs you $12,000 in cash + $39,600 in future compound interest."
        );
        assert_eq!(body["simulation"]["total_spent"], 12000);
        assert_eq!(body["simulation"]["depletion_percentage"], 48.0);
        assert_eq!(body["simulation"]["source"], "fallback");
        assert_eq!(body["timeline"][0]["status"], "calculated");
    }

    #[tokio::test]
    async fn test_simulate_clamps_and_coerces() {
        let (_, body) = post_json(
            "/simulate",
            json!({"months": 500, "monthly_spend": -10, "savings": "lots"}),
        )
        .await;
        assert_eq!(body["chart_data"].as_array().unwrap().len(), 25);
        assert_eq!(body["lost"], 0);
        assert_eq!(body["simulation"]["initial_balance"], 25000);
    }

    #[tokio::test]
    async fn test_lifetime_known_role() {
        let (status, body) =
            post_json("/lifetime", json!({"role": "Software Engineer", "years": 30})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["male_avg"], 134000);
        assert_eq!(body["female_avg"], 121000);
        assert_eq!(body["annual_gap_start"], 13000);
        assert_eq!(body["male_trajectory"].as_array().unwrap().len(), 31);
        assert_eq!(body["year_labels"][0], "Start");
        assert_eq!(body["years"], 30);
        assert!(
            body["total_compound_loss"].as_i64().unwrap()
                >= body["total_lost_retirement"].as_i64().unwrap()
        );
    }

    #[tokio::test]
    async fn test_lifetime_unknown_role_is_404() {
        let (status, body) = post_json("/lifetime", json!({"role": "astronaut"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("astronaut"));
    }

    #[tokio::test]
    async fn test_lifetime_missing_role_is_400() {
        let (status, body) = post_json("/lifetime", json!({"years": 10})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_lifetime_years_are_clamped() {
        let (_, body) = post_json("/lifetime", json!({"role": "ux designer", "years": 99})).await;
        assert_eq!(body["years"], 40);
        assert_eq!(body["gap_trajectory"].as_array().unwrap().len(), 41);
    }

    #[tokio::test]
    async fn test_chat_always_replies() {
        let (status, body) = post_json(
            "/chat",
            json!({"message": "I got a signing bonus offer but it's maxed out", "context": "bad"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let reply = body["reply"].as_str().unwrap();
        assert!(reply.starts_with("I checked our research database. "));

        let (_, body) = post_json("/api/chat", json!({})).await;
        let reply = body["reply"].as_str().unwrap();
        assert!(TipTable::default()
            .candidates(crate::negotiation::classifier::Category::General)
            .iter()
            .any(|tip| tip == reply));
    }

    struct PanickingWarehouse;

    #[async_trait]
    impl SalaryWarehouse for PanickingWarehouse {
        async fn role_aggregate(&self, _role: &str) -> Result<RoleAggregateRow, SourceError> {
            panic!("driver bug");
        }

        async fn gender_aggregates(
            &self,
            _role: &str,
        ) -> Result<Vec<GenderAggregateRow>, SourceError> {
            panic!("driver bug");
        }
    }

    #[tokio::test]
    async fn test_panicking_source_serves_literal_fallback() {
        let sources = Sources {
            warehouse: Some(Arc::new(PanickingWarehouse)),
            ..Sources::default()
        };
        let app = build_router(AppState::new(&Config::default(), sources));
        let body = json!({"role": "data analyst", "current_salary": 1}).to_string();
        let (status, body) = send(app, "POST", "/gap-check", Body::from(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verdict"], "FAIR RATE");
        assert_eq!(body["market_average"], 90000);
    }
}
