//! Axum route handlers for the negotiation chat.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{text, Payload};
use crate::negotiation::coach::{compose_reply, ChatContext};
use crate::routes::guard::guarded;
use crate::state::AppState;

const FALLBACK_REPLY: &str = "Great question! Here's what research shows: Never reveal your \
    current salary first. Instead ask 'What's the budgeted range for this role?' This prevents \
    lowball offers. (Source: Harvard Business Review)";

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /chat
///
/// Picks a tip for the message and optionally lets the coach rephrase it.
pub async fn handle_chat(State(state): State<AppState>, Payload(body): Payload) -> Response {
    guarded("chat", chat(state, body), || {
        Json(ChatResponse {
            reply: FALLBACK_REPLY.to_string(),
        })
        .into_response()
    })
    .await
}

async fn chat(state: AppState, body: Value) -> Result<Response, AppError> {
    let message = text(body.get("message")).unwrap_or_default();
    let context = ChatContext::from_value(body.get("context"));

    let mut rng = StdRng::from_entropy();
    let tip = state.tips.select(&message, &mut rng).await;
    info!(
        "chat: category={} provenance={:?}",
        tip.category.as_str(),
        tip.provenance
    );

    let reply = compose_reply(&tip.text, &message, &context, state.coach.as_deref()).await;
    Ok(Json(ChatResponse { reply }).into_response())
}
