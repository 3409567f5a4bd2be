//! Reply composition for the negotiation chat, with optional LLM enrichment.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::analysis::gap::format_dollars;
use crate::extract::{number, text};
use crate::llm_client::prompts::{COACH_PROMPT_TEMPLATE, COACH_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

const RESEARCH_PREFIX: &str = "I checked our research database. ";
const MAX_HISTORY_TURNS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// What the front end knows about the user when they ask a question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatContext {
    pub role: Option<String>,
    pub salary: Option<f64>,
    pub location: Option<String>,
    pub market_average: Option<f64>,
    pub gap_amount: Option<f64>,
    pub verdict: Option<String>,
    pub history: Vec<ChatTurn>,
}

impl ChatContext {
    /// Reads the context object leniently; anything unusable is dropped.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(obj) = value.filter(|v| v.is_object()) else {
            return Self::default();
        };

        let history = obj
            .get("history")
            .and_then(Value::as_array)
            .map(|turns| {
                turns
                    .iter()
                    .filter_map(|turn| {
                        let content = text(turn.get("content").or_else(|| turn.get("text")))?;
                        let role = text(turn.get("role")).unwrap_or_else(|| "user".to_string());
                        Some(ChatTurn { role, content })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            role: text(obj.get("role")),
            salary: number(obj.get("salary")),
            location: text(obj.get("location")),
            market_average: number(obj.get("market_average")),
            gap_amount: number(obj.get("gap_amount")),
            verdict: text(obj.get("verdict")),
            history,
        }
    }

    fn describe(&self) -> String {
        let mut lines = Vec::new();
        if let Some(role) = &self.role {
            lines.push(format!("- Role: {role}"));
        }
        if let Some(location) = &self.location {
            lines.push(format!("- Location: {location}"));
        }
        if let Some(salary) = self.salary {
            lines.push(format!("- Current salary: ${}", format_dollars(salary as i64)));
        }
        if let Some(avg) = self.market_average {
            lines.push(format!("- Market average: ${}", format_dollars(avg as i64)));
        }
        if let Some(gap) = self.gap_amount {
            lines.push(format!("- Gap to market: ${}", format_dollars(gap as i64)));
        }
        if let Some(verdict) = &self.verdict {
            lines.push(format!("- Verdict: {verdict}"));
        }
        if lines.is_empty() {
            "- (nothing shared yet)".to_string()
        } else {
            lines.join("\n")
        }
    }

    fn recent_history(&self) -> String {
        let skip = self.history.len().saturating_sub(MAX_HISTORY_TURNS);
        let turns: Vec<String> = self.history[skip..]
            .iter()
            .map(|t| format!("{}: {}", t.role, t.content))
            .collect();
        if turns.is_empty() {
            "(none)".to_string()
        } else {
            turns.join("\n")
        }
    }
}

/// Optional generative step that turns a tip into a conversational reply.
#[async_trait]
pub trait ReplyEnricher: Send + Sync {
    async fn enrich(
        &self,
        tip: &str,
        message: &str,
        context: &ChatContext,
    ) -> Result<String, LlmError>;
}

pub fn build_coach_prompt(tip: &str, message: &str, context: &ChatContext) -> String {
    COACH_PROMPT_TEMPLATE
        .replace("{context}", &context.describe())
        .replace("{history}", &context.recent_history())
        .replace("{message}", if message.is_empty() { "(none)" } else { message })
        .replace("{tip}", tip)
}

#[async_trait]
impl ReplyEnricher for LlmClient {
    async fn enrich(
        &self,
        tip: &str,
        message: &str,
        context: &ChatContext,
    ) -> Result<String, LlmError> {
        let prompt = build_coach_prompt(tip, message, context);
        self.complete(&prompt, COACH_SYSTEM).await
    }
}

/// The reply sent back to the user: the enriched text when the coach answers,
/// otherwise the tip itself.
pub async fn compose_reply(
    tip: &str,
    message: &str,
    context: &ChatContext,
    enricher: Option<&dyn ReplyEnricher>,
) -> String {
    if let Some(enricher) = enricher {
        match enricher.enrich(tip, message, context).await {
            Ok(reply) if !reply.trim().is_empty() => return reply,
            Ok(_) => warn!("Coach returned an empty reply; using tip"),
            Err(e) => warn!("Coach unavailable ({e}); using tip"),
        }
    }

    if message.is_empty() {
        tip.to_string()
    } else {
        format!("{RESEARCH_PREFIX}{tip}")
    }
}
