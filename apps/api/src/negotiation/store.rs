//! Negotiation knowledge store: tip documents grouped by category.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::Deserialize;
use tracing::debug;

use crate::errors::SourceError;
use crate::negotiation::classifier::Category;

const KEY_PREFIX: &str = "negotiation_tips";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TipDocument {
    pub tip: String,
    #[serde(default)]
    pub source: Option<String>,
}

impl TipDocument {
    /// Tip text with its attribution appended when one is present.
    pub fn attributed(&self) -> String {
        match self.source.as_deref().map(str::trim) {
            Some(source) if !source.is_empty() => format!("{} (Source: {source})", self.tip),
            _ => self.tip.clone(),
        }
    }
}

#[async_trait]
pub trait TipStore: Send + Sync {
    /// Tips filed under `category`, or every tip when `None`.
    async fn find_tips(&self, category: Option<Category>) -> Result<Vec<TipDocument>, SourceError>;
}

/// Redis-backed store. Each category is a list of JSON documents
/// `{"tip": "...", "source": "..."}` under `negotiation_tips:<category>`.
#[derive(Clone)]
pub struct RedisTipStore {
    client: redis::Client,
}

impl RedisTipStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

pub fn category_key(category: Category) -> String {
    format!("{KEY_PREFIX}:{}", category.as_str())
}

/// Parses stored documents, skipping any that are not valid tips.
pub fn parse_documents(raw: &[String]) -> Vec<TipDocument> {
    raw.iter()
        .filter_map(|doc| serde_json::from_str::<TipDocument>(doc).ok())
        .filter(|doc| !doc.tip.trim().is_empty())
        .collect()
}

#[async_trait]
impl TipStore for RedisTipStore {
    async fn find_tips(&self, category: Option<Category>) -> Result<Vec<TipDocument>, SourceError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let categories: Vec<Category> = match category {
            Some(c) => vec![c],
            None => Category::ALL.to_vec(),
        };

        let mut tips = Vec::new();
        for c in categories {
            let raw: Vec<String> = conn.lrange(category_key(c), 0, -1).await?;
            tips.extend(parse_documents(&raw));
        }

        debug!("Knowledge store returned {} tips", tips.len());
        Ok(tips)
    }
}
