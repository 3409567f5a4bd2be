//! Banking sandbox client (Capital One Nessie API).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::errors::SourceError;

pub const DEFAULT_NESSIE_BASE_URL: &str = "http://api.nessieisreal.com";

/// A sandbox account that can be drained month by month.
#[async_trait]
pub trait BankingSandbox: Send + Sync {
    /// Provisions a customer and a checking account seeded with `starting_balance`.
    /// Returns the account id.
    async fn open_account(&self, starting_balance: f64) -> Result<String, SourceError>;

    async fn withdraw(&self, account_id: &str, amount: f64, month: u32)
        -> Result<(), SourceError>;

    async fn balance(&self, account_id: &str) -> Result<f64, SourceError>;
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    #[serde(rename = "objectCreated")]
    object_created: Option<CreatedObject>,
}

#[derive(Debug, Deserialize)]
struct CreatedObject {
    #[serde(rename = "_id")]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    balance: Option<f64>,
}

/// Sandbox bodies are sometimes HTML error pages served with a success status.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Clone)]
pub struct NessieSandbox {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NessieSandbox {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn create(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<String, SourceError> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .query(&[("key", &self.api_key)])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Unavailable(format!(
                "POST {path} returned {status}: {body}"
            )));
        }

        let created: CreatedResponse = decode(&response.text().await?)?;
        created
            .object_created
            .and_then(|o| o.id)
            .ok_or_else(|| SourceError::Unavailable(format!("POST {path} returned no id")))
    }
}

#[async_trait]
impl BankingSandbox for NessieSandbox {
    async fn open_account(&self, starting_balance: f64) -> Result<String, SourceError> {
        let customer_id = self
            .create(
                "/customers",
                json!({
                    "first_name": "Sarah",
                    "last_name": "NewGrad",
                    "address": {
                        "street_number": "123",
                        "street_name": "Career Lane",
                        "city": "West Lafayette",
                        "state": "IN",
                        "zip": "47906"
                    }
                }),
            )
            .await?;

        let account_id = self
            .create(
                &format!("/customers/{customer_id}/accounts"),
                json!({
                    "type": "Checking",
                    "nickname": "Career Break Safety Net",
                    "rewards": 0,
                    "balance": starting_balance.round() as i64
                }),
            )
            .await?;

        debug!("Sandbox account {account_id} opened for customer {customer_id}");
        Ok(account_id)
    }

    async fn withdraw(
        &self,
        account_id: &str,
        amount: f64,
        month: u32,
    ) -> Result<(), SourceError> {
        let response = self
            .client
            .post(format!("{}/accounts/{account_id}/withdrawals", self.base_url))
            .query(&[("key", &self.api_key)])
            .json(&json!({
                "medium": "balance",
                "transaction_date": chrono::Utc::now().format("%Y-%m-%d").to_string(),
                "status": "completed",
                "description": format!("Month {month} living expenses"),
                "amount": amount
            }))
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::ACCEPTED => Ok(()),
            status => Err(SourceError::Unavailable(format!(
                "withdrawal for month {month} returned {status}"
            ))),
        }
    }

    async fn balance(&self, account_id: &str) -> Result<f64, SourceError> {
        let response = self
            .client
            .get(format!("{}/accounts/{account_id}", self.base_url))
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(SourceError::Unavailable(format!(
                "balance read returned {}",
                response.status()
            )));
        }

        let account: AccountResponse = decode(&response.text().await?)?;
        Ok(account.balance.unwrap_or(0.0))
    }
}
