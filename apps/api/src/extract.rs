//! Lenient JSON input.
//!
//! Bodies that are missing, malformed or not a JSON object become an empty
//! object, and individual fields are coerced with per-field defaults, so a bad
//! value never turns into a rejection.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use bytes::Bytes;
use serde_json::{Map, Value};

/// Request body parsed as a JSON object, or `{}` when it cannot be.
#[derive(Debug, Clone)]
pub struct Payload(pub Value);

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.unwrap_or_default();
        Ok(Payload(parse_object(&bytes)))
    }
}

pub fn parse_object(bytes: &[u8]) -> Value {
    serde_json::from_slice::<Value>(bytes)
        .ok()
        .filter(Value::is_object)
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// A finite number from a JSON number or numeric string.
pub fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// A whole number; fractional input is truncated.
pub fn integer(value: Option<&Value>) -> Option<i64> {
    number(value).map(|n| n.trunc() as i64)
}

/// Trimmed text from a string or number. Empty text is `None`.
pub fn text(value: Option<&Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}
