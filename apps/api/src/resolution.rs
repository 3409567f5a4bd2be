//! Two-stage resolution: try a live source under a deadline, substitute a
//! deterministic value on any failure.
//!
//! Every resolver in the service goes through [`resolve`]. A live result is
//! either used whole or discarded whole; nothing from a failed attempt is
//! merged into the fallback value.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::SourceError;

/// Which stage produced a resolved value. Observability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Live,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Resolved<T> {
    pub fn is_live(&self) -> bool {
        self.provenance == Provenance::Live
    }
}

/// Runs `live` under `deadline`; on error, timeout or `NoData` runs `fallback`.
///
/// `source` only labels log lines. The live future is dropped on timeout, which
/// abandons any in-flight external call it owns.
pub async fn resolve<T, Fut, F>(
    source: &'static str,
    deadline: Duration,
    live: Fut,
    fallback: F,
) -> Resolved<T>
where
    Fut: Future<Output = Result<T, SourceError>>,
    F: FnOnce() -> T,
{
    let outcome = match tokio::time::timeout(deadline, live).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout(deadline)),
    };

    match outcome {
        Ok(value) => {
            debug!("{source}: live result used");
            Resolved {
                value,
                provenance: Provenance::Live,
            }
        }
        Err(e) => {
            warn!("{source}: {e}; using fallback");
            Resolved {
                value: fallback(),
                provenance: Provenance::Fallback,
            }
        }
    }
}
