//! Last-resort safety net for analytic handlers.
//!
//! Work runs on its own task. A panic or an `AppError::Internal` is replaced by
//! the endpoint's fixed fallback body; other `AppError`s render as usual.
//! The task is aborted when the request future is dropped, so a client that
//! goes away stops any outstanding live calls.

use std::future::Future;

use axum::response::{IntoResponse, Response};
use tokio::task::AbortHandle;
use tracing::error;

use crate::errors::AppError;

struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        // no-op once the task has finished
        self.0.abort();
    }
}

pub async fn guarded<Fut, F>(endpoint: &'static str, work: Fut, fallback: F) -> Response
where
    Fut: Future<Output = Result<Response, AppError>> + Send + 'static,
    F: FnOnce() -> Response,
{
    let handle = tokio::spawn(work);
    let _abort = AbortOnDrop(handle.abort_handle());

    let outcome = match handle.await {
        Ok(outcome) => outcome,
        Err(join_error) => Err(AppError::Internal(join_error.into())),
    };

    match outcome {
        Ok(response) => response,
        Err(AppError::Internal(e)) => {
            error!("{endpoint}: serving fallback: {e:#}");
            fallback()
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;

    fn teapot() -> Response {
        StatusCode::IM_A_TEAPOT.into_response()
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let response = guarded("t", async { Ok(StatusCode::OK.into_response()) }, teapot).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_panic_serves_fallback() {
        let work = async {
            if true {
                panic!("boom");
            }
            Ok(StatusCode::OK.into_response())
        };
        assert_eq!(guarded("t", work, teapot).await.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn test_internal_error_serves_fallback() {
        let work = async { Err(AppError::Internal(anyhow::anyhow!("db exploded"))) };
        assert_eq!(guarded("t", work, teapot).await.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn test_not_found_is_rendered() {
        let work = async { Err(AppError::NotFound("x".into())) };
        assert_eq!(guarded("t", work, teapot).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_request_aborts_work() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let work = async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(StatusCode::OK.into_response())
        };

        let abandoned =
            tokio::time::timeout(Duration::from_secs(1), guarded("t", work, teapot)).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }
}
