//! Cancel handler work when the client goes away.
//!
//! hyper drops a handler's future once it notices the connection is closed.
//! `CancelOnDisconnect` is extracted into the handler and owns a drop guard
//! of a `CancellationToken`, so that drop cancels the token. The guarded work
//! runs on its own task racing that token, which lets it observe the
//! cancellation and log it instead of silently vanishing.

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::error;

use crate::error::AppError;
use crate::services::handler_stats::HandlerStats;
use crate::state::SharedState;

pub struct CancelOnDisconnect {
    token: CancellationToken,
    _guard: DropGuard,
    stats: HandlerStats,
}

impl CancelOnDisconnect {
    pub fn new(stats: HandlerStats) -> Self {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();
        Self { token, _guard: guard, stats }
    }

    /// Run `work` to completion unless the client disconnects first.
    ///
    /// Returns `AppError::Disconnected` when the work was cancelled.
    pub async fn run<F, T>(&self, label: impl Into<String>, work: F) -> Result<T, AppError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let token = self.token.clone();
        let stats = self.stats.clone();
        let label = label.into();

        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    error!("{label}: Exiting on cancellation");
                    stats.record_cancelled().await;
                    None
                }
                out = work => {
                    stats.record_completed().await;
                    Some(out)
                }
            }
        });

        match task.await {
            Ok(Some(out)) => Ok(out),
            Ok(None) => Err(AppError::Disconnected),
            Err(err) => {
                error!(error = %err, "guarded task failed");
                Err(AppError::Internal(err.to_string()))
            }
        }
    }
}

impl FromRequestParts<SharedState> for CancelOnDisconnect {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::new(state.stats.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    #[tokio::test]
    async fn completes_when_client_stays() {
        let stats = HandlerStats::new();
        let guard = CancelOnDisconnect::new(stats.clone());

        let out = guard.run("t1", async { 42 }).await.unwrap();
        assert_eq!(out, 42);

        let data = stats.get_stats().await;
        assert_eq!((data.completed, data.cancelled), (1, 0));
    }

    #[tokio::test]
    async fn dropping_the_guard_cancels_the_work() {
        let stats = HandlerStats::new();
        let guard = CancelOnDisconnect::new(stats.clone());

        // Stand-in for hyper dropping the handler future.
        let handler = tokio::spawn(async move {
            guard.run("t2", sleep(Duration::from_secs(30))).await
        });
        sleep(Duration::from_millis(20)).await;
        handler.abort();

        timeout(Duration::from_secs(2), async {
            while stats.get_stats().await.cancelled == 0 {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("work was not cancelled");

        assert_eq!(stats.get_stats().await.completed, 0);
    }
}
