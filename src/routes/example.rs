use std::time::Duration;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
};
use tracing::info;

use crate::{
    error::AppError,
    message::{ExampleQuery, HandlerStatsData},
    services::disconnect::CancelOnDisconnect,
    state::SharedState,
};

// Negative and NaN waits do not sleep at all.
fn wait_duration(wait: f64) -> Duration {
    if wait.is_nan() || wait <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(wait).unwrap_or(Duration::MAX)
}

pub async fn example_handler(
    disconnect: CancelOnDisconnect,
    query: Result<Query<ExampleQuery>, QueryRejection>,
) -> Result<Json<String>, AppError> {
    let Query(ExampleQuery { wait, reqid }) =
        query.map_err(|rejection| AppError::InvalidQuery(rejection.body_text()))?;

    info!("{reqid}: Sleeping for {wait:.2}");

    disconnect
        .run(reqid.clone(), tokio::time::sleep(wait_duration(wait)))
        .await?;

    info!("{reqid}: Sleep not cancelled");

    Ok(Json(format!(
        "{reqid} I waited for {wait:.2}s and now this is the result"
    )))
}

pub async fn index_handler(State(state): State<SharedState>) -> Html<String> {
    let messages = state.board.render_html().await;
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Disconnect example</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n<body>\n\
         <h1>Disconnect example</h1>\n<div id=\"message\">{messages}</div>\n</body>\n</html>\n"
    ))
}

pub async fn get_messages_handler(State(state): State<SharedState>) -> Json<Vec<String>> {
    Json(state.board.lines().await)
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<HandlerStatsData> {
    Json(state.stats.get_stats().await)
}
