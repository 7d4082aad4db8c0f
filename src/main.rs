use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use disconnect_demo::config::AppConfig;
use disconnect_demo::routes;
use disconnect_demo::services::requester::start_local_demo;
use disconnect_demo::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "disconnect_demo=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = Arc::new(AppState::new());

    let app = routes::create_router(&config.static_dir)
        .with_state(state.clone())
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "disconnect example running");

    if config.run_on_start {
        // Same as a browser loading the page: two requests against ourselves.
        start_local_demo(local_addr, config.wait_secs, state.board.clone())?;
    }

    axum::serve(listener, app).await?;
    Ok(())
}

