mod auth;
mod config;
mod headers;
mod result;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use crate::services::auth_api::HttpAuthBackend;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // A gateway without the signing secret cannot make a single sound
    // decision; crash now rather than fail open or closed per request.
    let config = config::AppConfig::from_env().expect("configuration error");
    let port = config.port;

    let backend = Arc::new(HttpAuthBackend::new(&config));
    let state = state::AppState::new(config, backend);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "tanyai edge gateway listening");
    axum::serve(listener, app).await.expect("server failed");
}
