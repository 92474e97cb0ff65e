// src/main.rs
use axum::{extract::DefaultBodyLimit, Extension, Router};
use dotenv::dotenv;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use form_validator::common::config::read_size;
use form_validator::{FormConfig, MB};

mod signup;

use signup::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let form = FormConfig::from_env();
    let avatar_max_size = read_size("AVATAR_MAX_SIZE", MB as usize) as i64;

    info!(
        max_memory = form.max_memory,
        max_body = form.max_body,
        spill_dir = %form.spill_dir.display(),
        avatar_max_size = avatar_max_size,
        "Form limits loaded"
    );

    tokio::fs::create_dir_all(&form.spill_dir).await?;

    let state = Arc::new(AppState { avatar_max_size });

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let cors_origins = std::env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());
    let origins: Vec<axum::http::HeaderValue> = cors_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let app = Router::new()
        .merge(signup::signup_routes())
        .layer(DefaultBodyLimit::max(form.max_body))
        .layer(Extension(form))
        .layer(Extension(state))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http());

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
