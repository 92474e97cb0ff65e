// src/signup/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

pub fn signup_routes() -> Router {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/health", get(handlers::health))
}
