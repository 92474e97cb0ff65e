// src/signup/mod.rs

pub mod handlers;
pub mod models;
pub mod routes;


pub use models::AppState;
pub use routes::signup_routes;
