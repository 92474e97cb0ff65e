// src/http/mod.rs
//! Request-bound validator for axum handlers

pub mod extractor;
pub mod multipart;


pub use extractor::HttpValidator;
pub use multipart::load_multipart;
