// Common module - shared error and configuration types

pub mod config;
pub mod error;

pub use config::FormConfig;
pub use error::{ApiError, FormError};
