//! Field-level validation for server-side form handling.
//!
//! A [`Validator`] holds one request's submitted values and uploaded files,
//! runs composable rules against named fields, and records at most one
//! message per field. [`HttpValidator`] builds one straight from an axum
//! request.
//!
//! ```ignore
//! let mut v = Validator::new();
//! v.set_value("email", "john@example.com");
//! let address = v.string("email", &[&required, &email]);
//! if !v.valid() {
//!     return Err(ApiError::from(v.errors));
//! }
//! ```

pub mod common;
pub mod http;
pub mod uploads;
pub mod validation;

pub use common::{ApiError, FormConfig, FormError};
pub use http::HttpValidator;
pub use uploads::{
    image_config, FileValidationConfig, UploadRejection, UploadedFile, KB, MB,
};
pub use validation::{
    boolean, custom, email, in_string_slice, int_range, matches, max_length, min_length,
    required, FieldErrors, RuleResult, ValidationFunc, Validator,
};
