// src/signup/handlers.rs

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tracing::{debug, info};

use super::models::{AppState, AvatarInfo, SignupResponse};
use form_validator::{
    email, image_config, in_string_slice, int_range, max_length, min_length, required, ApiError,
    HttpValidator, Validator,
};

pub const PLANS: &[&str] = &["free", "pro", "team"];

/// POST /signup - Validate a signup form with an optional avatar
pub async fn signup(
    Extension(state): Extension<Arc<AppState>>,
    mut form: HttpValidator,
) -> Result<Json<SignupResponse>, ApiError> {
    validate_signup(&mut form, state.avatar_max_size).map(Json)
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// Runs every signup rule and returns the accepted form, or the field
/// errors as a validation failure.
pub fn validate_signup(
    v: &mut Validator,
    avatar_max_size: i64,
) -> Result<SignupResponse, ApiError> {
    let name = v.string("name", &[&required, &min_length(2), &max_length(50)]);
    let address = v.string("email", &[&required, &email]);
    let age = v.int("age", &[&required, &int_range(13, 120)]);
    let plan = v.string("plan", &[&required, &in_string_slice(PLANS.iter().copied())]);

    let accepted = v.bool("terms", &[]);
    v.check(accepted, "terms", "You must accept the terms");

    let avatar = if v.get_file("avatar").is_some() {
        v.image("avatar", &image_config(avatar_max_size, &[]))
    } else {
        None
    };

    if !v.valid() {
        debug!(fields = v.errors.len(), "Signup rejected");
        return Err(ApiError::from(std::mem::take(&mut v.errors)));
    }

    info!(plan = %plan, has_avatar = avatar.is_some(), "Signup accepted");

    Ok(SignupResponse {
        name,
        email: address,
        age,
        plan,
        avatar: avatar.map(|file| AvatarInfo {
            filename: file.filename,
            size: file.size,
        }),
    })
}
