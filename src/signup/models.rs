// src/signup/models.rs

use serde::Serialize;

/// Settings shared by the signup handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Largest accepted avatar in bytes; 0 or less disables the limit.
    pub avatar_max_size: i64,
}

#[derive(Debug, Serialize)]
pub struct AvatarInfo {
    pub filename: String,
    pub size: i64,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub name: String,
    pub email: String,
    pub age: i64,
    pub plan: String,
    pub avatar: Option<AvatarInfo>,
}
