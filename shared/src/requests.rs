//! Auth request bodies.

use serde::{Deserialize, Serialize};

/// User registration request.
///
/// Missing fields deserialize as empty strings so the server can answer with
/// a validation error instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    /// Display name (must be unique).
    pub username: String,
    /// Phone number, 9 digits with optional "+254" prefix.
    pub phone_number: String,
    /// Email address (must be unique).
    pub email: String,
    /// Password (minimum 8 characters). Never echoed back.
    pub password: String,
}

/// User login request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
