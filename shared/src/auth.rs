//! Authentication responses and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Public profile of a registered user.
///
/// Never carries the password or its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique display name.
    pub username: String,
    /// Full phone number including country prefix (e.g. "+254712345678").
    pub phone_number: String,
    /// Email address (unique across users).
    pub email: String,
    /// ISO 8601 timestamp when the account was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body returned by both auth routes.
///
/// `success` mirrors the HTTP status class so clients that only look at the
/// body still get the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Machine-readable error code on failure (see [`error_codes`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Profile of the registered or logged-in user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl AuthResponse {
    /// Successful response carrying a profile.
    pub fn ok(message: impl Into<String>, user: UserProfile) -> Self {
        Self {
            success: true,
            message: message.into(),
            code: None,
            user: Some(user),
        }
    }

    /// Failed response built from an API error.
    pub fn failure(error: ApiError) -> Self {
        Self {
            success: false,
            message: error.error,
            code: Some(error.code),
            user: None,
        }
    }
}

/// API error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error} ({code})")]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code (see [`error_codes`]).
    pub code: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }
}

/// Standard API error codes.
pub mod error_codes {
    /// Credentials missing or wrong.
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    /// Request data failed validation (check error message for details).
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    /// Username or email already registered.
    pub const CONFLICT: &str = "CONFLICT";
    /// Hashing or storage failed on the server.
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
