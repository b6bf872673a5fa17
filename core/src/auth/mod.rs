//! In-memory account service
//!
//! Registration and login with the same status codes and messages the HTTP
//! routes use. Users live only as long as the service; nothing is persisted.
//! Passwords are hashed before storage and never logged.

mod form;
mod password;

pub use form::{FormError, RegistrationForm};
pub use password::{PasswordError, PasswordHasher};

use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use aviator_shared::constants::{ROUTE_LOGIN, ROUTE_REGISTER};
use aviator_shared::validation::normalize_phone;
use aviator_shared::{ApiError, AuthResponse, LoginRequest, RegisterRequest, UserProfile, error_codes};

/// Account service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// PBKDF2 iteration count for new hashes (default: 10000)
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
}

fn default_hash_iterations() -> u32 {
    10_000
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            hash_iterations: default_hash_iterations(),
        }
    }
}

pub const MSG_REGISTER_MISSING: &str = "Username, password, phone number, and email are required.";
pub const MSG_TAKEN: &str = "Username or email already taken.";
pub const MSG_LOGIN_MISSING: &str = "Username and password are required.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const MSG_REGISTERED: &str = "Registration successful.";
pub const MSG_LOGGED_IN: &str = "Login successful.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("Username or email already taken.")]
    Conflict,
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("{0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status the route answers with.
    pub fn status(&self) -> u16 {
        match self {
            AuthError::Validation(_) | AuthError::InvalidCredentials => 400,
            AuthError::Conflict => 409,
            AuthError::Internal(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => error_codes::VALIDATION_ERROR,
            AuthError::Conflict => error_codes::CONFLICT,
            AuthError::InvalidCredentials => error_codes::UNAUTHORIZED,
            AuthError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        ApiError::new(self.to_string(), self.code())
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

/// The two account routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRoute {
    Register,
    Login,
}

impl AuthRoute {
    pub fn path(self) -> &'static str {
        match self {
            AuthRoute::Register => ROUTE_REGISTER,
            AuthRoute::Login => ROUTE_LOGIN,
        }
    }
}

impl FromStr for AuthRoute {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/') {
            "register" => Ok(AuthRoute::Register),
            "login" => Ok(AuthRoute::Login),
            other => Err(AuthError::Validation(format!("Unknown route: {other}"))),
        }
    }
}

/// Status code plus JSON body of a handled request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub status: u16,
    pub body: AuthResponse,
}

impl AuthOutcome {
    fn success(status: u16, message: &str, user: UserProfile) -> Self {
        Self {
            status,
            body: AuthResponse::ok(message, user),
        }
    }

    fn failure(err: &AuthError) -> Self {
        Self {
            status: err.status(),
            body: AuthResponse::failure(err.to_api_error()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.body.success
    }
}

#[derive(Debug, Clone)]
struct StoredUser {
    profile: UserProfile,
    password_hash: String,
}

/// Users keyed by username, plus a lowercase email index.
#[derive(Debug)]
pub struct AuthService {
    hasher: PasswordHasher,
    users: HashMap<String, StoredUser>,
    emails: HashMap<String, String>,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            hasher: PasswordHasher::new(config.hash_iterations)?,
            users: HashMap::new(),
            emails: HashMap::new(),
        })
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn register(&mut self, request: &RegisterRequest) -> Result<UserProfile, AuthError> {
        let username = request.username.trim();
        let email = request.email.trim();
        let phone = request.phone_number.trim();
        if username.is_empty() || email.is_empty() || phone.is_empty() || request.password.is_empty() {
            return Err(AuthError::Validation(MSG_REGISTER_MISSING.to_string()));
        }

        let Some(phone_number) = normalize_phone(phone) else {
            return Err(AuthError::Validation(
                "Phone number must be 9 digits, optionally prefixed with +254.".to_string(),
            ));
        };

        let email_key = email.to_lowercase();
        if self.users.contains_key(username) || self.emails.contains_key(&email_key) {
            warn!(username, "Registration rejected: username or email taken");
            return Err(AuthError::Conflict);
        }

        let password_hash = self.hasher.hash(&request.password).map_err(|e| {
            error!(username, error = %e, "Password hashing failed");
            AuthError::Internal("Error registering user.".to_string())
        })?;

        let profile = UserProfile {
            username: username.to_string(),
            phone_number,
            email: email.to_string(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        self.emails.insert(email_key, profile.username.clone());
        self.users.insert(
            profile.username.clone(),
            StoredUser {
                profile: profile.clone(),
                password_hash,
            },
        );

        info!(
            username = %profile.username,
            phone = %profile.phone_number,
            email = %profile.email,
            total_users = self.users.len(),
            "New user registered"
        );
        Ok(profile)
    }

    pub fn login(&self, request: &LoginRequest) -> Result<UserProfile, AuthError> {
        let username = request.username.trim();
        if username.is_empty() || request.password.is_empty() {
            return Err(AuthError::Validation(MSG_LOGIN_MISSING.to_string()));
        }

        let Some(user) = self.users.get(username) else {
            warn!(username, reason = "user not found", "Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        let matches = self.hasher.verify(&request.password, &user.password_hash).map_err(|e| {
            error!(username, error = %e, "Stored hash unreadable");
            AuthError::Internal("Error logging in.".to_string())
        })?;
        if !matches {
            warn!(username, reason = "incorrect password", "Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        info!(username, "Login successful");
        Ok(user.profile.clone())
    }

    /// Dispatch a typed request to `route`.
    pub fn handle(&mut self, route: AuthRoute, body: &serde_json::Value) -> AuthOutcome {
        let result = match route {
            AuthRoute::Register => serde_json::from_value::<RegisterRequest>(body.clone())
                .map_err(malformed)
                .and_then(|req| self.register(&req))
                .map(|user| AuthOutcome::success(201, MSG_REGISTERED, user)),
            AuthRoute::Login => serde_json::from_value::<LoginRequest>(body.clone())
                .map_err(malformed)
                .and_then(|req| self.login(&req))
                .map(|user| AuthOutcome::success(200, MSG_LOGGED_IN, user)),
        };
        result.unwrap_or_else(|err| AuthOutcome::failure(&err))
    }

    /// Handle a raw JSON body. Malformed JSON is a 400 validation failure.
    pub fn handle_json(&mut self, route: AuthRoute, body: &str) -> AuthOutcome {
        debug!(route = route.path(), "Handling auth request");
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => self.handle(route, &value),
            Err(e) => AuthOutcome::failure(&malformed(e)),
        }
    }
}

fn malformed(e: serde_json::Error) -> AuthError {
    AuthError::Validation(format!("Malformed request body: {e}"))
}
