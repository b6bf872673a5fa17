//! Shared types for the Aviator front end and its auth server.
//!
//! Everything in here crosses the client/server boundary: request and
//! response bodies, error codes, and the field rules both sides agree on.

pub mod auth;
pub mod constants;
pub mod math;
pub mod requests;
pub mod validation;

pub use auth::{ApiError, AuthResponse, UserProfile, error_codes};
pub use math::Point2;
pub use requests::{LoginRequest, RegisterRequest};
