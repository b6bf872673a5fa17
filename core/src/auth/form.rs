//! Client-side registration form checks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aviator_shared::RegisterRequest;
use aviator_shared::validation::{COUNTRY_PREFIX, is_valid_password, is_valid_phone_digits, looks_like_email};

/// First failing check of a registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Username cannot be empty.")]
    EmptyUsername,
    #[error("Phone number must be exactly 9 digits (e.g., 712345678).")]
    InvalidPhone,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least 8 characters long.")]
    PasswordTooShort,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("You must agree to the Terms and Conditions.")]
    TermsNotAccepted,
}

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub username: String,
    /// Local digits only; the country prefix is added on submit.
    pub phone_digits: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
}

impl RegistrationForm {
    /// Run the checks in field order and build the request body.
    pub fn validate(&self) -> Result<RegisterRequest, FormError> {
        let username = self.username.trim();
        let phone = self.phone_digits.trim();
        let email = self.email.trim();

        if username.is_empty() {
            return Err(FormError::EmptyUsername);
        }
        if !is_valid_phone_digits(phone) {
            return Err(FormError::InvalidPhone);
        }
        if !looks_like_email(email) {
            return Err(FormError::InvalidEmail);
        }
        if !is_valid_password(&self.password) {
            return Err(FormError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        if !self.terms_accepted {
            return Err(FormError::TermsNotAccepted);
        }

        Ok(RegisterRequest {
            username: username.to_string(),
            phone_number: format!("{COUNTRY_PREFIX}{phone}"),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
