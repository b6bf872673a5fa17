//! Field rules shared by the registration form and the auth server.

/// Number of local digits in a phone number.
pub const PHONE_DIGITS: usize = 9;

/// Country prefix prepended to the local digits.
pub const COUNTRY_PREFIX: &str = "+254";

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Returns true if `digits` is exactly [`PHONE_DIGITS`] ASCII digits.
pub fn is_valid_phone_digits(digits: &str) -> bool {
    digits.len() == PHONE_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Normalize a phone number to `+254XXXXXXXXX`.
///
/// Accepts either the bare local digits or the already-prefixed form.
/// Returns `None` for anything else.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let digits = raw.strip_prefix(COUNTRY_PREFIX).unwrap_or(raw);
    is_valid_phone_digits(digits).then(|| format!("{COUNTRY_PREFIX}{digits}"))
}

/// Loose email shape check: an `@` followed somewhere by a `.`.
pub fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

/// Returns true if the password meets the length rule.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nine_digit_phone() {
        assert!(is_valid_phone_digits("712345678"));
        assert_eq!(normalize_phone("712345678").as_deref(), Some("+254712345678"));
        assert_eq!(normalize_phone("+254712345678").as_deref(), Some("+254712345678"));
    }

    #[test]
    fn rejects_malformed_phone() {
        assert!(!is_valid_phone_digits("71234567"));
        assert!(!is_valid_phone_digits("7123456789"));
        assert!(!is_valid_phone_digits("71234567a"));
        assert!(normalize_phone("+25571234567").is_none());
        assert!(normalize_phone("").is_none());
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("ab.co"));
        assert!(!looks_like_email("a@bco"));
        assert!(!looks_like_email("@b.co"));
    }

    #[test]
    fn password_length_boundary() {
        assert!(!is_valid_password("1234567"));
        assert!(is_valid_password("12345678"));
    }
}
