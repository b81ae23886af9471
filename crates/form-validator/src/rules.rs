//! Per-field rules for the signup form.
//!
//! Lengths count Unicode scalar values, not bytes.

use crate::{Field, FieldValidation};
use regex::Regex;
use std::sync::OnceLock;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 100;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username pattern is valid"))
}

/// Shape check only: `local@domain.tld` with no whitespace or extra `@`.
/// Accepts plenty of addresses RFC 5322 would reject.
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Required, 3..=50 characters, ASCII letters/digits/underscore only.
pub fn validate_username(username: &str) -> FieldValidation {
    let len = username.chars().count();

    if username.is_empty() {
        return FieldValidation::invalid(Field::Username, "Username is required");
    }
    if len < USERNAME_MIN_LEN {
        return FieldValidation::invalid(
            Field::Username,
            "Username must be at least 3 characters",
        );
    }
    if len > USERNAME_MAX_LEN {
        return FieldValidation::invalid(
            Field::Username,
            "Username must be less than 50 characters",
        );
    }
    if !username_pattern().is_match(username) {
        return FieldValidation::invalid(
            Field::Username,
            "Username can only contain letters, numbers, and underscores",
        );
    }

    FieldValidation::valid(Field::Username)
}

pub fn validate_email(email: &str) -> FieldValidation {
    if email.is_empty() {
        return FieldValidation::invalid(Field::Email, "Email is required");
    }
    if !email_pattern().is_match(email) {
        return FieldValidation::invalid(Field::Email, "Please enter a valid email address");
    }

    FieldValidation::valid(Field::Email)
}

/// Required, 6..=100 characters.
pub fn validate_password(password: &str) -> FieldValidation {
    let len = password.chars().count();

    if password.is_empty() {
        return FieldValidation::invalid(Field::Password, "Password is required");
    }
    if len < PASSWORD_MIN_LEN {
        return FieldValidation::invalid(
            Field::Password,
            "Password must be at least 6 characters",
        );
    }
    if len > PASSWORD_MAX_LEN {
        return FieldValidation::invalid(
            Field::Password,
            "Password must be less than 100 characters",
        );
    }

    FieldValidation::valid(Field::Password)
}

/// Required and byte-for-byte equal to `password`.
pub fn validate_confirm_password(confirm_password: &str, password: &str) -> FieldValidation {
    if confirm_password.is_empty() {
        return FieldValidation::invalid(Field::ConfirmPassword, "Please confirm your password");
    }
    if confirm_password != password {
        return FieldValidation::invalid(Field::ConfirmPassword, "Passwords do not match");
    }

    FieldValidation::valid(Field::ConfirmPassword)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(v: &FieldValidation) -> &str {
        v.message.as_deref().unwrap_or("")
    }

    #[test]
    fn username_valid_across_length_range() {
        for len in USERNAME_MIN_LEN..=USERNAME_MAX_LEN {
            let name: String = "aZ9_".chars().cycle().take(len).collect();
            let verdict = validate_username(&name);
            assert!(verdict.is_valid, "{name} should be valid");
            assert!(verdict.message.is_none());
        }
    }

    #[test]
    fn username_rules_in_order() {
        assert_eq!(message(&validate_username("")), "Username is required");
        assert_eq!(
            message(&validate_username("ab")),
            "Username must be at least 3 characters"
        );
        assert_eq!(
            message(&validate_username(&"a".repeat(51))),
            "Username must be less than 50 characters"
        );
    }

    #[test]
    fn username_bad_charset_regardless_of_length() {
        let charset = "Username can only contain letters, numbers, and underscores";
        for name in ["abc-def", "has space", "dot.ted", "émile", "tab\tbed", "abc!"] {
            let verdict = validate_username(name);
            assert!(!verdict.is_valid, "{name} should be invalid");
            assert_eq!(message(&verdict), charset);
        }
        // Too short wins over the charset rule.
        assert_eq!(
            message(&validate_username("a-")),
            "Username must be at least 3 characters"
        );
    }

    #[test]
    fn username_length_counts_characters() {
        // 50 multi-byte characters stay within the limit and fail on charset instead.
        let wide = "é".repeat(50);
        assert_eq!(
            message(&validate_username(&wide)),
            "Username can only contain letters, numbers, and underscores"
        );
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("a@b.c").is_valid);
        assert!(validate_email("first.last@shop.example.com").is_valid);

        assert_eq!(message(&validate_email("")), "Email is required");
        for bad in ["ab.c", "a@bc", "@b.c", "a@.c", "a@b.", "a b@c.d", "a@b@c.d"] {
            let verdict = validate_email(bad);
            assert!(!verdict.is_valid, "{bad} should be invalid");
            assert_eq!(message(&verdict), "Please enter a valid email address");
        }
    }

    #[test]
    fn password_lengths() {
        assert_eq!(message(&validate_password("")), "Password is required");
        assert_eq!(
            message(&validate_password("12345")),
            "Password must be at least 6 characters"
        );
        assert!(validate_password("123456").is_valid);
        assert!(validate_password(&"x".repeat(100)).is_valid);
        assert_eq!(
            message(&validate_password(&"x".repeat(101))),
            "Password must be less than 100 characters"
        );
    }

    #[test]
    fn confirm_password() {
        assert_eq!(
            message(&validate_confirm_password("", "x")),
            "Please confirm your password"
        );
        assert_eq!(
            message(&validate_confirm_password("x", "y")),
            "Passwords do not match"
        );
        assert!(validate_confirm_password("x", "x").is_valid);
    }
}
