//! Client-side password validation.
//!
//! Mirrors the backend's hard rules (minimum length) so forms can reject
//! obviously bad input before a round trip, and adds a strength hint for the
//! register and reset views. The backend remains the authority; this only
//! shortens the feedback loop.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

/// Backend-enforced minimum password length.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Result of checking a candidate password.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordValidation {
    pub is_valid: bool,
    /// All violated rules, not just the first one.
    pub errors: Vec<String>,
    pub strength: PasswordStrength,
}

/// Checks hard rules and scores strength from length and character variety.
pub fn validate_password(password: &str) -> PasswordValidation {
    let mut errors = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long."
        ));
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());
    let long_enough = password.chars().count() >= 12;

    let score = [has_lower, has_upper, has_digit, has_symbol, long_enough]
        .iter()
        .filter(|met| **met)
        .count();

    let strength = if errors.is_empty() && score >= 4 {
        PasswordStrength::Strong
    } else if errors.is_empty() && score >= 3 {
        PasswordStrength::Medium
    } else {
        PasswordStrength::Weak
    };

    PasswordValidation {
        is_valid: errors.is_empty(),
        errors,
        strength,
    }
}

/// True when the confirmation matches the password exactly.
pub fn passwords_match(password: &str, confirm: &str) -> bool {
    !password.is_empty() && password == confirm
}
