//! Field rules shared by the account forms.

#[cfg(test)]
#[path = "form_rules_test.rs"]
mod form_rules_test;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Trimmed email, or the form message.
///
/// # Errors
///
/// Empty input or no `@`.
pub fn require_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim();
    if email.is_empty() {
        return Err("Enter your email.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(email.to_owned())
}

/// Check a new password and its confirmation.
///
/// # Errors
///
/// Too short or mismatched.
pub fn check_new_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(())
}
