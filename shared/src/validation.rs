//! Input validation functions
//!
//! Only presence checks live here; format rules for usernames and emails
//! are left to clients.

/// Validate that a required text field is present
pub fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    Ok(())
}

/// Validate registration fields
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), String> {
    validate_required("Username", username)?;
    validate_required("Email", email)?;
    validate_required("Password", password)?;
    // bcrypt silently truncates anything longer
    if password.len() > 72 {
        return Err("Password too long".to_string());
    }
    Ok(())
}
