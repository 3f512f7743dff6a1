use crate::error::{AppError, AppResult};

/// Reject empty or oversized required string fields
pub fn validate_required(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.len() > max_len {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

/// Length check for optional string fields
pub fn validate_optional(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(value) = value {
        if value.len() > max_len {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                field, max_len
            )));
        }
    }
    Ok(())
}

/// Minimal email shape check: non-empty local part and a dotted domain
pub fn validate_email(email: &str) -> AppResult<()> {
    let well_formed = email
        .split_once('@')
        .map(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        })
        .unwrap_or(false);

    if !well_formed {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}
