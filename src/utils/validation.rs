use crate::utils::error::{CrmError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CrmError::invalid_argument(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CrmError::invalid_argument(field_name, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(CrmError::invalid_argument(
            field_name,
            "Path contains null bytes",
        ));
    }

    Ok(())
}

/// Storage keys become file names directly under the storage root, so they
/// must not name a directory or climb out of it.
pub fn validate_storage_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    if key.contains('/') || key.contains('\\') || key.contains("..") || key.contains('\0') {
        return Err(CrmError::invalid_argument(
            field_name,
            format!("'{}' is not a plain document name", key),
        ));
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(CrmError::invalid_argument(
            field_name,
            format!("'{}' is not supported. Allowed values: {}", value, allowed.join(", ")),
        ));
    }
    Ok(())
}
