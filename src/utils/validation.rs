use crate::utils::error::{AppError, Result};
use phonenumber::country;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_existing_dir(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    if !Path::new(path).is_dir() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Directory does not exist".to_string(),
        });
    }

    Ok(())
}

fn region_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{2}$").expect("region code pattern is valid"))
}

pub fn validate_region_format(field_name: &str, value: &str) -> Result<()> {
    if !region_code_pattern().is_match(value) {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Region code must be two uppercase letters".to_string(),
        });
    }
    Ok(())
}

/// Parses a two-letter region code (`GB`, `IN`, ...) into the phone library's id.
pub fn parse_region_code(field_name: &str, value: &str) -> Result<country::Id> {
    validate_region_format(field_name, value)?;

    value
        .parse::<country::Id>()
        .map_err(|_| AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Unknown region code".to_string(),
        })
}
