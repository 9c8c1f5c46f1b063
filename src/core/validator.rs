use crate::utils::error::{AppError, Result};
use phonenumber::{country, PhoneNumber};

/// Parses `input` and keeps it only if the phone library considers it a valid number.
///
/// Without a `default_region` the input must start with `+` and a country code.
pub fn validate_number(input: &str, default_region: Option<country::Id>) -> Result<PhoneNumber> {
    let number = phonenumber::parse(default_region, input).map_err(|source| AppError::Parse {
        input: input.to_string(),
        source,
    })?;

    if !phonenumber::is_valid(&number) {
        return Err(AppError::InvalidNumber {
            input: input.to_string(),
        });
    }

    Ok(number)
}
