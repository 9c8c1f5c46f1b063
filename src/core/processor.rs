use crate::domain::model::LookupResult;
use crate::domain::ports::MetadataSource;
use crate::utils::error::{AppError, Result};
use phonenumber::{Mode, PhoneNumber};

pub fn process_number<M: MetadataSource + ?Sized>(
    number: &PhoneNumber,
    input: &str,
    metadata: &M,
) -> Result<LookupResult> {
    let lookup_failed = |e: AppError| AppError::Lookup {
        number: number.format().mode(Mode::E164).to_string(),
        message: e.to_string(),
    };

    let time_zones = metadata.time_zones_for_number(number).map_err(lookup_failed)?;
    let carrier = metadata.carrier_name_for_number(number).map_err(lookup_failed)?;
    let region = metadata.description_for_number(number).map_err(lookup_failed)?;

    Ok(LookupResult {
        input: input.to_string(),
        number: number.clone(),
        time_zones,
        carrier,
        region,
    })
}
