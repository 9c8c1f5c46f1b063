use crate::metadata::prefix_map::PrefixMap;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_region_format;
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::io;

/// Zones inside one CSV cell are separated by `&`.
pub const ZONE_SEPARATOR: char = '&';

#[derive(Debug, Deserialize)]
struct TimezoneRow {
    prefix: String,
    zones: String,
}

#[derive(Debug, Deserialize)]
struct CarrierRow {
    prefix: String,
    carrier: String,
}

#[derive(Debug, Deserialize)]
struct GeocodingRow {
    prefix: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct RegionRow {
    region: String,
    name: String,
}

fn read_rows<R: io::Read, T: DeserializeOwned>(reader: R) -> Result<Vec<(u64, T)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: T = record.deserialize(Some(&headers))?;
        rows.push((line, row));
    }
    Ok(rows)
}

fn check_prefix(source_name: &str, line: u64, prefix: &str) -> Result<()> {
    if PrefixMap::<()>::is_valid_prefix(prefix) {
        Ok(())
    } else {
        Err(AppError::Metadata {
            source_name: source_name.to_string(),
            line,
            reason: format!("invalid prefix '{}'", prefix),
        })
    }
}

pub fn load_time_zones<R: io::Read>(source_name: &str, reader: R) -> Result<PrefixMap<Vec<String>>> {
    let mut map = PrefixMap::new();
    for (line, row) in read_rows::<_, TimezoneRow>(reader)? {
        check_prefix(source_name, line, &row.prefix)?;

        let mut zones = Vec::new();
        for zone in row.zones.split(ZONE_SEPARATOR).map(str::trim) {
            if zone.parse::<Tz>().is_err() {
                return Err(AppError::Metadata {
                    source_name: source_name.to_string(),
                    line,
                    reason: format!("unknown time zone '{}'", zone),
                });
            }
            zones.push(zone.to_string());
        }
        map.insert(row.prefix, zones);
    }
    tracing::debug!("Loaded {} time zone prefixes from {}", map.len(), source_name);
    Ok(map)
}

pub fn load_carriers<R: io::Read>(source_name: &str, reader: R) -> Result<PrefixMap<String>> {
    let mut map = PrefixMap::new();
    for (line, row) in read_rows::<_, CarrierRow>(reader)? {
        check_prefix(source_name, line, &row.prefix)?;
        map.insert(row.prefix, row.carrier);
    }
    tracing::debug!("Loaded {} carrier prefixes from {}", map.len(), source_name);
    Ok(map)
}

pub fn load_geocoding<R: io::Read>(source_name: &str, reader: R) -> Result<PrefixMap<String>> {
    let mut map = PrefixMap::new();
    for (line, row) in read_rows::<_, GeocodingRow>(reader)? {
        check_prefix(source_name, line, &row.prefix)?;
        map.insert(row.prefix, row.description);
    }
    tracing::debug!("Loaded {} geocoding prefixes from {}", map.len(), source_name);
    Ok(map)
}

pub fn load_regions<R: io::Read>(source_name: &str, reader: R) -> Result<HashMap<String, String>> {
    let mut names = HashMap::new();
    for (line, row) in read_rows::<_, RegionRow>(reader)? {
        validate_region_format("region", &row.region).map_err(|_| AppError::Metadata {
            source_name: source_name.to_string(),
            line,
            reason: format!("invalid region code '{}'", row.region),
        })?;
        names.insert(row.region, row.name);
    }
    Ok(names)
}
