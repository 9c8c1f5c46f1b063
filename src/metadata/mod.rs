//! Offline timezone, carrier and geocoding tables.
//!
//! Every table is keyed by the E.164 digits of a number (country calling code
//! followed by the national significant number) and answered by longest
//! prefix match. A bundled dataset is compiled into the binary; a data
//! directory can override individual prefixes at startup.

pub mod loader;
pub mod prefix_map;

use crate::domain::ports::MetadataSource;
use crate::utils::error::Result;
use phonenumber::{Mode, PhoneNumber};
use prefix_map::PrefixMap;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

pub const UNKNOWN_TIME_ZONE: &str = "Etc/Unknown";

pub const TIMEZONES_FILE: &str = "timezones.csv";
pub const CARRIERS_FILE: &str = "carriers.csv";
pub const GEOCODING_FILE: &str = "geocoding.csv";
pub const REGIONS_FILE: &str = "regions.csv";

const BUNDLED_TIMEZONES: &str = include_str!("../../data/timezones.csv");
const BUNDLED_CARRIERS: &str = include_str!("../../data/carriers.csv");
const BUNDLED_GEOCODING: &str = include_str!("../../data/geocoding.csv");
const BUNDLED_REGIONS: &str = include_str!("../../data/regions.csv");

#[derive(Debug, Clone, Default)]
pub struct MetadataTables {
    time_zones: PrefixMap<Vec<String>>,
    carriers: PrefixMap<String>,
    geocoding: PrefixMap<String>,
    regions: HashMap<String, String>,
}

impl MetadataTables {
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            time_zones: loader::load_time_zones(TIMEZONES_FILE, BUNDLED_TIMEZONES.as_bytes())?,
            carriers: loader::load_carriers(CARRIERS_FILE, BUNDLED_CARRIERS.as_bytes())?,
            geocoding: loader::load_geocoding(GEOCODING_FILE, BUNDLED_GEOCODING.as_bytes())?,
            regions: loader::load_regions(REGIONS_FILE, BUNDLED_REGIONS.as_bytes())?,
        })
    }

    /// Bundled tables with any of the four CSV files found in `dir` merged on top.
    pub fn with_overrides<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tables = Self::bundled()?;

        let path = dir.join(TIMEZONES_FILE);
        if path.is_file() {
            let name = path.display().to_string();
            tables.time_zones.extend(loader::load_time_zones(&name, File::open(&path)?)?);
        }

        let path = dir.join(CARRIERS_FILE);
        if path.is_file() {
            let name = path.display().to_string();
            tables.carriers.extend(loader::load_carriers(&name, File::open(&path)?)?);
        }

        let path = dir.join(GEOCODING_FILE);
        if path.is_file() {
            let name = path.display().to_string();
            tables.geocoding.extend(loader::load_geocoding(&name, File::open(&path)?)?);
        }

        let path = dir.join(REGIONS_FILE);
        if path.is_file() {
            let name = path.display().to_string();
            tables.regions.extend(loader::load_regions(&name, File::open(&path)?)?);
        }

        tracing::info!("Loaded metadata overrides from {}", dir.display());
        Ok(tables)
    }

    pub fn region_name(&self, region: &str) -> Option<&str> {
        self.regions.get(region).map(String::as_str)
    }
}

fn e164_digits(number: &PhoneNumber) -> String {
    number
        .format()
        .mode(Mode::E164)
        .to_string()
        .trim_start_matches('+')
        .to_string()
}

/// Two-letter region of the number, if the phone library can tell.
pub fn region_code(number: &PhoneNumber) -> Option<String> {
    number.country().id().map(|id| format!("{:?}", id))
}

impl MetadataSource for MetadataTables {
    fn time_zones_for_number(&self, number: &PhoneNumber) -> Result<Vec<String>> {
        let zones = self
            .time_zones
            .longest_match(&e164_digits(number))
            .cloned()
            .unwrap_or_else(|| vec![UNKNOWN_TIME_ZONE.to_string()]);
        Ok(zones)
    }

    fn carrier_name_for_number(&self, number: &PhoneNumber) -> Result<String> {
        Ok(self
            .carriers
            .longest_match(&e164_digits(number))
            .cloned()
            .unwrap_or_default())
    }

    fn description_for_number(&self, number: &PhoneNumber) -> Result<String> {
        if let Some(description) = self.geocoding.longest_match(&e164_digits(number)) {
            return Ok(description.clone());
        }

        // 沒有地區資料時退回國家名稱
        Ok(region_code(number)
            .and_then(|region| self.region_name(&region).map(str::to_string))
            .unwrap_or_default())
    }
}
