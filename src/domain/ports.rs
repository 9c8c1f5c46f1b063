use crate::domain::model::LookupResult;
use crate::utils::error::Result;
use async_trait::async_trait;
use phonenumber::{country, PhoneNumber};

#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn append(&self, result: &LookupResult) -> Result<()>;
}

/// Timezone, carrier and geographic lookups keyed by a parsed number.
pub trait MetadataSource: Send + Sync {
    fn time_zones_for_number(&self, number: &PhoneNumber) -> Result<Vec<String>>;
    fn carrier_name_for_number(&self, number: &PhoneNumber) -> Result<String>;
    fn description_for_number(&self, number: &PhoneNumber) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn results_path(&self) -> &str;
    fn log_path(&self) -> &str;
    fn default_region(&self) -> Result<Option<country::Id>>;
    fn data_dir(&self) -> Option<&str>;
}
