pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod metadata;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::FileResultStore;
pub use config::Settings;
pub use crate::core::utility::PhoneNumberUtility;
pub use domain::model::{BatchSummary, LookupResult};
pub use domain::ports::{ConfigProvider, MetadataSource, ResultStore};
pub use metadata::MetadataTables;
pub use utils::error::{AppError, Result};
