pub mod processor;
pub mod report;
pub mod utility;
pub mod validator;

pub use crate::domain::model::{BatchSummary, LookupResult};
pub use crate::domain::ports::{ConfigProvider, MetadataSource, ResultStore};
pub use crate::utils::error::Result;
