pub mod aggregator;
pub mod engine;
pub mod export;
pub mod timeline;

pub use crate::domain::model::{CountrySummary, Location, TimelinePoint};
pub use crate::domain::ports::{CaseDataSource, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
