pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{http::TrackerApiClient, storage::LocalStorage};
pub use app::dashboard::{run_interactive, Dashboard, UiEvent};
pub use app::render::ChartKind;
pub use config::DashboardConfig;
pub use crate::core::{
    aggregator::LocationAggregator,
    engine::ExportEngine,
    export::{ExportOptions, ExportPipeline},
    timeline::{TimelineFetcher, TimelineOrder},
};
pub use domain::model::{CountrySummary, TimelinePoint};
pub use domain::ports::CaseDataSource;
pub use utils::error::{DashError, Result};
