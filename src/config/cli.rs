use crate::app::render::ChartKind;
use crate::config::toml_config::DashboardConfig;
use crate::core::timeline::TimelineOrder;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "covid-dash")]
#[command(about = "Terminal dashboard for COVID-19 case statistics")]
pub struct CliConfig {
    /// Base URL of the coronavirus-tracker API
    #[arg(long, global = true)]
    pub api_endpoint: Option<String>,

    /// Upstream data source (jhu, csbs, nyt)
    #[arg(long, global = true)]
    pub data_source: Option<String>,

    /// Per-request timeout; the HTTP client default applies when unset
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Per-country totals as a bar chart, scatter chart or table
    Summary {
        #[arg(long, value_enum)]
        view: Option<ChartKind>,

        /// Only show the top countries
        #[arg(long)]
        top: bool,
    },
    /// Daily confirmed and deaths counts for one country code
    Timeline {
        country_code: String,

        #[arg(long, value_enum)]
        order: Option<TimelineOrder>,
    },
    /// Write the summary table (and optionally a timeline) to a zip archive
    Export {
        #[arg(long)]
        country_code: Option<String>,

        #[arg(long)]
        top: Option<usize>,

        #[arg(long)]
        output_path: Option<String>,
    },
    /// Read dashboard events from stdin
    Interactive,
}

impl CliConfig {
    /// Loads the configuration file, if any, and applies the flags given on the command line.
    pub fn resolve(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_file(path)?,
            None => DashboardConfig::default(),
        };

        if let Some(endpoint) = &self.api_endpoint {
            config.source.endpoint = endpoint.clone();
        }
        if let Some(data_source) = &self.data_source {
            config.source.data_source = data_source.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.source.timeout_seconds = Some(timeout);
        }

        match &self.command {
            Command::Summary {
                view: Some(view), ..
            } => config.display.default_view = *view,
            Command::Timeline {
                order: Some(order), ..
            } => config.display.timeline_order = *order,
            Command::Export {
                output_path: Some(output_path),
                ..
            } => config.export.output_path = output_path.clone(),
            _ => {}
        }

        Ok(config)
    }
}
