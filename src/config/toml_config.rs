use crate::adapters::http::{DEFAULT_DATA_SOURCE, DEFAULT_ENDPOINT};
use crate::app::render::ChartKind;
use crate::core::timeline::TimelineOrder;
use crate::core::ConfigProvider;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Dashboard settings. Every table and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub display: DisplayConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub data_source: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_view: ChartKind,
    pub top_n: usize,
    pub default_country_code: String,
    pub chart_width: usize,
    pub timeline_order: TimelineOrder,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_view: ChartKind::Bar,
            top_n: 10,
            default_country_code: "US".to_string(),
            chart_width: 60,
            timeline_order: TimelineOrder::Source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for DashboardConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn data_source(&self) -> &str {
        &self.source.data_source
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_non_empty_string("source.data_source", &self.source.data_source)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 600)?;
        }
        validation::validate_range("display.top_n", self.display.top_n, 1, 500)?;
        validation::validate_range("display.chart_width", self.display.chart_width, 10, 200)?;
        validation::validate_path("export.output_path", &self.export.output_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();

        assert_eq!(config.api_endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.data_source(), "jhu");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.display.top_n, 10);
        assert_eq!(config.display.default_country_code, "US");
        assert_eq!(config.display.default_view, ChartKind::Bar);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
endpoint = "http://localhost:8000"
data_source = "csbs"
timeout_seconds = 15

[display]
default_view = "table"
top_n = 5
default_country_code = "IT"
chart_width = 40
timeline_order = "by_date"

[export]
output_path = "/tmp/covid"
"#;

        let config = DashboardConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), "http://localhost:8000");
        assert_eq!(config.data_source(), "csbs");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.display.default_view, ChartKind::Table);
        assert_eq!(config.display.timeline_order, TimelineOrder::ByDate);
        assert_eq!(config.output_path(), "/tmp/covid");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COVID_DASH_TEST_ENDPOINT", "https://tracker.example.com");

        let config = DashboardConfig::from_toml_str(
            r#"
[source]
endpoint = "${COVID_DASH_TEST_ENDPOINT}"
"#,
        )
        .unwrap();
        assert_eq!(config.api_endpoint(), "https://tracker.example.com");

        std::env::remove_var("COVID_DASH_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let config = DashboardConfig::from_toml_str(
            r#"
[source]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = DashboardConfig::from_toml_str("[display]\ntop_n = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = DashboardConfig::from_toml_str("[source\nendpoint = 1").unwrap_err();
        assert!(matches!(err, DashError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[display]\ndefault_country_code = \"FR\"\n")
            .unwrap();

        let config = DashboardConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.display.default_country_code, "FR");
    }
}
