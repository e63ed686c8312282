use crate::adapters::{JsonFileProvider, SeedProvider};
use crate::app::report::OutputFormat;
use crate::core::queries::DEFAULT_TOP_LIMIT;
use crate::domain::ports::{DataProvider, QueryDefaults};
use crate::utils::error::{RealtyError, Result};
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_range, validate_required_field, Validate,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub queries: QueriesConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    #[default]
    Seed,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub source: DataSource,
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueriesConfig {
    pub top_limit: Option<usize>,
    pub period_from: Option<NaiveDate>,
    pub period_to: Option<NaiveDate>,
}

impl Default for QueriesConfig {
    fn default() -> Self {
        Self {
            top_limit: Some(DEFAULT_TOP_LIMIT),
            period_from: None,
            period_to: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RealtyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string, expanding `${VAR}` first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RealtyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RealtyError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.data.source == DataSource::Json {
            let path = validate_required_field("data.path", &self.data.path)?;
            validate_path("data.path", path)?;
        }

        if let Some(limit) = self.queries.top_limit {
            validate_positive_number("queries.top_limit", limit, 1)?;
        }

        match (self.queries.period_from, self.queries.period_to) {
            (Some(from), Some(to)) => validate_range("queries.period_from", from, None, Some(to))?,
            (Some(_), None) => {
                return Err(RealtyError::MissingConfigError {
                    field: "queries.period_to".to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(RealtyError::MissingConfigError {
                    field: "queries.period_from".to_string(),
                })
            }
            (None, None) => {}
        }

        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(RealtyError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        Ok(())
    }

    /// Builds the configured data provider.
    pub fn provider(&self) -> Result<Box<dyn DataProvider>> {
        match self.data.source {
            DataSource::Seed => Ok(Box::new(SeedProvider::new())),
            DataSource::Json => {
                let path = validate_required_field("data.path", &self.data.path)?;
                Ok(Box::new(JsonFileProvider::new(path)))
            }
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.format
    }

    pub fn json_logging(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl QueryDefaults for TomlConfig {
    fn top_limit(&self) -> usize {
        self.queries.top_limit.unwrap_or(DEFAULT_TOP_LIMIT)
    }

    fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.queries.period_from.zip(self.queries.period_to)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[data]
source = "json"
path = "./data/agency.json"

[queries]
top_limit = 3
period_from = "2024-01-01"
period_to = "2024-12-31"

[output]
format = "csv"

[logging]
level = "debug"
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data.source, DataSource::Json);
        assert_eq!(config.top_limit(), 3);
        assert_eq!(
            config.period(),
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
            ))
        );
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert!(config.json_logging());
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.data.source, DataSource::Seed);
        assert_eq!(config.top_limit(), DEFAULT_TOP_LIMIT);
        assert_eq!(config.period(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("REALTY_QUERY_TEST_DATA", "/srv/agency.json");

        let toml_content = r#"
[data]
source = "json"
path = "${REALTY_QUERY_TEST_DATA}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data.path.as_deref(), Some("/srv/agency.json"));

        std::env::remove_var("REALTY_QUERY_TEST_DATA");
    }

    #[test]
    fn test_json_source_requires_path() {
        let config = TomlConfig::from_toml_str("[data]\nsource = \"json\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(RealtyError::MissingConfigError { .. })
        ));
        assert!(config.provider().is_err());
    }

    #[test]
    fn test_inverted_period_rejected() {
        let toml_content = r#"
[queries]
period_from = "2025-01-01"
period_to = "2024-01-01"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_half_period_rejected() {
        let config = TomlConfig::from_toml_str("[queries]\nperiod_from = \"2024-01-01\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(RealtyError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_zero_top_limit_rejected() {
        let config = TomlConfig::from_toml_str("[queries]\ntop_limit = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configured_log_level_reaches_filter() {
        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"error\"\n").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            crate::utils::logger::filter_directive(config.log_level(), false),
            "realty_query=error,warn"
        );
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_source_fails_parsing() {
        let result = TomlConfig::from_toml_str("[data]\nsource = \"postgres\"\n");
        assert!(matches!(
            result,
            Err(RealtyError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[output]\nformat = \"json\"\n").unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_format(), OutputFormat::Json);
    }
}
