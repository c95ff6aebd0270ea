//! API configuration

use chrono::NaiveDate;
use serde::Deserialize;

use domain_enrollment::EligibilityRules;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Eligibility thresholds
    pub rules: EligibilityRules,
    /// Date ages are computed against; today in Korea when unset
    pub reference_date: Option<NaiveDate>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            rules: EligibilityRules::default(),
            reference_date: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    ///
    /// Variables use the `API_` prefix; nested rule thresholds use `__`, e.g.
    /// `API_RULES__PENSION_WAGE_THRESHOLD=2500000`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
