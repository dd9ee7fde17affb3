//! Configuration types for rollno-dl

use crate::error::{Error, Result};
use crate::identifiers::IdentifierSource;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Remote endpoint settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// URL that receives one form POST per roll number
    pub url: String,

    /// Form field carrying the roll number (default: "rollNo")
    #[serde(default = "default_roll_number_field")]
    pub form_field: String,

    /// Key of the nested result object in the JSON response (default: "HTML")
    #[serde(default = "default_result_key")]
    pub result_key: String,

    /// Field of the result object that echoes the roll number (default: "rollNo")
    ///
    /// A response without it means "no such record".
    #[serde(default = "default_roll_number_field")]
    pub echo_field: String,

    /// Per-request timeout (default: 30s, None = transport default)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Option<Duration>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            form_field: default_roll_number_field(),
            result_key: default_result_key(),
            echo_field: default_roll_number_field(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Output artifact settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Spreadsheet path (default: "student_data.xlsx")
    #[serde(default = "default_table_path")]
    pub table_path: PathBuf,

    /// Worksheet name (default: "Student Data")
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Plaintext warning/error log (default: "error_log.txt")
    #[serde(default = "default_error_log_path")]
    pub error_log_path: PathBuf,

    /// Encrypted bundle path (default: "student_data.zip")
    #[serde(default = "default_archive_path")]
    pub archive_path: PathBuf,

    /// Deflate level for archive entries, 0-9 (default: 5)
    #[serde(default = "default_compression_level")]
    pub compression_level: i32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table_path: default_table_path(),
            sheet_name: default_sheet_name(),
            error_log_path: default_error_log_path(),
            archive_path: default_archive_path(),
            compression_level: default_compression_level(),
        }
    }
}

/// Main configuration for a [`Collector`](crate::collector::Collector) run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Remote endpoint
    pub endpoint: EndpointConfig,

    /// Roll numbers to query
    pub identifiers: IdentifierSource,

    /// Maximum lookups in flight at once (default: 50)
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Password for the encrypted bundle
    pub archive_password: String,

    /// Output artifacts
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Create a configuration with default settings for everything optional
    pub fn new(
        url: impl Into<String>,
        identifiers: IdentifierSource,
        archive_password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: EndpointConfig {
                url: url.into(),
                ..Default::default()
            },
            identifiers,
            max_in_flight: default_max_in_flight(),
            archive_password: archive_password.into(),
            output: OutputConfig::default(),
        }
    }

    /// Check the settings a run cannot start without
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.endpoint.url).map_err(|e| {
            Error::config(
                "API_URL",
                format!("invalid URL {:?}: {}", self.endpoint.url, e),
            )
        })?;

        if self.max_in_flight == 0 {
            return Err(Error::config("CONCURRENT_REQUESTS", "must be greater than 0"));
        }

        if !(0..=9).contains(&self.output.compression_level) {
            return Err(Error::config(
                "compression_level",
                format!("must be 0-9, got {}", self.output.compression_level),
            ));
        }

        if self.endpoint.form_field.is_empty() {
            return Err(Error::config("ROLL_NUMBER_FIELD", "must not be empty"));
        }

        Ok(())
    }
}

fn default_roll_number_field() -> String {
    "rollNo".to_string()
}

fn default_result_key() -> String {
    "HTML".to_string()
}

fn default_request_timeout() -> Option<Duration> {
    Some(Duration::from_secs(30))
}

fn default_table_path() -> PathBuf {
    PathBuf::from("student_data.xlsx")
}

fn default_sheet_name() -> String {
    "Student Data".to_string()
}

fn default_error_log_path() -> PathBuf {
    PathBuf::from("error_log.txt")
}

fn default_archive_path() -> PathBuf {
    PathBuf::from("student_data.zip")
}

fn default_compression_level() -> i32 {
    5
}

fn default_max_in_flight() -> usize {
    50
}
