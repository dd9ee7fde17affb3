//! Command-line and environment configuration for the binaries

use crate::config::{Config, EndpointConfig, OutputConfig};
use crate::error::{Error, Result};
use crate::identifiers::{self, IdentifierSource};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for `fetch-students`
///
/// Every option can also be supplied through the environment (a `.env` file in
/// the working directory is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fetch-students",
    version,
    about = "Fetch student records by roll number into an encrypted spreadsheet bundle"
)]
pub struct FetchArgs {
    /// Endpoint receiving one form POST per roll number.
    ///
    /// Environment variable: `API_URL`
    #[arg(long, env = "API_URL")]
    pub api_url: String,

    /// Explicit roll numbers, separated by newlines or commas.
    ///
    /// Environment variable: `ROLL_NUMBERS`
    #[arg(long, env = "ROLL_NUMBERS", conflicts_with = "roll_numbers_range")]
    pub roll_numbers: Option<String>,

    /// Inclusive roll number range, e.g. "2100290100 2100290199".
    ///
    /// Environment variable: `ROLL_NUMBERS_RANGE`
    #[arg(long, env = "ROLL_NUMBERS_RANGE")]
    pub roll_numbers_range: Option<String>,

    /// Maximum lookups in flight at once.
    ///
    /// Environment variable: `CONCURRENT_REQUESTS`
    #[arg(long, env = "CONCURRENT_REQUESTS", default_value_t = 50)]
    pub concurrent_requests: usize,

    /// Password for the output bundle.
    ///
    /// Environment variable: `ENCRYPTION_PASSWORD`
    #[arg(long, env = "ENCRYPTION_PASSWORD", hide_env_values = true)]
    pub encryption_password: Option<String>,

    /// Per-request timeout in seconds (0 disables the timeout).
    ///
    /// Environment variable: `REQUEST_TIMEOUT_SECS`
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Form field carrying the roll number; also the field echoed back.
    ///
    /// Environment variable: `ROLL_NUMBER_FIELD`
    #[arg(long, env = "ROLL_NUMBER_FIELD", default_value = "rollNo")]
    pub roll_number_field: String,

    /// Key of the result object in the JSON response.
    ///
    /// Environment variable: `RESULT_KEY`
    #[arg(long, env = "RESULT_KEY", default_value = "HTML")]
    pub result_key: String,

    /// Warning/error log file.
    ///
    /// Environment variable: `ERROR_LOG_FILE`
    #[arg(long, env = "ERROR_LOG_FILE", default_value = "error_log.txt")]
    pub error_log: PathBuf,

    /// Spreadsheet output.
    ///
    /// Environment variable: `EXCEL_FILE`
    #[arg(long, env = "EXCEL_FILE", default_value = "student_data.xlsx")]
    pub excel_file: PathBuf,

    /// Encrypted bundle output.
    ///
    /// Environment variable: `ZIP_FILE`
    #[arg(long, env = "ZIP_FILE", default_value = "student_data.zip")]
    pub zip_file: PathBuf,
}

impl TryFrom<FetchArgs> for Config {
    type Error = Error;

    fn try_from(args: FetchArgs) -> Result<Self> {
        let identifiers = match (&args.roll_numbers, &args.roll_numbers_range) {
            (Some(list), None) => IdentifierSource::List(identifiers::parse_list(list)?),
            (None, Some(range)) => {
                let (lo, hi) = identifiers::parse_range(range)?;
                IdentifierSource::Range { lo, hi }
            }
            (Some(_), Some(_)) => {
                return Err(Error::config(
                    "ROLL_NUMBERS",
                    "set either ROLL_NUMBERS or ROLL_NUMBERS_RANGE, not both",
                ));
            }
            (None, None) => {
                return Err(Error::config(
                    "ROLL_NUMBERS",
                    "one of ROLL_NUMBERS or ROLL_NUMBERS_RANGE is required",
                ));
            }
        };

        let archive_password = args
            .encryption_password
            .ok_or_else(|| Error::config("ENCRYPTION_PASSWORD", "is required"))?;

        let request_timeout =
            (args.request_timeout_secs > 0).then(|| Duration::from_secs(args.request_timeout_secs));

        let config = Config {
            endpoint: EndpointConfig {
                url: args.api_url,
                form_field: args.roll_number_field.clone(),
                result_key: args.result_key,
                echo_field: args.roll_number_field,
                request_timeout,
            },
            identifiers,
            max_in_flight: args.concurrent_requests,
            archive_password,
            output: OutputConfig {
                table_path: args.excel_file,
                error_log_path: args.error_log,
                archive_path: args.zip_file,
                ..Default::default()
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Settings for `extract-roll-numbers`
#[derive(Parser, Debug, Clone)]
#[command(
    name = "extract-roll-numbers",
    version,
    about = "Extract unique 10-digit roll numbers from free-form text"
)]
pub struct ExtractArgs {
    /// Text file to scan.
    #[arg(long, short, default_value = "data/raw_roll_numbers.txt")]
    pub input: PathBuf,

    /// Output file, one roll number per line.
    #[arg(long, short, default_value = "data/roll_numbers.txt")]
    pub output: PathBuf,
}
