//! Test configuration helpers

use rollno_dl::{Config, IdentifierSource, OutputConfig};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::MockServer;

/// Archive password used by test runs
pub const TEST_PASSWORD: &str = "test-password";

/// Config pointing at `server`, with all outputs inside `dir`
pub fn test_config(server: &MockServer, dir: &TempDir, identifiers: IdentifierSource) -> Config {
    let mut config = Config::new(
        format!("{}{}", server.uri(), super::fixtures::RESULT_PATH),
        identifiers,
        TEST_PASSWORD,
    );
    config.max_in_flight = 2;
    config.endpoint.request_timeout = Some(Duration::from_secs(5));
    config.output = OutputConfig {
        table_path: dir.path().join("student_data.xlsx"),
        error_log_path: dir.path().join("error_log.txt"),
        archive_path: dir.path().join("student_data.zip"),
        ..Default::default()
    };
    config
}
