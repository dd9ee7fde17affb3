//! Response bodies and mock endpoint helpers

use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock endpoint listens on
pub const RESULT_PATH: &str = "/api/result";

/// UTF-8 byte-order mark
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Full record body for `roll_no`
pub fn student_body(roll_no: &str, name: &str, sgpa: f64) -> String {
    format!(
        r#"{{"HTML":{{"rollNo":"{}","name":"{}","branch":"CSE","sgpa":{}}}}}"#,
        roll_no, name, sgpa
    )
}

/// The remote's "no such record" body
pub const EMPTY_RECORD_BODY: &str =
    r#"{"HTML":{"rollNo":null,"name":null,"branch":null,"sgpa":null}}"#;

/// Mount a 200 response for one roll number
pub async fn mount_record(server: &MockServer, roll_no: &str, body: impl Into<Vec<u8>>) {
    Mock::given(method("POST"))
        .and(path(RESULT_PATH))
        .and(body_string(format!("rollNo={}", roll_no)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.into()))
        .mount(server)
        .await;
}

/// Mount an error status for one roll number
pub async fn mount_status(server: &MockServer, roll_no: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path(RESULT_PATH))
        .and(body_string(format!("rollNo={}", roll_no)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// BOM-prefixed copy of `body`
pub fn with_bom(body: &str) -> Vec<u8> {
    let mut bytes = BOM.to_vec();
    bytes.extend_from_slice(body.as_bytes());
    bytes
}
