//! Record lookup
//!
//! A [`RecordSource`] turns one identifier into an [`Outcome`]. Failures never
//! escape a source: they are logged here, once per identifier, and reported as
//! [`Outcome::Absent`].

mod response;


pub use response::{parse_record, strip_bom};

use crate::config::EndpointConfig;
use crate::error::{FetchError, Result};
use crate::types::{Identifier, Outcome, Record};
use async_trait::async_trait;

/// Anything that can look up a record by identifier
///
/// Implementations must be infallible at this boundary: every call yields an
/// outcome. The coordinator depends only on this trait.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Look up the record for `identifier`
    async fn fetch(&self, identifier: &Identifier) -> Outcome;
}

/// [`RecordSource`] backed by an HTTP form POST
///
/// # Examples
///
/// ```no_run
/// use rollno_dl::config::EndpointConfig;
/// use rollno_dl::fetcher::{HttpFetcher, RecordSource};
/// use rollno_dl::types::Identifier;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new(&EndpointConfig {
///     url: "https://results.example.edu/api/student".to_string(),
///     ..Default::default()
/// })?;
///
/// let id = Identifier::new("2100290100").expect("non-empty");
/// let outcome = fetcher.fetch(&id).await;
/// println!("found: {}", outcome.is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
    form_field: String,
    result_key: String,
    echo_field: String,
}

impl HttpFetcher {
    /// Build a fetcher for the given endpoint
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = endpoint.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: endpoint.url.clone(),
            form_field: endpoint.form_field.clone(),
            result_key: endpoint.result_key.clone(),
            echo_field: endpoint.echo_field.clone(),
        })
    }

    /// Single attempt, no retry
    async fn lookup(&self, identifier: &Identifier) -> std::result::Result<Record, FetchError> {
        let response = self
            .client
            .post(&self.url)
            .form(&[(self.form_field.as_str(), identifier.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        parse_record(identifier, &body, &self.result_key, &self.echo_field)
    }
}

#[async_trait]
impl RecordSource for HttpFetcher {
    async fn fetch(&self, identifier: &Identifier) -> Outcome {
        match self.lookup(identifier).await {
            Ok(record) => Outcome::Success(record),
            Err(e) => {
                log_absent(identifier, &e);
                Outcome::Absent
            }
        }
    }
}

/// Write the single log line for a failed lookup
///
/// "No record" responses are warnings; transport and parse failures are errors.
pub(crate) fn log_absent(identifier: &Identifier, error: &FetchError) {
    match error {
        FetchError::EmptyResult(reason) => {
            tracing::warn!(roll_number = %identifier, reason = %reason, "No record, skipping");
        }
        FetchError::Parse { reason, body } => {
            tracing::error!(
                roll_number = %identifier,
                error = %reason,
                response = ?body,
                "Could not decode response"
            );
        }
        FetchError::Transport(message) => {
            tracing::error!(roll_number = %identifier, error = %message, "Lookup failed");
        }
    }
}
