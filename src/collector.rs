//! End-to-end run: identifiers → lookups → spreadsheet → encrypted bundle

use crate::archive::Archiver;
use crate::config::Config;
use crate::coordinator::Coordinator;
use crate::error::{ArchiveError, Result};
use crate::fetcher::{HttpFetcher, RecordSource};
use crate::logging;
use crate::table::TableBuilder;
use crate::types::{Event, Outcome, RunSummary};
use tokio::sync::broadcast;

/// Buffer size for the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Drives one collection run
///
/// # Example
///
/// ```no_run
/// use rollno_dl::{Collector, Config, IdentifierSource};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::new(
///         "https://results.example.edu/api/student",
///         IdentifierSource::Range { lo: 2100290100, hi: 2100290199 },
///         "archive-password",
///     );
///
///     let collector = Collector::new(config)?;
///     let mut events = collector.subscribe();
///     tokio::spawn(async move {
///         while let Ok(event) = events.recv().await {
///             println!("{:?}", event);
///         }
///     });
///
///     let summary = collector.run().await?;
///     println!("{} of {} found", summary.succeeded, summary.total);
///     Ok(())
/// }
/// ```
pub struct Collector {
    config: Config,
    event_tx: broadcast::Sender<Event>,
}

impl Collector {
    /// Validate `config` and prepare a collector
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self { config, event_tx })
    }

    /// Subscribe to run events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// The validated configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run against the configured HTTP endpoint
    pub async fn run(&self) -> Result<RunSummary> {
        let fetcher = HttpFetcher::new(&self.config.endpoint)?;
        self.run_with(&fetcher).await
    }

    /// Run against any record source
    ///
    /// Fatal problems (bad identifiers, empty password, unwritable outputs)
    /// end the run with an error. Individual lookups never do.
    pub async fn run_with<S>(&self, source: &S) -> Result<RunSummary>
    where
        S: RecordSource + ?Sized,
    {
        let identifiers = self.config.identifiers.identifiers()?;
        if self.config.archive_password.is_empty() {
            return Err(ArchiveError::EmptyPassword.into());
        }
        let output = &self.config.output;

        let outcomes = Coordinator::new(self.config.max_in_flight)
            .with_events(self.event_tx.clone())
            .run_all(source, &identifiers)
            .await;
        let total = outcomes.len();

        let mut table = TableBuilder::new();
        for record in outcomes.into_iter().filter_map(Outcome::into_record) {
            table.append(&record);
        }
        let succeeded = table.len();

        let table_path = table.finalize(&output.table_path, &output.sheet_name)?;
        self.emit(Event::TableWritten {
            path: table_path.clone(),
            rows: succeeded,
        });

        // A clean run may never have opened the log
        logging::open_error_log(&output.error_log_path)?;

        let archive_path = Archiver::new(output.compression_level).bundle(
            &[output.error_log_path.clone(), table_path.clone()],
            &self.config.archive_password,
            &output.archive_path,
        )?;
        self.emit(Event::Archived {
            path: archive_path.clone(),
        });

        Ok(RunSummary {
            total,
            succeeded,
            absent: total - succeeded,
            table_path,
            archive_path,
        })
    }

    fn emit(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}
