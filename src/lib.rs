//! # rollno-dl
//!
//! Fetches student records by roll number from a remote endpoint, collects
//! them into a spreadsheet, and bundles the spreadsheet with the run's error
//! log into a password-protected ZIP.
//!
//! ## Pipeline
//!
//! - **Identifiers** - an explicit list or an inclusive numeric range
//! - **Fetcher** - one form POST per roll number; failures become `Absent`
//! - **Coordinator** - bounded fan-out, one outcome per identifier, input order kept
//! - **Table** - header fixed by the first record, rows written positionally
//! - **Archive** - deterministic ZipCrypto bundle of the log and spreadsheet
//!
//! ## Quick Start
//!
//! ```no_run
//! use rollno_dl::{Collector, Config, IdentifierSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     rollno_dl::logging::init("error_log.txt".as_ref())?;
//!
//!     let mut config = Config::new(
//!         "https://results.example.edu/api/student",
//!         IdentifierSource::Range { lo: 2100290100, hi: 2100290199 },
//!         "archive-password",
//!     );
//!     config.max_in_flight = 20;
//!
//!     let summary = Collector::new(config)?.run().await?;
//!     println!("{} records written to {}", summary.succeeded, summary.table_path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Encrypted bundling
pub mod archive;
/// Command-line configuration
pub mod cli;
/// End-to-end runs
pub mod collector;
/// Configuration types
pub mod config;
/// Bounded concurrent lookups
pub mod coordinator;
/// Error types
pub mod error;
/// Record lookup
pub mod fetcher;
/// Identifier sources and extraction
pub mod identifiers;
/// Error log and console logging
pub mod logging;
/// Spreadsheet assembly
pub mod table;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use archive::Archiver;
pub use collector::Collector;
pub use config::{Config, EndpointConfig, OutputConfig};
pub use coordinator::Coordinator;
pub use error::{ArchiveError, Error, FetchError, Result};
pub use fetcher::{HttpFetcher, RecordSource};
pub use identifiers::IdentifierSource;
pub use table::TableBuilder;
pub use types::{Event, Identifier, Outcome, Record, RunSummary};
