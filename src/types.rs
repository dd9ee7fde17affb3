//! Core types for rollno-dl

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Roll number used to look up one student's record
///
/// Always a non-empty token. Construct through [`Identifier::new`] or the
/// helpers in [`crate::identifiers`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Create an identifier from a trimmed token, or `None` if it is empty
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Identifier {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured result for one identifier
///
/// Field order is the order in which the remote returned them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    identifier: Identifier,
    fields: Map<String, Value>,
}

impl Record {
    /// Create a record for `identifier` from the remote's result object
    pub fn new(identifier: Identifier, fields: Map<String, Value>) -> Self {
        Self { identifier, fields }
    }

    /// The identifier this record was fetched for
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Field names in response order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Look up one field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Per-identifier result of a fetch attempt
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The remote returned a record
    Success(Record),
    /// No record; the reason was logged by the fetcher
    Absent,
}

impl Outcome {
    /// Whether this outcome carries a record
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Take the record out of a successful outcome
    pub fn into_record(self) -> Option<Record> {
        match self {
            Outcome::Success(record) => Some(record),
            Outcome::Absent => None,
        }
    }
}

/// Event emitted during a run
///
/// Consumers receive these through
/// [`Collector::subscribe`](crate::collector::Collector::subscribe).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Lookups are about to be issued
    FetchStarted {
        /// Number of identifiers in the run
        total: usize,
    },

    /// One more lookup finished
    Progress {
        /// Lookups finished so far
        completed: usize,
        /// Number of identifiers in the run
        total: usize,
    },

    /// Every lookup has produced an outcome
    FetchComplete {
        /// Lookups that returned a record
        succeeded: usize,
        /// Lookups that were absent
        absent: usize,
    },

    /// Spreadsheet written to disk
    TableWritten {
        /// Spreadsheet path
        path: PathBuf,
        /// Data rows, excluding the header
        rows: usize,
    },

    /// Encrypted bundle written to disk
    Archived {
        /// Archive path
        path: PathBuf,
    },
}

/// Summary of a finished run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    /// Number of identifiers attempted
    pub total: usize,
    /// Lookups that returned a record
    pub succeeded: usize,
    /// Lookups that were absent
    pub absent: usize,
    /// Spreadsheet path
    pub table_path: PathBuf,
    /// Archive path
    pub archive_path: PathBuf,
}
