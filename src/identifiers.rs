//! Identifier sources: explicit lists, numeric ranges, and extraction from free text

use crate::error::{Error, Result};
use crate::types::Identifier;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Width of a roll number in free-form text
pub const ROLL_NUMBER_WIDTH: usize = 10;

#[allow(clippy::expect_used)]
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit run pattern is valid"));

/// Where the identifiers of a run come from
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierSource {
    /// Explicit identifiers, queried in the given order
    List(Vec<Identifier>),
    /// Inclusive numeric range
    Range {
        /// First roll number
        lo: u64,
        /// Last roll number (inclusive)
        hi: u64,
    },
}

impl IdentifierSource {
    /// Produce the ordered identifiers for a run
    pub fn identifiers(&self) -> Result<Vec<Identifier>> {
        match self {
            IdentifierSource::List(ids) => {
                if ids.is_empty() {
                    return Err(Error::config("ROLL_NUMBERS", "no roll numbers given"));
                }
                Ok(ids.clone())
            }
            IdentifierSource::Range { lo, hi } => expand_range(*lo, *hi),
        }
    }
}

/// Split a newline- or comma-delimited list into identifiers
///
/// Tokens are trimmed and blank tokens skipped. Fails if nothing remains.
pub fn parse_list(raw: &str) -> Result<Vec<Identifier>> {
    let ids: Vec<Identifier> = raw
        .split(['\n', ','])
        .filter_map(Identifier::new)
        .collect();

    if ids.is_empty() {
        return Err(Error::config("ROLL_NUMBERS", "no roll numbers given"));
    }
    Ok(ids)
}

/// Parse `"lo hi"`, `"lo,hi"` or `"lo-hi"` into inclusive bounds
pub fn parse_range(raw: &str) -> Result<(u64, u64)> {
    let mut parts: Vec<&str> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();

    // A hyphen is only a separator between two digit groups
    if let [single] = parts.as_slice()
        && let Some((lo, hi)) = (*single).split_once('-')
    {
        parts = vec![lo, hi];
    }

    let [lo, hi] = parts.as_slice() else {
        return Err(Error::config(
            "ROLL_NUMBERS_RANGE",
            format!("expected two bounds, got {:?}", raw),
        ));
    };

    let parse = |s: &str| {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::config(
                "ROLL_NUMBERS_RANGE",
                format!("invalid bound {:?}: expected digits only", s),
            ));
        }
        s.parse::<u64>().map_err(|e| {
            Error::config(
                "ROLL_NUMBERS_RANGE",
                format!("invalid bound {:?}: {}", s, e),
            )
        })
    };

    let (lo, hi) = (parse(lo)?, parse(hi)?);
    if lo > hi {
        return Err(Error::config(
            "ROLL_NUMBERS_RANGE",
            format!("start {} is greater than end {}", lo, hi),
        ));
    }
    Ok((lo, hi))
}

/// Expand inclusive bounds into identifiers, in ascending order
pub fn expand_range(lo: u64, hi: u64) -> Result<Vec<Identifier>> {
    if lo > hi {
        return Err(Error::config(
            "ROLL_NUMBERS_RANGE",
            format!("start {} is greater than end {}", lo, hi),
        ));
    }
    Ok((lo..=hi).map(Identifier::from).collect())
}

/// Extract unique roll numbers from free-form text
///
/// A roll number is a maximal run of exactly [`ROLL_NUMBER_WIDTH`] ASCII
/// digits; longer or shorter runs are ignored. Duplicates are dropped and the
/// result keeps first-occurrence order.
pub fn extract_roll_numbers(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut numbers = Vec::new();

    for m in DIGIT_RUN.find_iter(text) {
        let run = m.as_str();
        if run.len() == ROLL_NUMBER_WIDTH && seen.insert(run) {
            numbers.push(run.to_string());
        }
    }

    tracing::debug!(count = numbers.len(), "Extracted unique roll numbers");
    numbers
}
