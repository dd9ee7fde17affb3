//! Bounded fan-out of record lookups
//!
//! Every identifier is looked up exactly once, with at most `max_in_flight`
//! lookups outstanding. Lookups are admitted in input order as slots free up.
//! A failed lookup only affects its own outcome; siblings keep running.

use crate::fetcher::RecordSource;
use crate::types::{Event, Identifier, Outcome};
use futures::stream::{self, StreamExt};
use tokio::sync::broadcast;

/// Default number of lookups in flight at once
pub const DEFAULT_MAX_IN_FLIGHT: usize = 50;

/// Runs a [`RecordSource`] over many identifiers
#[derive(Clone, Debug)]
pub struct Coordinator {
    max_in_flight: usize,
    event_tx: Option<broadcast::Sender<Event>>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IN_FLIGHT)
    }
}

impl Coordinator {
    /// Create a coordinator; a bound of 0 is treated as 1
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
            event_tx: None,
        }
    }

    /// Report progress on the given event channel
    pub fn with_events(mut self, event_tx: broadcast::Sender<Event>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Upper bound on concurrent lookups
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Look up every identifier and return one outcome per identifier
    ///
    /// Outcomes are returned in input order regardless of completion order.
    pub async fn run_all<S>(&self, source: &S, identifiers: &[Identifier]) -> Vec<Outcome>
    where
        S: RecordSource + ?Sized,
    {
        let total = identifiers.len();
        tracing::info!(
            total,
            max_in_flight = self.max_in_flight,
            "Fetching records"
        );
        self.emit(Event::FetchStarted { total });

        let mut slots: Vec<Option<Outcome>> = vec![None; total];
        let mut completed = 0usize;
        let mut succeeded = 0usize;

        let mut pending = stream::iter(identifiers.iter().enumerate())
            .map(move |(index, identifier)| async move {
                (index, source.fetch(identifier).await)
            })
            .buffer_unordered(self.max_in_flight);

        while let Some((index, outcome)) = pending.next().await {
            completed += 1;
            if outcome.is_success() {
                succeeded += 1;
            }
            tracing::debug!(
                roll_number = %identifiers[index],
                found = outcome.is_success(),
                completed,
                total,
                "Lookup finished"
            );
            slots[index] = Some(outcome);
            self.emit(Event::Progress { completed, total });
        }

        let absent = total - succeeded;
        tracing::info!(total, succeeded, absent, "All lookups finished");
        self.emit(Event::FetchComplete { succeeded, absent });

        // buffer_unordered yields every future exactly once, so no slot stays empty
        slots
            .into_iter()
            .map(|slot| slot.unwrap_or(Outcome::Absent))
            .collect()
    }

    fn emit(&self, event: Event) {
        if let Some(tx) = &self.event_tx {
            // No subscribers is fine
            tx.send(event).ok();
        }
    }
}
