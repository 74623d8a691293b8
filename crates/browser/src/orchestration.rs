//! Runs the fetches the reducer asks for and feeds their completions back into it.

use std::sync::Arc;

use client_core::{ClientError, SampleSource, TransportError, SAMPLES_PATH};
use shared::protocol::SamplesPage;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::{
    events::{BrowseEvent, FetchTicket},
    reducer::BrowseState,
};

type FetchResult = (FetchTicket, Result<SamplesPage, ClientError>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Discarded,
}

/// Owns one [`BrowseState`] and the fetches issued on its behalf.
///
/// Fetch tasks run on the ambient tokio runtime and only hand their result back through a
/// [`JoinSet`]; the state itself is touched solely through `&mut self`. Superseded fetches
/// are never cancelled, their results are dropped by the reducer when they arrive. A fetch
/// that panics completes as a transport failure for its own ticket.
pub struct SampleBrowser {
    state: BrowseState,
    source: Arc<dyn SampleSource>,
    tasks: JoinSet<FetchResult>,
}

impl SampleBrowser {
    pub fn new(source: Arc<dyn SampleSource>) -> Self {
        Self::with_state(source, BrowseState::new())
    }

    pub fn with_state(source: Arc<dyn SampleSource>, state: BrowseState) -> Self {
        Self {
            state,
            source,
            tasks: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Applies a user event; returns the ticket of the fetch it started, if any.
    ///
    /// # Panics
    ///
    /// Panics when the event issues a fetch outside a tokio runtime.
    pub fn dispatch(&mut self, event: BrowseEvent) -> Option<FetchTicket> {
        let ticket = self.state.apply(event)?;
        self.spawn_fetch(ticket.clone());
        Some(ticket)
    }

    pub fn mount(&mut self) -> Option<FetchTicket> {
        self.dispatch(BrowseEvent::Mounted)
    }

    pub fn set_category(&mut self, category: Option<String>) -> Option<FetchTicket> {
        self.dispatch(BrowseEvent::CategorySelected(category))
    }

    pub fn set_page(&mut self, page: i64) -> Option<FetchTicket> {
        self.dispatch(BrowseEvent::PageRequested(page))
    }

    pub fn first_page(&mut self) -> Option<FetchTicket> {
        self.dispatch(BrowseEvent::FirstPage)
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        self.dispatch(BrowseEvent::PreviousPage)
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        self.dispatch(BrowseEvent::NextPage)
    }

    pub fn last_page(&mut self) -> Option<FetchTicket> {
        self.dispatch(BrowseEvent::LastPage)
    }

    pub fn refresh(&mut self) -> Option<FetchTicket> {
        self.dispatch(BrowseEvent::Refresh)
    }

    /// Waits for the next fetch to finish and applies it. `None` when nothing is in flight.
    ///
    /// Cancel safe: dropping the future before it resolves loses no result.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        let (ticket, outcome) = match self.tasks.join_next().await? {
            Ok(result) => result,
            Err(err) => {
                // Only reachable if the browser's own task set was aborted.
                warn!(error = %err, "sample fetch task lost");
                return Some(Completion::Discarded);
            }
        };

        let current = ticket.seq == self.state.latest_seq();
        let failed = outcome.is_err();
        self.state
            .apply(BrowseEvent::FetchCompleted { ticket, outcome });

        if current {
            info!(
                page = self.state.page(),
                category = self.state.category().unwrap_or("all"),
                total = self.state.total(),
                failed,
                "sample page updated"
            );
            Some(Completion::Applied)
        } else {
            Some(Completion::Discarded)
        }
    }

    /// Drains every outstanding fetch.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        debug!(
            seq = ticket.seq,
            skip = ticket.query.skip,
            limit = ticket.query.limit,
            category = ticket.query.category.as_deref().unwrap_or("all"),
            "issuing sample fetch"
        );
        let query = ticket.query.clone();
        let fetch = tokio::spawn(async move { source.fetch_samples(&query).await });
        self.tasks.spawn(async move {
            let outcome = match fetch.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(seq = ticket.seq, error = %err, "sample fetch task aborted");
                    Err(TransportError {
                        endpoint: SAMPLES_PATH.to_string(),
                        status: None,
                        message: "fetch task aborted".to_string(),
                    }
                    .into())
                }
            };
            (ticket, outcome)
        });
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
