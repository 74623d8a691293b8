//! Sample browser state machine.

use client_core::ClientError;
use shared::{
    domain::Sample,
    protocol::{SampleQuery, SamplesPage, SAMPLE_PAGE_SIZE},
};
use tracing::debug;

use crate::events::{describe_fetch_failure, BrowseEvent, FetchTicket};

pub const PAGE_SIZE: u32 = SAMPLE_PAGE_SIZE;

/// View state of one sample browser.
///
/// Samples stay in the state while a newer fetch for the same filter is in flight but
/// [`BrowseState::view`] shows the loading state in their place. Changing the category
/// drops samples and total right away since both belong to the previous filter.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
    page: u32,
    category: Option<String>,
    samples: Vec<Sample>,
    total: u64,
    loading: bool,
    error: Option<String>,
    page_size: u32,
    latest_seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigation {
    pub first: bool,
    pub previous: bool,
    pub next: bool,
    pub last: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrowseView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Page {
        samples: &'a [Sample],
        page: u32,
        total_pages: u64,
        total: u64,
    },
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseState {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page: 0,
            category: None,
            samples: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            page_size: page_size.max(1),
            latest_seq: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sequence number of the newest issued fetch, `0` before the first one.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size))
    }

    pub fn navigation(&self) -> Navigation {
        let total_pages = self.total_pages();
        if total_pages == 0 {
            return Navigation::default();
        }
        let has_previous = self.page > 0;
        let has_next = u64::from(self.page) + 1 < total_pages;
        Navigation {
            first: has_previous,
            previous: has_previous,
            next: has_next,
            last: has_next,
        }
    }

    pub fn view(&self) -> BrowseView<'_> {
        if self.loading {
            BrowseView::Loading
        } else if let Some(error) = &self.error {
            BrowseView::Error(error)
        } else if self.total == 0 {
            BrowseView::Empty
        } else {
            BrowseView::Page {
                samples: &self.samples,
                page: self.page,
                total_pages: self.total_pages(),
                total: self.total,
            }
        }
    }

    /// `"page X / Y (N total)"`, or `None` when there is nothing to page through.
    pub fn page_indicator(&self) -> Option<String> {
        let total_pages = self.total_pages();
        (total_pages > 0).then(|| {
            format!(
                "page {} / {} ({} total)",
                u64::from(self.page) + 1,
                total_pages,
                self.total
            )
        })
    }

    /// Applies `event` and returns the fetch that must be issued, if any.
    pub fn apply(&mut self, event: BrowseEvent) -> Option<FetchTicket> {
        debug!(event = event.name(), page = self.page, "browse event");
        match event {
            BrowseEvent::Mounted => {
                self.page = 0;
                self.category = None;
                self.samples.clear();
                self.total = 0;
                Some(self.issue())
            }
            BrowseEvent::CategorySelected(category) => {
                self.category = category.filter(|value| !value.trim().is_empty());
                self.page = 0;
                self.samples.clear();
                self.total = 0;
                Some(self.issue())
            }
            BrowseEvent::PageRequested(page) => self.request_page(page),
            BrowseEvent::FirstPage => {
                let navigation = self.navigation();
                navigation.first.then(|| self.request_page(0)).flatten()
            }
            BrowseEvent::PreviousPage => {
                let navigation = self.navigation();
                navigation
                    .previous
                    .then(|| self.request_page(i64::from(self.page) - 1))
                    .flatten()
            }
            BrowseEvent::NextPage => {
                let navigation = self.navigation();
                navigation
                    .next
                    .then(|| self.request_page(i64::from(self.page) + 1))
                    .flatten()
            }
            BrowseEvent::LastPage => {
                let navigation = self.navigation();
                let last = i64::try_from(self.total_pages()).unwrap_or(i64::MAX) - 1;
                navigation.last.then(|| self.request_page(last)).flatten()
            }
            BrowseEvent::Refresh => Some(self.issue()),
            BrowseEvent::FetchCompleted { ticket, outcome } => {
                self.complete(ticket, outcome);
                None
            }
        }
    }

    fn request_page(&mut self, page: i64) -> Option<FetchTicket> {
        let in_range = u64::try_from(page)
            .ok()
            .filter(|page| *page < self.total_pages())
            .and_then(|page| u32::try_from(page).ok());
        let Some(page) = in_range else {
            debug!(
                requested = page,
                total_pages = self.total_pages(),
                "ignoring out of range page request"
            );
            return None;
        };
        self.page = page;
        Some(self.issue())
    }

    fn issue(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.loading = true;
        self.error = None;
        FetchTicket {
            seq: self.latest_seq,
            page: self.page,
            category: self.category.clone(),
            query: SampleQuery::for_page(self.page, self.page_size, self.category.as_deref()),
        }
    }

    // Every page or category change goes through `issue`, so a matching seq also means
    // the ticket's (page, category) is still the current one.
    fn complete(&mut self, ticket: FetchTicket, outcome: Result<SamplesPage, ClientError>) {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                page = ticket.page,
                "discarding superseded sample fetch"
            );
            return;
        }

        self.loading = false;
        match outcome {
            Ok(page) => {
                self.samples = page.samples;
                self.total = page.total;
                self.error = None;
            }
            Err(err) => {
                self.samples.clear();
                self.error = Some(describe_fetch_failure(&err));
            }
        }
    }
}

/// Value-in, value-out form of [`BrowseState::apply`].
pub fn reduce(mut state: BrowseState, event: BrowseEvent) -> (BrowseState, Option<FetchTicket>) {
    let ticket = state.apply(event);
    (state, ticket)
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
