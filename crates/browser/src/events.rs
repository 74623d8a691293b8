//! Browser events, issue-time fetch tickets, and user-facing failure text.

use client_core::ClientError;
use shared::protocol::{SampleQuery, SamplesPage};

/// Identity of one issued sample fetch.
///
/// `seq` is assigned when the fetch is issued and only the ticket carrying the latest
/// `seq` may change the visible state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub page: u32,
    pub category: Option<String>,
    pub query: SampleQuery,
}

#[derive(Debug, Clone)]
pub enum BrowseEvent {
    Mounted,
    CategorySelected(Option<String>),
    PageRequested(i64),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    Refresh,
    FetchCompleted {
        ticket: FetchTicket,
        outcome: Result<SamplesPage, ClientError>,
    },
}

impl BrowseEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BrowseEvent::Mounted => "mounted",
            BrowseEvent::CategorySelected(_) => "category_selected",
            BrowseEvent::PageRequested(_) => "page_requested",
            BrowseEvent::FirstPage => "first_page",
            BrowseEvent::PreviousPage => "previous_page",
            BrowseEvent::NextPage => "next_page",
            BrowseEvent::LastPage => "last_page",
            BrowseEvent::Refresh => "refresh",
            BrowseEvent::FetchCompleted { .. } => "fetch_completed",
        }
    }
}

pub fn describe_fetch_failure(err: &ClientError) -> String {
    match err {
        ClientError::Decode(_) => {
            "Sample data arrived in an unexpected format; the dashboard backend may be out of date."
                .to_string()
        }
        ClientError::Transport(transport) => match transport.status {
            Some(404) => "Sample data is not available on the server (HTTP 404).".to_string(),
            Some(status) if (500..600).contains(&status) => {
                format!("The dashboard server failed to load samples (HTTP {status}); retry shortly.")
            }
            Some(status) => format!("Sample request was rejected (HTTP {status})."),
            None => {
                let lower = transport.message.to_ascii_lowercase();
                if lower.contains("connect")
                    || lower.contains("connection refused")
                    || lower.contains("dns")
                    || lower.contains("timed out")
                {
                    "Dashboard server unreachable; check the API URL and retry.".to_string()
                } else {
                    format!("Failed to load samples: {}", transport.message)
                }
            }
        },
    }
}
