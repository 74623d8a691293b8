//! Paginated, category-filtered sample browsing on top of [`client_core`].
//!
//! [`reducer`] holds the state machine as plain synchronous transitions that return the
//! fetch to issue, [`orchestration`] runs those fetches on tokio and feeds completions
//! back in.

pub mod events;
pub mod orchestration;
pub mod reducer;

pub use events::{describe_fetch_failure, BrowseEvent, FetchTicket};
pub use orchestration::{Completion, SampleBrowser};
pub use reducer::{reduce, BrowseState, BrowseView, Navigation, PAGE_SIZE};
