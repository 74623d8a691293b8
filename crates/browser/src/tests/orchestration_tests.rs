use super::*;

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use client_core::TransportError;
use shared::{
    domain::{ClipId, MediaType, Sample},
    protocol::SampleQuery,
};
use tokio::sync::oneshot;

use crate::reducer::{BrowseView, PAGE_SIZE};

type Gate = oneshot::Sender<Result<SamplesPage, ClientError>>;

/// Holds every request until the test releases it.
#[derive(Default)]
struct GatedSource {
    pending: Mutex<Vec<(SampleQuery, Gate)>>,
}

impl GatedSource {
    async fn wait_for_requests(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.pending.lock().expect("lock").len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("requests never reached the source");
    }

    fn release(&self, skip: u64, outcome: Result<SamplesPage, ClientError>) {
        let mut pending = self.pending.lock().expect("lock");
        let index = pending
            .iter()
            .position(|(query, _)| query.skip == skip)
            .expect("pending request for skip");
        let (_, gate) = pending.remove(index);
        let _ = gate.send(outcome);
    }
}

#[async_trait]
impl SampleSource for GatedSource {
    async fn fetch_samples(&self, query: &SampleQuery) -> Result<SamplesPage, ClientError> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().expect("lock").push((query.clone(), tx));
        rx.await.unwrap_or_else(|_| {
            Err(TransportError {
                endpoint: "/api/validation/samples".to_string(),
                status: None,
                message: "gate dropped".to_string(),
            }
            .into())
        })
    }
}

/// Answers from a fixed dataset the way the backend does: filter, count, then slice.
struct InMemorySource {
    rows: Vec<Sample>,
    queries: Mutex<Vec<SampleQuery>>,
}

impl InMemorySource {
    fn new(rows: Vec<Sample>) -> Self {
        Self {
            rows,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SampleSource for InMemorySource {
    async fn fetch_samples(&self, query: &SampleQuery) -> Result<SamplesPage, ClientError> {
        self.queries.lock().expect("lock").push(query.clone());
        let matching: Vec<&Sample> = self
            .rows
            .iter()
            .filter(|row| query.category.as_deref().map_or(true, |c| row.category == c))
            .collect();
        let samples = matching
            .iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .map(|row| (*row).clone())
            .collect();
        Ok(SamplesPage::new(samples, matching.len() as u64))
    }
}

fn sample(id: usize, category: &str) -> Sample {
    Sample {
        clip_id: ClipId(format!("clip-{id}")),
        media_type: MediaType::Image,
        file_path: format!("/data/clip-{id}.png"),
        caption: format!("caption {id}"),
        resolution: "1024x768".to_string(),
        length: String::new(),
        category: category.to_string(),
        keyword: String::new(),
    }
}

fn dataset() -> Vec<Sample> {
    (0..57)
        .map(|id| {
            let category = match id % 3 {
                0 => "뉴스",
                1 => "드라마",
                _ => "예능",
            };
            sample(id, category)
        })
        .collect()
}

fn page_with_marker(marker: &str, total: u64) -> SamplesPage {
    SamplesPage::new(vec![sample(0, marker)], total)
}

#[tokio::test]
async fn mount_then_page_through_in_memory_dataset() {
    let source = Arc::new(InMemorySource::new(dataset()));
    let mut browser = SampleBrowser::new(source.clone());

    browser.mount();
    browser.settle().await;
    assert_eq!(browser.state().total_pages(), 3);
    assert_eq!(browser.state().samples().len(), PAGE_SIZE as usize);

    browser.set_page(2).expect("page 2 in range");
    browser.settle().await;

    assert_eq!(browser.state().samples().len(), 17);
    let queries = source.queries.lock().expect("lock");
    assert_eq!(
        queries.last(),
        Some(&SampleQuery {
            skip: 40,
            limit: 20,
            category: None,
        })
    );
}

#[tokio::test]
async fn filtered_pages_only_contain_the_selected_category() {
    let source = Arc::new(InMemorySource::new(dataset()));
    let mut browser = SampleBrowser::new(source);
    browser.mount();
    browser.settle().await;
    browser.set_page(1);
    browser.settle().await;

    browser.set_category(Some("드라마".to_string()));
    browser.settle().await;

    let state = browser.state();
    assert_eq!(state.page(), 0);
    assert_eq!(state.total(), 19);
    assert!(state.samples().len() <= PAGE_SIZE as usize);
    assert!(state.samples().iter().all(|s| s.category == "드라마"));
}

#[tokio::test]
async fn out_of_order_responses_keep_the_newest_page() {
    let source = Arc::new(GatedSource::default());
    let mut browser = SampleBrowser::new(source.clone());

    browser.mount();
    source.wait_for_requests(1).await;
    source.release(0, Ok(page_with_marker("initial", 57)));
    assert_eq!(browser.next_completion().await, Some(Completion::Applied));

    browser.set_page(0).expect("r1");
    browser.set_page(1).expect("r2");
    source.wait_for_requests(2).await;

    source.release(20, Ok(page_with_marker("page-1", 57)));
    assert_eq!(browser.next_completion().await, Some(Completion::Applied));
    source.release(0, Ok(page_with_marker("page-0", 57)));
    assert_eq!(browser.next_completion().await, Some(Completion::Discarded));
    assert_eq!(browser.next_completion().await, None);

    let state = browser.state();
    assert_eq!(state.page(), 1);
    assert_eq!(state.samples()[0].category, "page-1");
    assert!(!state.is_loading());
}

#[tokio::test]
async fn transport_failure_is_recovered_into_error_view() {
    let source = Arc::new(GatedSource::default());
    let mut browser = SampleBrowser::new(source.clone());

    browser.mount();
    source.wait_for_requests(1).await;
    source.release(
        0,
        Err(TransportError {
            endpoint: "/api/validation/samples".to_string(),
            status: Some(500),
            message: "Internal Server Error".to_string(),
        }
        .into()),
    );
    browser.settle().await;

    let state = browser.state();
    assert!(!state.is_loading());
    assert!(matches!(state.view(), BrowseView::Error(message) if message.contains("HTTP 500")));

    browser.refresh().expect("retry");
    source.wait_for_requests(1).await;
    source.release(0, Ok(page_with_marker("recovered", 3)));
    browser.settle().await;
    assert_eq!(browser.state().error(), None);
    assert_eq!(browser.state().total(), 3);
}

#[tokio::test]
async fn rejected_navigation_issues_no_fetch() {
    let source = Arc::new(InMemorySource::new(dataset()));
    let mut browser = SampleBrowser::new(source.clone());
    browser.mount();
    browser.settle().await;

    assert!(browser.set_page(-1).is_none());
    assert!(browser.set_page(3).is_none());
    assert!(browser.previous_page().is_none());
    assert_eq!(browser.in_flight(), 0);
    assert_eq!(source.queries.lock().expect("lock").len(), 1);
}

struct PanickingSource;

#[async_trait]
impl SampleSource for PanickingSource {
    async fn fetch_samples(&self, _query: &SampleQuery) -> Result<SamplesPage, ClientError> {
        panic!("sample source blew up");
    }
}

#[tokio::test]
async fn panicking_fetch_completes_as_error() {
    let mut browser = SampleBrowser::new(Arc::new(PanickingSource));
    browser.mount().expect("mount issues a fetch");

    tokio::time::timeout(Duration::from_secs(5), browser.settle())
        .await
        .expect("settle returns after a panicking fetch");

    let state = browser.state();
    assert_eq!(browser.in_flight(), 0);
    assert!(!state.is_loading());
    assert!(
        matches!(state.view(), BrowseView::Error(message) if message.contains("fetch task aborted"))
    );
}

#[test]
#[should_panic]
fn dispatch_outside_runtime_panics() {
    let mut browser = SampleBrowser::new(Arc::new(InMemorySource::new(dataset())));
    browser.mount();
}
