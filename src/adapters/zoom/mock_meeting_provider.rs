//! Mock meeting provider for testing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::booking::MeetingDetails;
use crate::ports::{MeetingError, MeetingErrorKind, MeetingProvider, MeetingRequest};

/// Records requests and hands out predictable meeting links.
#[derive(Default, Clone)]
pub struct MockMeetingProvider {
    requests: Arc<Mutex<Vec<MeetingRequest>>>,
    error: Arc<Mutex<Option<MeetingError>>>,
    delay: Option<Duration>,
    counter: Arc<AtomicU64>,
}

impl MockMeetingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `kind`.
    pub fn failing(kind: MeetingErrorKind) -> Self {
        let mock = Self::new();
        *mock.error.lock().unwrap() = Some(MeetingError::new(kind, "mock meeting failure"));
        mock
    }

    /// Every call sleeps before answering.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<MeetingRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl MeetingProvider for MockMeetingProvider {
    async fn create_meeting(&self, request: &MeetingRequest) -> Result<MeetingDetails, MeetingError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.error.lock().unwrap().clone() {
            return Err(err);
        }

        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(MeetingDetails {
            join_url: format!("https://zoom.example/j/{}", n),
            host_url: format!("https://zoom.example/s/{}", n),
            meeting_id: n.to_string(),
            passcode: Some("tutor".to_string()),
        })
    }
}
