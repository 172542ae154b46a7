//! Notifier that records instead of sending.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{Notification, NotificationError, Notifier};

#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records and then reports a delivery failure.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.sent.lock().unwrap().iter().map(|n| n.kind()).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(notification);
        if self.fail {
            return Err(NotificationError("recording notifier set to fail".to_string()));
        }
        Ok(())
    }
}
