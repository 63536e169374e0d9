//! Recording email sender for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::notification::TemplatedEmail;
use crate::ports::{EmailError, EmailSender};

/// Email sender that keeps every message instead of delivering it.
///
/// Optionally fails every send, for exercising fire-and-forget paths.
#[derive(Clone, Default)]
pub struct RecordingEmailSender {
    inner: Arc<Mutex<RecorderState>>,
}

#[derive(Default)]
struct RecorderState {
    sent: Vec<TemplatedEmail>,
    failure: Option<EmailError>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every `send` fails with `error`. Attempts are still recorded.
    pub fn failing(error: EmailError) -> Self {
        let sender = Self::new();
        sender.inner.lock().unwrap().failure = Some(error);
        sender
    }

    pub fn sent(&self) -> Vec<TemplatedEmail> {
        self.inner.lock().unwrap().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.inner.lock().unwrap().sent.len()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, email: TemplatedEmail) -> Result<(), EmailError> {
        let mut state = self.inner.lock().unwrap();
        state.sent.push(email);
        match &state.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
