//! Scripted backend for tests and demos.

use super::{BackendError, EnrollOutcome, EnrollToken, RecognitionBackend, UnlockOutcome};
use crate::capture::CapturedImage;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type Scripted<T> = Mutex<VecDeque<Result<T, String>>>;

/// Record of the most recent enroll submission received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollRecord {
    /// Token the submission was scoped to.
    pub token: String,
    /// Submitted name.
    pub name: String,
    /// Submitted image payload size in bytes.
    pub image_bytes: usize,
}

/// In-memory backend that replays scripted responses.
///
/// Each operation pops the next scripted result for its endpoint and
/// counts the call, so tests can assert both outcomes and call counts
/// (including that validation failures make zero network calls).
/// An unscripted call fails as if the backend were unreachable.
#[derive(Debug, Default)]
pub struct MockBackend {
    unlock_script: Scripted<UnlockOutcome>,
    token_script: Scripted<EnrollToken>,
    enroll_script: Scripted<EnrollOutcome>,
    unlock_calls: AtomicUsize,
    token_calls: AtomicUsize,
    enroll_calls: AtomicUsize,
    last_enroll: Mutex<Option<EnrollRecord>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next unlock response.
    pub fn script_unlock(&self, outcome: UnlockOutcome) {
        self.unlock_script.lock().unwrap().push_back(Ok(outcome));
    }

    /// Scripts the next unlock call to fail at the transport layer.
    pub fn script_unlock_failure(&self, message: impl Into<String>) {
        self.unlock_script
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
    }

    /// Scripts the next token issuance.
    pub fn script_token(&self, token: impl Into<String>) {
        self.token_script
            .lock()
            .unwrap()
            .push_back(Ok(EnrollToken::new(token)));
    }

    /// Scripts the next token issuance to fail at the transport layer.
    pub fn script_token_failure(&self, message: impl Into<String>) {
        self.token_script
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
    }

    /// Scripts the next enroll response.
    pub fn script_enroll(&self, outcome: EnrollOutcome) {
        self.enroll_script.lock().unwrap().push_back(Ok(outcome));
    }

    /// Scripts the next enroll call to fail at the transport layer.
    pub fn script_enroll_failure(&self, message: impl Into<String>) {
        self.enroll_script
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
    }

    /// Number of unlock calls received.
    pub fn unlock_calls(&self) -> usize {
        self.unlock_calls.load(Ordering::SeqCst)
    }

    /// Number of token issuance calls received.
    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    /// Number of enroll calls received.
    pub fn enroll_calls(&self) -> usize {
        self.enroll_calls.load(Ordering::SeqCst)
    }

    /// Total calls received across all endpoints.
    pub fn total_calls(&self) -> usize {
        self.unlock_calls() + self.token_calls() + self.enroll_calls()
    }

    /// The most recent enroll submission, if any.
    pub fn last_enroll(&self) -> Option<EnrollRecord> {
        self.last_enroll.lock().unwrap().clone()
    }

    fn next<T>(script: &Scripted<T>) -> Result<T, BackendError> {
        match script.lock().unwrap().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(BackendError::Unavailable(message)),
            None => Err(BackendError::Unavailable(
                "no scripted response".to_string(),
            )),
        }
    }
}

#[async_trait]
impl RecognitionBackend for MockBackend {
    async fn unlock(&self, _image: CapturedImage) -> Result<UnlockOutcome, BackendError> {
        self.unlock_calls.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.unlock_script)
    }

    async fn issue_enroll_token(&self) -> Result<EnrollToken, BackendError> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.token_script)
    }

    async fn enroll(
        &self,
        token: &EnrollToken,
        name: &str,
        image: CapturedImage,
    ) -> Result<EnrollOutcome, BackendError> {
        self.enroll_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_enroll.lock().unwrap() = Some(EnrollRecord {
            token: token.as_str().to_string(),
            name: name.to_string(),
            image_bytes: image.len(),
        });
        Self::next(&self.enroll_script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses_replay_in_order() {
        let backend = MockBackend::new();
        backend.script_unlock(UnlockOutcome::Granted {
            user: "Alice".to_string(),
        });
        backend.script_unlock(UnlockOutcome::Denied);

        let first = backend.unlock(CapturedImage::new(vec![1])).await.unwrap();
        let second = backend.unlock(CapturedImage::new(vec![2])).await.unwrap();

        assert!(matches!(first, UnlockOutcome::Granted { .. }));
        assert_eq!(second, UnlockOutcome::Denied);
        assert_eq!(backend.unlock_calls(), 2);
    }

    #[tokio::test]
    async fn test_unscripted_call_is_unavailable() {
        let backend = MockBackend::new();
        let result = backend.issue_enroll_token().await;
        assert!(matches!(result, Err(BackendError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_enroll_records_submission() {
        let backend = MockBackend::new();
        backend.script_enroll(EnrollOutcome::Unrecognized);

        let token = EnrollToken::new("t-1");
        backend
            .enroll(&token, "Bob", CapturedImage::new(vec![0; 7]))
            .await
            .unwrap();

        let record = backend.last_enroll().expect("recorded");
        assert_eq!(record.token, "t-1");
        assert_eq!(record.name, "Bob");
        assert_eq!(record.image_bytes, 7);
    }
}
