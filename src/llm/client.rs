//! GenerativeClient trait definition

use async_trait::async_trait;
#[allow(unused_imports)]
use tracing::debug;

use super::{GenerationError, GenerationRequest, GenerationResponse};

/// Stateless generative model client - each call is independent
///
/// This is the boundary to the external generation capability. The client
/// holds credentials and a model identifier; conversation state lives in
/// the session, never here. A call may be slow and may fail; callers decide
/// what a failure means (the rendering workflow and advisory orchestrator
/// both absorb failures into user-facing outcomes).
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send one generation request and wait for the complete response
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError>;
}

/// Scripted mock client for tests and offline development
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use tracing::debug;

    use super::*;

    /// One scripted reply for the mock client
    #[derive(Debug, Clone)]
    pub enum MockReply {
        /// Successful generation with this text
        Text(String),
        /// Successful call that produced no usable content
        Empty,
        /// Remote fault with an HTTP status
        ApiError(u16),
        /// Rate limited with a one-minute retry hint
        RateLimited,
        /// Request timed out
        Timeout,
    }

    impl MockReply {
        fn into_result(self) -> Result<GenerationResponse, GenerationError> {
            match self {
                MockReply::Text(text) => Ok(GenerationResponse { text: Some(text) }),
                MockReply::Empty => Ok(GenerationResponse { text: None }),
                MockReply::ApiError(status) => Err(GenerationError::ApiError {
                    status,
                    message: "mock api error".to_string(),
                }),
                MockReply::RateLimited => Err(GenerationError::RateLimited {
                    retry_after: Duration::from_secs(60),
                }),
                MockReply::Timeout => Err(GenerationError::Timeout(Duration::from_secs(30))),
            }
        }
    }

    /// Replays a fixed script of outcomes and records every request
    ///
    /// Calls past the end of the script replay the last entry, so a
    /// one-entry script behaves as an always-on canned model.
    pub struct MockGenerativeClient {
        script: Vec<MockReply>,
        requests: Mutex<Vec<GenerationRequest>>,
        call_count: AtomicUsize,
    }

    impl MockGenerativeClient {
        pub fn new(script: Vec<MockReply>) -> Self {
            debug!(script_len = %script.len(), "MockGenerativeClient::new: called");
            Self {
                script,
                requests: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        /// Mock that always answers with the same text
        pub fn always_text(text: &str) -> Self {
            Self::new(vec![MockReply::Text(text.to_string())])
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Requests seen so far, in call order
        pub fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().expect("mock lock poisoned").clone()
        }
    }

    #[async_trait]
    impl GenerativeClient for MockGenerativeClient {
        async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
            debug!("MockGenerativeClient::generate: called");
            self.requests.lock().expect("mock lock poisoned").push(request);
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            self.script
                .get(idx)
                .or_else(|| self.script.last())
                .cloned()
                .ok_or_else(|| GenerationError::InvalidResponse("Empty mock script".to_string()))?
                .into_result()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_replays_script_in_order() {
            let client = MockGenerativeClient::new(vec![
                MockReply::Text("first".to_string()),
                MockReply::Text("second".to_string()),
            ]);

            let req = GenerationRequest::from_prompt("hello", 0.7, 256);
            let r1 = client.generate(req.clone()).await.unwrap();
            assert_eq!(r1.text.as_deref(), Some("first"));
            let r2 = client.generate(req.clone()).await.unwrap();
            assert_eq!(r2.text.as_deref(), Some("second"));
            // Past the end of the script, the last entry replays
            let r3 = client.generate(req).await.unwrap();
            assert_eq!(r3.text.as_deref(), Some("second"));
            assert_eq!(client.call_count(), 3);
        }

        #[tokio::test]
        async fn test_mock_scripted_failure() {
            let client = MockGenerativeClient::new(vec![MockReply::ApiError(500)]);
            let req = GenerationRequest::from_prompt("hello", 0.7, 256);
            let err = client.generate(req).await.unwrap_err();
            assert!(matches!(err, GenerationError::ApiError { status: 500, .. }));
        }

        #[tokio::test]
        async fn test_mock_records_requests() {
            let client = MockGenerativeClient::always_text("ok");
            let req = GenerationRequest::from_prompt("describe my kitchen", 0.7, 256);
            client.generate(req).await.unwrap();
            let seen = client.requests();
            assert_eq!(seen.len(), 1);
            assert_eq!(seen[0].messages.len(), 1);
        }

        #[tokio::test]
        async fn test_mock_empty_script_errors() {
            let client = MockGenerativeClient::new(vec![]);
            let req = GenerationRequest::from_prompt("hello", 0.7, 256);
            assert!(client.generate(req).await.is_err());
        }
    }
}
