//! Client-side queue of test cases awaiting submission.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{ClientError, ClientResult, TransportError};
use crate::ports::transport::Transport;
use crate::report::TestCase;

/// Path of the object upload API, relative to the service URL.
pub const OBJECT_API_PATH: &str = "api/v1/object";

/// Result of submitting one test case.
#[derive(Debug)]
pub struct SubmitOutcome {
    /// Whether the service accepted the document.
    pub success: bool,
    /// HTTP status of an accepted document.
    pub status: Option<u16>,
    /// Why the item failed, if it did.
    pub error: Option<ClientError>,
}

impl SubmitOutcome {
    fn accepted(status: u16) -> Self {
        Self { success: true, status: Some(status), error: None }
    }

    fn failed(error: ClientError) -> Self {
        Self { success: false, status: None, error: Some(error) }
    }
}

/// Holds the service location and the test cases to send there.
///
/// Submitting never removes items, so the same container can be submitted
/// again after a partial failure.
#[derive(Debug)]
pub struct SubmissionContainer {
    url: Option<String>,
    timeout: Duration,
    tests: Vec<TestCase>,
}

impl Default for SubmissionContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionContainer {
    /// Creates an empty container with no URL and the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self { url: None, timeout: DEFAULT_TIMEOUT, tests: Vec::new() }
    }

    /// Creates an empty container from a client configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self { url: config.url.clone(), timeout: config.timeout, tests: Vec::new() }
    }

    /// Sets the service base URL. The value is not checked until submission.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    /// Sets the per-request timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Appends a test case.
    pub fn add(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// The queued test cases, in insertion order.
    #[must_use]
    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    /// Mutable access to the queued test cases, e.g. to repair a failed item
    /// before submitting again.
    pub fn tests_mut(&mut self) -> &mut [TestCase] {
        &mut self.tests
    }

    /// The per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the full object upload endpoint.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no URL is set.
    pub fn endpoint(&self) -> ClientResult<String> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ClientError::Configuration("no hippod server URL specified".into()))?;
        let separator = if url.ends_with('/') { "" } else { "/" };
        Ok(format!("{url}{separator}{OBJECT_API_PATH}"))
    }

    /// Submits every queued test case, one after another.
    ///
    /// All documents are built before the first request is made. Each item
    /// gets its own outcome, in queue order: an unbuildable document, a
    /// timeout or a rejected post marks only that item as failed.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no URL is set; nothing is sent then.
    pub async fn submit_all(
        &self,
        transport: &dyn Transport,
    ) -> ClientResult<Vec<SubmitOutcome>> {
        let endpoint = self.endpoint()?;
        let documents: Vec<_> = self.tests.iter().map(TestCase::to_document).collect();

        let mut outcomes = Vec::with_capacity(documents.len());
        for (index, document) in documents.into_iter().enumerate() {
            let document = match document {
                Ok(document) => document,
                Err(err) => {
                    warn!(item = index, error = %err, "report not submitted");
                    outcomes.push(SubmitOutcome::failed(err));
                    continue;
                }
            };
            debug!(item = index, bytes = document.as_bytes().len(), "posting report");

            let post = transport.post(&endpoint, document.into_bytes(), self.timeout);
            let outcome = match tokio::time::timeout(self.timeout, post).await {
                Ok(Ok(receipt)) => {
                    info!(item = index, status = receipt.status, "report accepted");
                    SubmitOutcome::accepted(receipt.status)
                }
                Ok(Err(err)) => {
                    warn!(item = index, error = %err, "report rejected");
                    SubmitOutcome::failed(err.into())
                }
                Err(_) => {
                    warn!(item = index, timeout = ?self.timeout, "report timed out");
                    SubmitOutcome::failed(TransportError::Timeout(self.timeout).into())
                }
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Blocking variant of [`submit_all`](Self::submit_all) for synchronous callers.
    ///
    /// Must not be called from inside an async runtime.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no URL is set or the runtime cannot
    /// be started.
    pub fn submit_all_blocking(
        &self,
        transport: &dyn Transport,
    ) -> ClientResult<Vec<SubmitOutcome>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to start runtime: {e}")))?;
        runtime.block_on(self.submit_all(transport))
    }
}

#[cfg(test)]
mod tests {
    use std::future::pending;
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::adapters::fixed::{FixedClock, ScriptedTransport};
    use crate::context::ServiceContext;
    use crate::ports::transport::{TransportFuture, TransportReceipt};

    fn context() -> ServiceContext {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());
        ServiceContext::fixed(Arc::new(clock), "tester")
    }

    fn test_case(ctx: &ServiceContext, title: &str) -> TestCase {
        let mut test = TestCase::new(ctx);
        test.set_title(title);
        test.set_categories(["team:bar"]).unwrap();
        test
    }

    #[test]
    fn endpoint_joins_api_path() {
        let mut container = SubmissionContainer::new();
        assert!(matches!(container.endpoint(), Err(ClientError::Configuration(_))));

        container.set_url("http://127.0.0.1/");
        assert_eq!(container.endpoint().unwrap(), "http://127.0.0.1/api/v1/object");

        container.set_url("http://127.0.0.1:8080");
        assert_eq!(container.endpoint().unwrap(), "http://127.0.0.1:8080/api/v1/object");
    }

    #[tokio::test]
    async fn submit_without_url_is_a_configuration_error() {
        let ctx = context();
        let mut container = SubmissionContainer::new();
        container.add(test_case(&ctx, "a"));
        let transport = ScriptedTransport::new();

        let err = container.submit_all(&transport).await.unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
        assert!(transport.posts().is_empty());
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_rest() {
        let ctx = context();
        let mut container = SubmissionContainer::new();
        container.set_url("http://hippod");
        for title in ["one", "two", "three"] {
            container.add(test_case(&ctx, title));
        }
        let transport = ScriptedTransport::with_answers(vec![
            Ok(TransportReceipt { status: 200 }),
            Err(TransportError::Status { status: 500, body: "boom".into() }),
            Ok(TransportReceipt { status: 201 }),
        ]);

        let outcomes = container.submit_all(&transport).await.unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].success);
        assert!(!outcomes[1].success);
        assert!(matches!(
            outcomes[1].error,
            Some(ClientError::Transport(TransportError::Status { status: 500, .. }))
        ));
        assert!(outcomes[2].success);
        assert_eq!(outcomes[2].status, Some(201));

        let posts = transport.posts();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].endpoint, "http://hippod/api/v1/object");
        assert_eq!(posts[1].payload, container.tests()[1].to_document().unwrap().into_bytes());
        assert_eq!(container.tests().len(), 3);
    }

    #[tokio::test]
    async fn unbuildable_items_fail_individually() {
        let ctx = context();
        let mut container = SubmissionContainer::new();
        container.set_url("http://hippod/");
        container.add(TestCase::new(&ctx));
        container.add(test_case(&ctx, "ok"));
        let transport = ScriptedTransport::new();

        let outcomes = container.submit_all(&transport).await.unwrap();
        assert!(matches!(outcomes[0].error, Some(ClientError::State(_))));
        assert!(outcomes[1].success);
        assert_eq!(transport.posts().len(), 1);
    }

    #[tokio::test]
    async fn failed_item_can_be_repaired_and_resubmitted() {
        let ctx = context();
        let mut container = SubmissionContainer::new();
        container.set_url("http://hippod");
        container.add(TestCase::new(&ctx));
        container.tests_mut()[0].set_categories(["team:bar"]).unwrap();
        let transport = ScriptedTransport::new();

        let outcomes = container.submit_all(&transport).await.unwrap();
        assert!(matches!(outcomes[0].error, Some(ClientError::State(_))));

        container.tests_mut()[0].set_title("fixed");
        let outcomes = container.submit_all(&transport).await.unwrap();
        assert!(outcomes[0].success);
        assert_eq!(transport.posts().len(), 1);
    }

    struct HangingTransport;

    impl Transport for HangingTransport {
        fn post(
            &self,
            _endpoint: &str,
            _payload: Vec<u8>,
            _timeout: Duration,
        ) -> TransportFuture<'_> {
            Box::pin(pending())
        }
    }

    #[tokio::test]
    async fn slow_transport_times_out_per_item() {
        let ctx = context();
        let mut container = SubmissionContainer::new();
        container.set_url("http://hippod");
        container.set_timeout(Duration::from_millis(20));
        container.add(test_case(&ctx, "slow"));
        container.add(test_case(&ctx, "slower"));

        let outcomes = container.submit_all(&HangingTransport).await.unwrap();
        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            assert!(matches!(
                outcome.error,
                Some(ClientError::Transport(TransportError::Timeout(_)))
            ));
        }
    }

    #[test]
    fn blocking_submission_resubmits_everything() {
        let ctx = context();
        let mut container = SubmissionContainer::from_config(&ClientConfig {
            url: Some("http://hippod".into()),
            timeout: Duration::from_secs(1),
        });
        container.add(test_case(&ctx, "again"));
        let transport = ScriptedTransport::new();

        container.submit_all_blocking(&transport).unwrap();
        container.submit_all_blocking(&transport).unwrap();
        let posts = transport.posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].payload, posts[1].payload);
        assert_eq!(posts[0].timeout, Duration::from_secs(1));
    }
}
