//! Upstream call orchestrator
//!
//! Given an immutable payload and an ordered candidate list, produce one
//! successful upstream reply or fail terminally. Models are tried strictly
//! in order. Per model, transient failures (timeout, 5xx, network) are
//! retried with a linear backoff inside the retry budget, while a
//! permanent-unavailability signal abandons the model at once. The first
//! success wins: later candidates are never consulted, even if a stronger
//! model appears further down the list.
//!
//! The loop is deliberately sequential. Racing candidates would duplicate
//! billable upstream calls and make the backoff meaningless.

pub mod policy;

pub use policy::CallPolicy;

use crate::ports::chat_transport::{ChatReply, ChatTransport, TransportError};
use std::sync::Arc;
use std::time::Duration;
use explainer_domain::ChatPayload;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end the orchestration without a reply
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("No candidate models configured")]
    NoCandidates,

    /// Every candidate was exhausted without a success. Terminal: the
    /// caller must treat this as "no available endpoint", distinct from
    /// any single transient failure.
    #[error(
        "No available endpoint: {models} models exhausted after {attempts} attempts; \
         last error: {last_error}"
    )]
    AllEndpointsExhausted {
        models: usize,
        attempts: u32,
        last_error: TransportError,
    },
}

/// What the driver loop does after a failed attempt
#[derive(Debug, PartialEq, Eq)]
enum Decision {
    /// Try the same model again after the given backoff delay.
    Retry { delay: Duration },
    /// Abandon the current model and move to the next candidate.
    Advance,
}

/// Decide the next step after attempt `attempt` (0-based) on the current
/// model failed.
///
/// Pure function: all loop-control logic lives here so it can be tested
/// without a transport. The delay is linear in the number of attempts
/// already made — short-lived rate limits are the expected failure mode,
/// so total added latency stays bounded.
fn decide(error: &TransportError, attempt: u32, policy: &CallPolicy) -> Decision {
    if error.is_permanent() || attempt >= policy.retries {
        Decision::Advance
    } else {
        Decision::Retry {
            delay: policy.backoff_step * (attempt + 1),
        }
    }
}

/// Drives the ordered, retrying fallback call sequence
pub struct FallbackOrchestrator {
    transport: Arc<dyn ChatTransport>,
}

impl FallbackOrchestrator {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    /// Produce one successful reply, or fail once every candidate is
    /// exhausted. Advancing to a new model never sleeps; only retries of
    /// the same model back off.
    pub async fn call(
        &self,
        payload: &ChatPayload,
        policy: &CallPolicy,
    ) -> Result<ChatReply, OrchestratorError> {
        let mut total_attempts: u32 = 0;
        let mut last_error: Option<TransportError> = None;

        for model in &policy.candidates {
            let mut attempt: u32 = 0;
            loop {
                total_attempts += 1;
                match self
                    .transport
                    .complete(model, payload, policy.timeout)
                    .await
                {
                    Ok(reply) => {
                        info!(model = %model, attempt, "Upstream call succeeded");
                        return Ok(reply);
                    }
                    Err(error) => match decide(&error, attempt, policy) {
                        Decision::Retry { delay } => {
                            debug!(
                                model = %model,
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                %error,
                                "Transient upstream failure, backing off"
                            );
                            last_error = Some(error);
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                        }
                        Decision::Advance => {
                            warn!(model = %model, attempt, %error, "Abandoning model");
                            last_error = Some(error);
                            break;
                        }
                    },
                }
            }
        }

        match last_error {
            Some(last_error) => Err(OrchestratorError::AllEndpointsExhausted {
                models: policy.candidates.len(),
                attempts: total_attempts,
                last_error,
            }),
            // The loop body never ran: the candidate list was empty.
            None => Err(OrchestratorError::NoCandidates),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use explainer_domain::Model;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Scripted transport: pops one pre-programmed outcome per call and
    /// records which model each call targeted.
    struct MockTransport {
        script: Mutex<VecDeque<Result<ChatReply, TransportError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTransport {
        fn new(script: Vec<Result<ChatReply, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(VecDeque::from(script)),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatTransport for MockTransport {
        async fn complete(
            &self,
            model: &Model,
            _payload: &ChatPayload,
            _timeout: Duration,
        ) -> Result<ChatReply, TransportError> {
            self.calls.lock().unwrap().push(model.to_string());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("script exhausted".to_string())))
        }
    }

    // ==================== Helpers ====================

    fn model(id: &str) -> Model {
        id.parse().unwrap()
    }

    fn reply_from(id: &str) -> ChatReply {
        ChatReply {
            model: model(id),
            body: json!({"choices": [{"message": {"content": "ok"}}]}),
        }
    }

    fn unavailable(id: &str) -> TransportError {
        TransportError::ModelUnavailable {
            model: id.to_string(),
            reason: "No endpoints found".to_string(),
        }
    }

    fn timeout() -> TransportError {
        TransportError::Timeout(Duration::from_secs(30))
    }

    fn server_error() -> TransportError {
        TransportError::UpstreamStatus {
            status: 500,
            message: "internal".to_string(),
        }
    }

    fn policy(candidates: &[&str], retries: u32) -> CallPolicy {
        CallPolicy::default()
            .with_candidates(candidates.iter().map(|id| model(id)).collect())
            .with_retries(retries)
    }

    // ==================== decide() transition tests ====================

    #[test]
    fn test_permanent_error_advances_immediately() {
        let policy = policy(&["a"], 5);
        assert_eq!(
            decide(&unavailable("a"), 0, &policy),
            Decision::Advance
        );
    }

    #[test]
    fn test_transient_error_retries_with_linear_delay() {
        let policy = policy(&["a"], 3);
        assert_eq!(
            decide(&timeout(), 0, &policy),
            Decision::Retry {
                delay: Duration::from_millis(500)
            }
        );
        assert_eq!(
            decide(&server_error(), 1, &policy),
            Decision::Retry {
                delay: Duration::from_millis(1000)
            }
        );
        assert_eq!(
            decide(&timeout(), 2, &policy),
            Decision::Retry {
                delay: Duration::from_millis(1500)
            }
        );
    }

    #[test]
    fn test_exhausted_budget_advances() {
        let policy = policy(&["a"], 2);
        assert_eq!(decide(&timeout(), 2, &policy), Decision::Advance);
    }

    #[test]
    fn test_zero_retries_never_sleeps() {
        let policy = policy(&["a"], 0);
        assert_eq!(decide(&timeout(), 0, &policy), Decision::Advance);
    }

    // ==================== Driver loop tests ====================

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let transport = MockTransport::new(vec![Ok(reply_from("a/one"))]);
        let orchestrator = FallbackOrchestrator::new(transport.clone());

        let reply = orchestrator
            .call(
                &ChatPayload::from_user_prompt("hi"),
                &policy(&["a/one", "b/two", "c/three"], 2),
            )
            .await
            .unwrap();

        assert_eq!(reply.model, model("a/one"));
        // Later candidates must never be contacted.
        assert_eq!(transport.calls(), vec!["a/one"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_chain_permanent_then_transient_then_success() {
        // a/one: permanently unavailable — tried exactly once.
        // b/two: transient failures — tried retries + 1 = 3 times.
        // c/three: succeeds — tried once, result carries its id.
        let transport = MockTransport::new(vec![
            Err(unavailable("a/one")),
            Err(timeout()),
            Err(server_error()),
            Err(timeout()),
            Ok(reply_from("c/three")),
        ]);
        let orchestrator = FallbackOrchestrator::new(transport.clone());

        let reply = orchestrator
            .call(
                &ChatPayload::from_user_prompt("hi"),
                &policy(&["a/one", "b/two", "c/three"], 2),
            )
            .await
            .unwrap();

        assert_eq!(reply.model, model("c/three"));
        assert_eq!(
            transport.calls(),
            vec!["a/one", "b/two", "b/two", "b/two", "c/three"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_models_exhausted_is_terminal() {
        let transport = MockTransport::new(vec![
            Err(timeout()),
            Err(timeout()),
            Err(server_error()),
            Err(server_error()),
        ]);
        let orchestrator = FallbackOrchestrator::new(transport.clone());

        let error = orchestrator
            .call(
                &ChatPayload::from_user_prompt("hi"),
                &policy(&["a/one", "b/two"], 1),
            )
            .await
            .unwrap_err();

        match error {
            OrchestratorError::AllEndpointsExhausted {
                models, attempts, ..
            } => {
                assert_eq!(models, 2);
                assert_eq!(attempts, 4);
            }
            other => panic!("Expected AllEndpointsExhausted, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_is_linear_per_model() {
        // One candidate, retries = 2: delays are 500ms then 1000ms.
        let transport = MockTransport::new(vec![
            Err(timeout()),
            Err(timeout()),
            Err(timeout()),
        ]);
        let orchestrator = FallbackOrchestrator::new(transport);

        let start = tokio::time::Instant::now();
        let _ = orchestrator
            .call(&ChatPayload::from_user_prompt("hi"), &policy(&["a/one"], 2))
            .await;

        assert_eq!(start.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_delay_when_advancing_models() {
        // Both candidates fail once with retries = 0: no sleeps at all.
        let transport = MockTransport::new(vec![Err(timeout()), Err(server_error())]);
        let orchestrator = FallbackOrchestrator::new(transport);

        let start = tokio::time::Instant::now();
        let _ = orchestrator
            .call(
                &ChatPayload::from_user_prompt("hi"),
                &policy(&["a/one", "b/two"], 0),
            )
            .await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_empty_candidates_is_no_candidates() {
        let transport = MockTransport::new(vec![]);
        let orchestrator = FallbackOrchestrator::new(transport.clone());

        let error = orchestrator
            .call(&ChatPayload::from_user_prompt("hi"), &policy(&[], 2))
            .await
            .unwrap_err();

        assert!(matches!(error, OrchestratorError::NoCandidates));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_permanent_failure_spends_no_retry_budget() {
        let transport = MockTransport::new(vec![
            Err(unavailable("a/one")),
            Ok(reply_from("b/two")),
        ]);
        let orchestrator = FallbackOrchestrator::new(transport.clone());

        let reply = orchestrator
            .call(
                &ChatPayload::from_user_prompt("hi"),
                &policy(&["a/one", "b/two"], 5),
            )
            .await
            .unwrap();

        assert_eq!(reply.model, model("b/two"));
        assert_eq!(transport.calls(), vec!["a/one", "b/two"]);
    }
}
