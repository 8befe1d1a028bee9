//! Generation backend abstraction.
//!
//! Defines the `TextGenerator` trait, the minimal capability the pipeline
//! needs from a text-generation backend, plus a deterministic mock used
//! throughout the test suite. Concrete HTTP-backed implementations live in
//! the `providers` module.

use crate::error::LlmError;
use crate::roles::RoleId;
use crate::types::GenerationRequest;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Trait for text-generation backends.
///
/// One call produces one complete raw-text response; no streaming contract.
/// Model identity and temperature are fixed per provider instance, set once
/// at startup.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Perform one generation call and return the raw response text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;

    /// Return the model name.
    fn model_name(&self) -> &str;

    /// Return the sampling temperature.
    fn temperature(&self) -> f32;
}

/// A mock text generator for testing.
///
/// Responses are queued per role (tracks may run in any order), every call
/// is counted, and requests are recorded for inspection. A role with no
/// queued response yields an empty string.
pub struct MockTextGenerator {
    responses: Mutex<HashMap<RoleId, Vec<Result<String, LlmError>>>>,
    delays: Mutex<HashMap<RoleId, Duration>>,
    recorded: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            recorded: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a successful response for a role.
    pub fn queue_response(&self, role: RoleId, text: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .entry(role)
            .or_default()
            .push(Ok(text.into()));
    }

    /// Queue a backend failure for a role.
    pub fn queue_error(&self, role: RoleId, error: LlmError) {
        self.responses
            .lock()
            .unwrap()
            .entry(role)
            .or_default()
            .push(Err(error));
    }

    /// Delay every call for a role, to exercise timeout handling.
    pub fn set_delay(&self, role: RoleId, delay: Duration) {
        self.delays.lock().unwrap().insert(role, delay);
    }

    /// Number of `generate` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests recorded so far, in call order.
    pub fn recorded_requests(&self) -> Vec<GenerationRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().unwrap().push(request.clone());

        let delay = self.delays.lock().unwrap().get(&request.role).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let queued = {
            let mut responses = self.responses.lock().unwrap();
            responses.get_mut(&request.role).and_then(|queue| {
                if queue.is_empty() {
                    None
                } else {
                    Some(queue.remove(0))
                }
            })
        };

        queued.unwrap_or_else(|| Ok(String::new()))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }

    fn temperature(&self) -> f32 {
        0.7
    }
}
