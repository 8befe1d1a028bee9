//! Pipeline orchestrator and result aggregation.
//!
//! One run: build the three role requests (fail-fast on invalid input, before
//! any backend call), execute the tracks as independent spawned tasks, join
//! all three, and aggregate per-role outcomes into a `PipelineResult`.
//!
//! Failure policy: only invalid input aborts the run. A backend failure,
//! per-role timeout, or panicked track degrades that track's outcome to
//! `Unparsed` and never touches the other two. Timing out abandons the wait;
//! the backend call itself is not cancelled.

use crate::backend::TextGenerator;
use crate::error::PipelineError;
use crate::grounding::{GroundingProvider, render_hits};
use crate::parser;
use crate::request::build_request;
use crate::roles::{RoleId, RoleRegistry};
use crate::types::{ExpertiseLevel, GenerationOutcome, GenerationRequest, PipelineResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// The content-generation pipeline. Sole call surface for the rendering layer.
pub struct Pipeline {
    registry: RoleRegistry,
    generator: Arc<dyn TextGenerator>,
    grounding: Option<Arc<dyn GroundingProvider>>,
    grounding_max_results: usize,
    role_timeout: Duration,
}

impl Pipeline {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            registry: RoleRegistry::new(),
            generator,
            grounding: None,
            grounding_max_results: 5,
            role_timeout: Duration::from_secs(180),
        }
    }

    /// Attach a grounding capability, consulted for the materials and
    /// projects roles only.
    pub fn with_grounding(
        mut self,
        grounding: Arc<dyn GroundingProvider>,
        max_results: usize,
    ) -> Self {
        self.grounding = Some(grounding);
        self.grounding_max_results = max_results;
        self
    }

    /// Set the maximum wait per role track.
    pub fn with_role_timeout(mut self, timeout: Duration) -> Self {
        self.role_timeout = timeout;
        self
    }

    /// Run the pipeline for the given topics and expertise level.
    pub async fn run(
        &self,
        topics: &[String],
        level: ExpertiseLevel,
    ) -> Result<PipelineResult, PipelineError> {
        // Build all three requests up front so invalid input fails before
        // any backend call is made.
        let mut requests = Vec::with_capacity(RoleId::ALL.len());
        for profile in self.registry.profiles() {
            requests.push(build_request(profile, topics, level)?);
        }

        let grounding_query = topics
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        info!(
            model = self.generator.model_name(),
            level = %level,
            roles = RoleId::ALL.len(),
            "Starting generation run"
        );

        let mut handles = Vec::with_capacity(requests.len());
        for request in requests {
            let role = request.role;
            let generator = Arc::clone(&self.generator);
            let grounding = if role_uses_grounding(role) {
                self.grounding.clone()
            } else {
                None
            };
            let query = grounding_query.clone();
            let max_results = self.grounding_max_results;
            let timeout = self.role_timeout;
            handles.push((
                role,
                tokio::spawn(async move {
                    run_role(generator, grounding, query, max_results, request, timeout).await
                }),
            ));
        }

        let mut materials = None;
        let mut quiz = None;
        let mut projects = None;
        for (role, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                // A panicked track degrades like any other per-role fault.
                Err(e) => {
                    warn!(role = %role, error = %e, "Role task failed to complete");
                    GenerationOutcome::unparsed("", format!("role task failed: {}", e))
                }
            };
            match role {
                RoleId::Materials => materials = Some(outcome),
                RoleId::Quiz => quiz = Some(outcome),
                RoleId::Projects => projects = Some(outcome),
            }
        }

        // All three roles were spawned above, so the slots are filled.
        Ok(aggregate(
            materials.expect("materials track ran"),
            quiz.expect("quiz track ran"),
            projects.expect("projects track ran"),
        ))
    }
}

/// Grounding is consulted for the roles that cite real-world sources.
fn role_uses_grounding(role: RoleId) -> bool {
    matches!(role, RoleId::Materials | RoleId::Projects)
}

/// Execute one role track: optional grounding enrichment, backend call with
/// a wait budget, then parse/validate. Always yields an outcome.
async fn run_role(
    generator: Arc<dyn TextGenerator>,
    grounding: Option<Arc<dyn GroundingProvider>>,
    grounding_query: String,
    max_results: usize,
    mut request: GenerationRequest,
    timeout: Duration,
) -> GenerationOutcome {
    if let Some(grounding) = grounding {
        enrich_request(&mut request, &*grounding, &grounding_query, max_results).await;
    }

    match tokio::time::timeout(timeout, generator.generate(&request)).await {
        Err(_) => {
            warn!(role = %request.role, timeout_secs = timeout.as_secs(), "Backend wait budget exceeded");
            GenerationOutcome::unparsed(
                "",
                format!("backend timed out after {}s", timeout.as_secs()),
            )
        }
        Ok(Err(e)) => {
            warn!(role = %request.role, error = %e, "Backend call failed");
            GenerationOutcome::unparsed("", format!("backend call failed: {}", e))
        }
        Ok(Ok(raw)) => parser::parse(request.role, &raw),
    }
}

/// Append grounding sources to the instruction. Best-effort: failures are
/// logged and the request proceeds unenriched.
async fn enrich_request(
    request: &mut GenerationRequest,
    grounding: &dyn GroundingProvider,
    query: &str,
    max_results: usize,
) {
    match grounding.search(query, max_results).await {
        Ok(hits) if !hits.is_empty() => {
            request.instruction.push_str("\n\n");
            request.instruction.push_str(&render_hits(&hits));
        }
        Ok(_) => {
            info!(role = %request.role, "Grounding returned no sources");
        }
        Err(e) => {
            warn!(role = %request.role, error = %e, "Grounding lookup failed; continuing without sources");
        }
    }
}

/// Assemble the three per-role outcomes into the terminal result.
/// Pure assembly; always succeeds given three outcomes.
pub fn aggregate(
    materials: GenerationOutcome,
    quiz: GenerationOutcome,
    projects: GenerationOutcome,
) -> PipelineResult {
    PipelineResult {
        materials,
        quiz,
        projects,
    }
}
