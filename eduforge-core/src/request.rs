//! Request builder.
//!
//! Turns (role, topics, expertise level) into one generation request:
//! the persona system prompt, a natural-language instruction with the
//! topics and level embedded verbatim, and the rendered schema contract.
//!
//! Fails fast with `PipelineError::EmptyTopics` when no usable topic is
//! supplied; the orchestrator surfaces that before any backend call.

use crate::error::PipelineError;
use crate::roles::{RoleId, RoleProfile};
use crate::schema::SchemaDescriptor;
use crate::types::{ExpertiseLevel, GenerationRequest};

/// Number of project suggestions requested from the projects role.
///
/// A hard cap baked into the instruction only: if the backend returns a
/// different count, the parser accepts whatever is present.
pub const PROJECT_SUGGESTION_COUNT: usize = 5;

/// Trim topics and drop empty entries, preserving order.
///
/// Returns `EmptyTopics` when nothing usable remains.
pub fn normalize_topics(topics: &[String]) -> Result<Vec<String>, PipelineError> {
    let cleaned: Vec<String> = topics
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if cleaned.is_empty() {
        return Err(PipelineError::EmptyTopics);
    }
    Ok(cleaned)
}

/// Build the generation request for one role.
pub fn build_request(
    profile: &RoleProfile,
    topics: &[String],
    level: ExpertiseLevel,
) -> Result<GenerationRequest, PipelineError> {
    let topics = normalize_topics(topics)?;
    let topic_list = topics.join(", ");
    let schema = SchemaDescriptor::for_role(profile.id);

    let task = match profile.id {
        RoleId::Materials => format!(
            "Find and curate learning materials for the following topics: {topic_list}. \
             The content should be suitable for {level} level. \
             Include a mix of videos, articles, and practical exercises. \
             Ensure all materials are from reputable sources and are current. \
             Include GitHub repositories for practical exercises."
        ),
        RoleId::Quiz => format!(
            "Create a comprehensive quiz for the topics: {topic_list}. \
             The questions should be appropriate for {level} level. \
             Use multiple-choice questions only. \
             Each question must include an explanation for the correct answer."
        ),
        RoleId::Projects => format!(
            "Suggest ONLY the {PROJECT_SUGGESTION_COUNT} best practical project ideas \
             for the topics: {topic_list}. \
             Projects should be suitable for {level} level. \
             Include title, description, difficulty, estimated duration, required skills, \
             and learning outcomes. \
             Prefer projects with recent community activity and include links to relevant \
             documentation. Projects should be engaging and reinforce key concepts."
        ),
    };

    let instruction = format!("{task}\n\n{}", schema.render_instruction());

    Ok(GenerationRequest {
        role: profile.id,
        system_prompt: profile.system_prompt(),
        instruction,
        schema,
    })
}
