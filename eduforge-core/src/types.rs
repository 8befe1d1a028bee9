//! Core type definitions for the EduForge pipeline.
//!
//! Defines the data model flowing through one pipeline run: the caller's
//! expertise level and topics, the three structured content shapes
//! (materials, quiz, projects), the per-role generation request, and the
//! per-role outcome assembled into the terminal `PipelineResult`.
//!
//! All values are created fresh per run and discarded once the caller
//! consumes the result; nothing here persists across runs.

use crate::roles::RoleId;
use crate::schema::SchemaDescriptor;
use serde::{Deserialize, Serialize};

/// Declared expertise level of the learner. Supplied by the caller,
/// immutable for the duration of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExpertiseLevel {
    pub const ALL: [ExpertiseLevel; 3] = [
        ExpertiseLevel::Beginner,
        ExpertiseLevel::Intermediate,
        ExpertiseLevel::Advanced,
    ];
}

impl std::fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpertiseLevel::Beginner => write!(f, "beginner"),
            ExpertiseLevel::Intermediate => write!(f, "intermediate"),
            ExpertiseLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for ExpertiseLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ExpertiseLevel::Beginner),
            "intermediate" => Ok(ExpertiseLevel::Intermediate),
            "advanced" => Ok(ExpertiseLevel::Advanced),
            other => Err(format!(
                "unknown expertise level '{}' (expected beginner, intermediate, or advanced)",
                other
            )),
        }
    }
}

/// Kind of a curated learning resource.
///
/// Deserialization rejects anything outside this set, so a backend response
/// with an unexpected `type` degrades the whole materials track to raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Video,
    Article,
    Exercise,
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialKind::Video => write!(f, "video"),
            MaterialKind::Article => write!(f, "article"),
            MaterialKind::Exercise => write!(f, "exercise"),
        }
    }
}

/// One curated learning resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningMaterial {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    pub description: String,
}

/// Ordered collection of curated learning resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCollection {
    pub materials: Vec<LearningMaterial>,
}

/// One multiple-choice quiz question.
///
/// `correct_answer` is a zero-based index into `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
}

impl QuizQuestion {
    /// Check the question invariants: at least two options and
    /// `correct_answer` in range. Out-of-range answers are rejected,
    /// never clamped.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.options.len() < 2 {
            return Err(format!(
                "question '{}' has {} option(s), need at least 2",
                self.question,
                self.options.len()
            ));
        }
        if self.correct_answer >= self.options.len() {
            return Err(format!(
                "question '{}' has correct_answer {} out of range for {} options",
                self.question,
                self.correct_answer,
                self.options.len()
            ));
        }
        Ok(())
    }
}

/// Ordered sequence of quiz questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

/// One suggested practical project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectIdea {
    pub title: String,
    pub description: String,
    pub difficulty: ExpertiseLevel,
    /// Free-text duration estimate, e.g. "2-3 days".
    pub estimated_duration: String,
    pub required_skills: Vec<String>,
    pub learning_outcomes: Vec<String>,
}

/// Ordered collection of suggested projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCollection {
    pub projects: Vec<ProjectIdea>,
}

/// One role-scoped generation request. Created per pipeline run,
/// consumed once by the backend, not persisted.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub role: RoleId,
    /// Persona framing sent as the system message.
    pub system_prompt: String,
    /// Task instruction sent as the user message, including the
    /// rendered schema contract.
    pub instruction: String,
    pub schema: SchemaDescriptor,
}

/// Successfully decoded content for one role track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuredContent {
    Materials(MaterialCollection),
    Quiz(Quiz),
    Projects(ProjectCollection),
}

impl StructuredContent {
    pub fn role(&self) -> RoleId {
        match self {
            StructuredContent::Materials(_) => RoleId::Materials,
            StructuredContent::Quiz(_) => RoleId::Quiz,
            StructuredContent::Projects(_) => RoleId::Projects,
        }
    }
}

/// Outcome of one role track: validated structure, or the raw backend
/// text kept for fallback display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Structured(StructuredContent),
    Unparsed { raw: String, detail: String },
}

impl GenerationOutcome {
    /// Create an `Unparsed` outcome.
    pub fn unparsed(raw: impl Into<String>, detail: impl Into<String>) -> Self {
        GenerationOutcome::Unparsed {
            raw: raw.into(),
            detail: detail.into(),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, GenerationOutcome::Structured(_))
    }
}

/// Terminal value of one pipeline run. Immutable once constructed;
/// consumed by the rendering layer, which must handle both variants
/// of every track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub materials: GenerationOutcome,
    pub quiz: GenerationOutcome,
    pub projects: GenerationOutcome,
}

impl PipelineResult {
    /// Access the outcome for a role by identity.
    pub fn outcome(&self, role: RoleId) -> &GenerationOutcome {
        match role {
            RoleId::Materials => &self.materials,
            RoleId::Quiz => &self.quiz,
            RoleId::Projects => &self.projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expertise_level_serde_lowercase() {
        let json = serde_json::to_string(&ExpertiseLevel::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");
        let level: ExpertiseLevel = serde_json::from_str("\"advanced\"").unwrap();
        assert_eq!(level, ExpertiseLevel::Advanced);
    }

    #[test]
    fn test_expertise_level_from_str() {
        assert_eq!(
            "Beginner".parse::<ExpertiseLevel>().unwrap(),
            ExpertiseLevel::Beginner
        );
        assert!("expert".parse::<ExpertiseLevel>().is_err());
    }

    #[test]
    fn test_material_kind_rejects_unknown() {
        let result = serde_json::from_str::<MaterialKind>("\"podcast\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_material_type_field_name() {
        let json = r#"{"title":"t","url":"u","type":"video","description":"d"}"#;
        let material: LearningMaterial = serde_json::from_str(json).unwrap();
        assert_eq!(material.kind, MaterialKind::Video);
    }

    #[test]
    fn test_quiz_question_validate_in_range() {
        let q = QuizQuestion {
            question: "2+2?".into(),
            options: vec!["3".into(), "4".into()],
            correct_answer: 1,
            explanation: "basic arithmetic".into(),
        };
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_quiz_question_validate_out_of_range() {
        let q = QuizQuestion {
            question: "2+2?".into(),
            options: vec!["3".into(), "4".into(), "5".into(), "6".into()],
            correct_answer: 5,
            explanation: "".into(),
        };
        let err = q.validate().unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn test_quiz_question_validate_too_few_options() {
        let q = QuizQuestion {
            question: "only one option".into(),
            options: vec!["yes".into()],
            correct_answer: 0,
            explanation: "".into(),
        };
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_outcome_accessor_preserves_role_identity() {
        let result = PipelineResult {
            materials: GenerationOutcome::unparsed("a", "x"),
            quiz: GenerationOutcome::unparsed("b", "y"),
            projects: GenerationOutcome::unparsed("c", "z"),
        };
        match result.outcome(RoleId::Quiz) {
            GenerationOutcome::Unparsed { raw, .. } => assert_eq!(raw, "b"),
            _ => panic!("expected unparsed"),
        }
    }
}
