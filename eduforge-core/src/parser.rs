//! Response parser/validator.
//!
//! Decodes raw backend text against the role's expected shape. This is the
//! pipeline's core robustness contract: non-conformant output degrades to an
//! `Unparsed` outcome carrying the original raw text for fallback display,
//! and parsing never returns an error to the caller.
//!
//! Tolerances: the collection may arrive wrapped under its root key or as a
//! bare top-level array, and one layer of markdown code fences is stripped
//! before decoding (local models habitually wrap JSON in ``` blocks).

use crate::roles::RoleId;
use crate::schema::SchemaDescriptor;
use crate::types::{
    GenerationOutcome, LearningMaterial, MaterialCollection, ProjectCollection, ProjectIdea,
    Quiz, QuizQuestion, StructuredContent,
};
use serde_json::Value;
use tracing::debug;

/// Parse one raw backend response into the outcome for its role track.
pub fn parse(role: RoleId, raw: &str) -> GenerationOutcome {
    let cleaned = strip_code_fences(raw.trim());
    if cleaned.is_empty() {
        return GenerationOutcome::unparsed(raw, "empty response");
    }

    let value: Value = match serde_json::from_str(cleaned) {
        Ok(value) => value,
        Err(e) => {
            debug!(role = %role, error = %e, "Response is not valid JSON");
            return GenerationOutcome::unparsed(raw, format!("invalid JSON: {}", e));
        }
    };

    let schema = SchemaDescriptor::for_role(role);
    let collection = match extract_collection(value, schema.root_key) {
        Ok(collection) => collection,
        Err(detail) => return GenerationOutcome::unparsed(raw, detail),
    };

    match decode(role, collection) {
        Ok(content) => GenerationOutcome::Structured(content),
        Err(detail) => {
            debug!(role = %role, detail = %detail, "Structured decode failed");
            GenerationOutcome::unparsed(raw, detail)
        }
    }
}

/// Strip one layer of markdown code fences, with or without a language tag.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the language tag line (e.g. "json")
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return text,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Accept the collection wrapped under the role's root key or as a bare array.
fn extract_collection(value: Value, root_key: &str) -> Result<Value, String> {
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut map) => map.remove(root_key).ok_or_else(|| {
            format!(
                "expected an array or an object with a '{}' field",
                root_key
            )
        }),
        other => Err(format!(
            "expected an array or object, got {}",
            json_type_name(&other)
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode the collection into the role's entity type and check invariants.
fn decode(role: RoleId, collection: Value) -> Result<StructuredContent, String> {
    match role {
        RoleId::Materials => {
            let materials: Vec<LearningMaterial> = serde_json::from_value(collection)
                .map_err(|e| format!("materials decode failed: {}", e))?;
            Ok(StructuredContent::Materials(MaterialCollection {
                materials,
            }))
        }
        RoleId::Quiz => {
            let questions: Vec<QuizQuestion> = serde_json::from_value(collection)
                .map_err(|e| format!("quiz decode failed: {}", e))?;
            for question in &questions {
                question.validate()?;
            }
            Ok(StructuredContent::Quiz(Quiz { questions }))
        }
        RoleId::Projects => {
            let projects: Vec<ProjectIdea> = serde_json::from_value(collection)
                .map_err(|e| format!("projects decode failed: {}", e))?;
            Ok(StructuredContent::Projects(ProjectCollection { projects }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MaterialKind;
    use pretty_assertions::assert_eq;

    const MATERIALS_JSON: &str = r#"{
        "materials": [
            {
                "title": "The Rust Book",
                "url": "https://doc.rust-lang.org/book/",
                "type": "article",
                "description": "The official guide."
            }
        ]
    }"#;

    #[test]
    fn test_materials_wrapped_round_trip() {
        match parse(RoleId::Materials, MATERIALS_JSON) {
            GenerationOutcome::Structured(StructuredContent::Materials(collection)) => {
                assert_eq!(collection.materials.len(), 1);
                assert_eq!(collection.materials[0].title, "The Rust Book");
                assert_eq!(collection.materials[0].kind, MaterialKind::Article);
            }
            other => panic!("expected structured materials, got {:?}", other),
        }
    }

    #[test]
    fn test_materials_bare_array_accepted() {
        let bare = r#"[{"title":"t","url":"u","type":"video","description":"d"}]"#;
        assert!(parse(RoleId::Materials, bare).is_structured());
    }

    #[test]
    fn test_fenced_json_accepted() {
        let fenced = format!("```json\n{}\n```", MATERIALS_JSON);
        assert!(parse(RoleId::Materials, &fenced).is_structured());
    }

    #[test]
    fn test_malformed_json_preserves_raw() {
        let raw = r#"{"materials": [{"title": "truncat"#;
        match parse(RoleId::Materials, raw) {
            GenerationOutcome::Unparsed { raw: kept, detail } => {
                assert_eq!(kept, raw);
                assert!(detail.contains("invalid JSON"));
            }
            other => panic!("expected unparsed, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_names_degrade() {
        let raw = r#"{"materials": [{"name": "t", "link": "u"}]}"#;
        match parse(RoleId::Materials, raw) {
            GenerationOutcome::Unparsed { detail, .. } => {
                assert!(detail.contains("decode failed"));
            }
            other => panic!("expected unparsed, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_material_kind_degrades() {
        let raw = r#"{"materials": [{"title":"t","url":"u","type":"podcast","description":"d"}]}"#;
        assert!(!parse(RoleId::Materials, raw).is_structured());
    }

    #[test]
    fn test_empty_response() {
        match parse(RoleId::Projects, "   ") {
            GenerationOutcome::Unparsed { detail, .. } => {
                assert_eq!(detail, "empty response");
            }
            other => panic!("expected unparsed, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_root_key_degrades() {
        let raw = r#"{"resources": []}"#;
        match parse(RoleId::Materials, raw) {
            GenerationOutcome::Unparsed { detail, .. } => {
                assert!(detail.contains("'materials'"));
            }
            other => panic!("expected unparsed, got {:?}", other),
        }
    }

    #[test]
    fn test_quiz_round_trip() {
        let raw = r#"{
            "questions": [
                {
                    "question": "What is the worst-case lookup in an unbalanced BST?",
                    "options": ["O(1)", "O(log n)", "O(n)", "O(n log n)"],
                    "correct_answer": 2,
                    "explanation": "A degenerate BST is effectively a linked list."
                }
            ]
        }"#;
        match parse(RoleId::Quiz, raw) {
            GenerationOutcome::Structured(StructuredContent::Quiz(quiz)) => {
                assert_eq!(quiz.questions[0].correct_answer, 2);
                assert_eq!(quiz.questions[0].options.len(), 4);
            }
            other => panic!("expected structured quiz, got {:?}", other),
        }
    }

    #[test]
    fn test_quiz_out_of_range_answer_rejects_whole_track() {
        // One bad question poisons the quiz; no clamping.
        let raw = r#"{
            "questions": [
                {
                    "question": "ok",
                    "options": ["a", "b"],
                    "correct_answer": 0,
                    "explanation": ""
                },
                {
                    "question": "bad",
                    "options": ["a", "b", "c", "d"],
                    "correct_answer": 5,
                    "explanation": ""
                }
            ]
        }"#;
        match parse(RoleId::Quiz, raw) {
            GenerationOutcome::Unparsed { raw: kept, detail } => {
                assert_eq!(kept, raw);
                assert!(detail.contains("out of range"));
            }
            other => panic!("expected unparsed, got {:?}", other),
        }
    }

    #[test]
    fn test_projects_round_trip() {
        let raw = r#"{
            "projects": [
                {
                    "title": "Build a BST visualizer",
                    "description": "Interactive tree visualization.",
                    "difficulty": "intermediate",
                    "estimated_duration": "3-5 days",
                    "required_skills": ["Rust", "basic data structures"],
                    "learning_outcomes": ["tree rotations", "rendering"]
                }
            ]
        }"#;
        match parse(RoleId::Projects, raw) {
            GenerationOutcome::Structured(StructuredContent::Projects(collection)) => {
                assert_eq!(collection.projects.len(), 1);
                assert_eq!(
                    collection.projects[0].difficulty,
                    crate::types::ExpertiseLevel::Intermediate
                );
            }
            other => panic!("expected structured projects, got {:?}", other),
        }
    }

    #[test]
    fn test_projects_count_not_enforced() {
        // The 5-project cap lives in the instruction; the parser accepts any count.
        let raw = r#"{"projects": []}"#;
        assert!(parse(RoleId::Projects, raw).is_structured());
    }

    #[test]
    fn test_scalar_json_degrades() {
        match parse(RoleId::Quiz, "42") {
            GenerationOutcome::Unparsed { detail, .. } => {
                assert!(detail.contains("number"));
            }
            other => panic!("expected unparsed, got {:?}", other),
        }
    }
}
