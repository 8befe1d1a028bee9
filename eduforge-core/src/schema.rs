//! Output schema descriptors.
//!
//! Each role's generation request carries a canonical field list describing
//! the JSON shape the response must conform to. The descriptor is rendered
//! into the instruction text (the backend is told to match field names and
//! nesting exactly) and names the wrapper key the parser will look for.

use crate::roles::RoleId;
use serde_json::{Value, json};

/// One field in the expected item shape: name, type, and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: &'static str,
    pub description: &'static str,
}

/// The expected output shape for one role: an array of items under a
/// named wrapper key, with a canonical per-item field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    /// Wrapper key the collection is expected under. The parser also
    /// accepts the collection as a bare top-level array.
    pub root_key: &'static str,
    /// What one item of the collection represents.
    pub item_label: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl SchemaDescriptor {
    /// The canonical descriptor for a role's expected output shape.
    pub fn for_role(role: RoleId) -> Self {
        match role {
            RoleId::Materials => SchemaDescriptor {
                root_key: "materials",
                item_label: "learning material",
                fields: vec![
                    FieldSpec {
                        name: "title",
                        ty: "string",
                        description: "Title of the resource",
                    },
                    FieldSpec {
                        name: "url",
                        ty: "string",
                        description: "Direct link to the resource",
                    },
                    FieldSpec {
                        name: "type",
                        ty: "string",
                        description: "One of: video, article, exercise",
                    },
                    FieldSpec {
                        name: "description",
                        ty: "string",
                        description: "Why this resource is worth the learner's time",
                    },
                ],
            },
            RoleId::Quiz => SchemaDescriptor {
                root_key: "questions",
                item_label: "quiz question",
                fields: vec![
                    FieldSpec {
                        name: "question",
                        ty: "string",
                        description: "The question text",
                    },
                    FieldSpec {
                        name: "options",
                        ty: "array of strings",
                        description: "At least two answer options",
                    },
                    FieldSpec {
                        name: "correct_answer",
                        ty: "integer",
                        description: "Zero-based index of the correct option",
                    },
                    FieldSpec {
                        name: "explanation",
                        ty: "string",
                        description: "Why the correct answer is correct",
                    },
                ],
            },
            RoleId::Projects => SchemaDescriptor {
                root_key: "projects",
                item_label: "project idea",
                fields: vec![
                    FieldSpec {
                        name: "title",
                        ty: "string",
                        description: "Project title",
                    },
                    FieldSpec {
                        name: "description",
                        ty: "string",
                        description: "What the project involves",
                    },
                    FieldSpec {
                        name: "difficulty",
                        ty: "string",
                        description: "One of: beginner, intermediate, advanced",
                    },
                    FieldSpec {
                        name: "estimated_duration",
                        ty: "string",
                        description: "Duration estimation, e.g. '3-5 days'",
                    },
                    FieldSpec {
                        name: "required_skills",
                        ty: "array of strings",
                        description: "Skills the learner needs going in",
                    },
                    FieldSpec {
                        name: "learning_outcomes",
                        ty: "array of strings",
                        description: "What the learner will be able to do afterwards",
                    },
                ],
            },
        }
    }

    /// An example JSON value showing the exact expected nesting.
    fn example_shape(&self) -> Value {
        let mut item = serde_json::Map::new();
        for field in &self.fields {
            item.insert(field.name.to_string(), json!("..."));
        }
        let mut root = serde_json::Map::new();
        root.insert(
            self.root_key.to_string(),
            Value::Array(vec![Value::Object(item)]),
        );
        Value::Object(root)
    }

    /// Render the schema contract appended to every instruction.
    pub fn render_instruction(&self) -> String {
        let mut out = String::new();
        out.push_str("Respond with a single JSON object with this exact shape:\n");
        out.push_str(&self.example_shape().to_string());
        out.push_str("\n\nEach ");
        out.push_str(self.item_label);
        out.push_str(" has these fields:\n");
        for field in &self.fields {
            out.push_str(&format!(
                "- {} ({}): {}\n",
                field.name, field.ty, field.description
            ));
        }
        out.push_str(
            "Field names and nesting must match exactly. \
             Output only the JSON object, with no surrounding text.",
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_keys_match_wrapper_containers() {
        assert_eq!(SchemaDescriptor::for_role(RoleId::Materials).root_key, "materials");
        assert_eq!(SchemaDescriptor::for_role(RoleId::Quiz).root_key, "questions");
        assert_eq!(SchemaDescriptor::for_role(RoleId::Projects).root_key, "projects");
    }

    #[test]
    fn test_render_lists_every_field() {
        let schema = SchemaDescriptor::for_role(RoleId::Quiz);
        let rendered = schema.render_instruction();
        for field in &schema.fields {
            assert!(rendered.contains(field.name), "missing field {}", field.name);
        }
        assert!(rendered.contains("Zero-based index"));
    }

    #[test]
    fn test_example_shape_nests_under_root_key() {
        let schema = SchemaDescriptor::for_role(RoleId::Projects);
        let rendered = schema.render_instruction();
        assert!(rendered.contains("\"projects\":["));
    }

    #[test]
    fn test_materials_type_field_uses_wire_name() {
        let schema = SchemaDescriptor::for_role(RoleId::Materials);
        assert!(schema.fields.iter().any(|f| f.name == "type"));
    }
}
