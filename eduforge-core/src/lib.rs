//! # EduForge Core
//!
//! Content-generation pipeline for personalized educational material.
//! Runs three role-scoped generation requests (learning materials, quiz,
//! project ideas) against a text-generation backend, validates each response
//! against its schema, and aggregates per-role outcomes, degrading any
//! non-conformant track to raw text instead of failing the run.

pub mod backend;
pub mod config;
pub mod error;
pub mod grounding;
pub mod parser;
pub mod pipeline;
pub mod providers;
pub mod request;
pub mod roles;
pub mod schema;
pub mod types;

// Re-export commonly used types at the crate root.
pub use backend::{MockTextGenerator, TextGenerator};
pub use config::{EduforgeConfig, GroundingConfig, LlmConfig, PipelineConfig, load_config};
pub use error::{EduforgeError, LlmError, PipelineError, Result};
pub use grounding::{DuckDuckGoGrounding, GroundingHit, GroundingProvider};
pub use pipeline::Pipeline;
pub use providers::create_provider;
pub use roles::{RoleId, RoleProfile, RoleRegistry};
pub use types::{
    ExpertiseLevel, GenerationOutcome, GenerationRequest, LearningMaterial, MaterialCollection,
    MaterialKind, PipelineResult, ProjectCollection, ProjectIdea, Quiz, QuizQuestion,
    StructuredContent,
};
