//! Error types for the EduForge core library.
//!
//! Uses `thiserror` for public API error types with structured variants
//! covering the generation backend, pipeline input validation, grounding,
//! and configuration domains.

/// Top-level error type for the EduForge core library.
#[derive(Debug, thiserror::Error)]
pub enum EduforgeError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Grounding error: {0}")]
    Grounding(#[from] GroundingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from generation backend interactions.
///
/// Every variant except `AuthFailed` is recovered locally by the pipeline
/// into an `Unparsed` outcome for the affected role track; none of them
/// abort a run once input validation has passed.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("API request failed: {message}")]
    ApiRequest { message: String },

    #[error("API response parse error: {message}")]
    ResponseParse { message: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Provider connection failed: {message}")]
    Connection { message: String },
}

/// Errors from the pipeline orchestrator.
///
/// The only hard failure that crosses the pipeline boundary: everything
/// else degrades to a recorded per-role outcome.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("At least one non-empty topic is required")]
    EmptyTopics,
}

/// Errors from the grounding/search capability.
///
/// Grounding is best-effort enrichment: these errors are logged by the
/// orchestrator and never fail a generation call.
#[derive(Debug, thiserror::Error)]
pub enum GroundingError {
    #[error("Search request failed: {message}")]
    Request { message: String },

    #[error("Search response parse error: {message}")]
    Parse { message: String },
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Environment variable not set: {var}")]
    EnvVarMissing { var: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// A type alias for results using the top-level `EduforgeError`.
pub type Result<T> = std::result::Result<T, EduforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_llm() {
        let err = EduforgeError::Llm(LlmError::ApiRequest {
            message: "connection refused".into(),
        });
        assert_eq!(
            err.to_string(),
            "LLM error: API request failed: connection refused"
        );
    }

    #[test]
    fn test_error_display_pipeline() {
        let err = EduforgeError::Pipeline(PipelineError::EmptyTopics);
        assert_eq!(
            err.to_string(),
            "Pipeline error: At least one non-empty topic is required"
        );
    }

    #[test]
    fn test_error_display_timeout() {
        let err = LlmError::Timeout { timeout_secs: 120 };
        assert_eq!(err.to_string(), "Request timed out after 120s");
    }

    #[test]
    fn test_error_display_grounding() {
        let err = EduforgeError::Grounding(GroundingError::Request {
            message: "dns failure".into(),
        });
        assert_eq!(
            err.to_string(),
            "Grounding error: Search request failed: dns failure"
        );
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: EduforgeError = serde_err.into();
        assert!(matches!(err, EduforgeError::Serialization(_)));
    }
}
