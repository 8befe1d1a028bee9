//! Configuration system for EduForge.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! workspace config file -> environment. Loaded once at process start and
//! immutable thereafter; the pipeline never mutates configuration mid-run.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EduforgeConfig {
    pub llm: LlmConfig,
    pub grounding: GroundingConfig,
    pub pipeline: PipelineConfig,
}

/// Generation backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name: "ollama", "openai", or anything OpenAI-compatible.
    pub provider: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Explicit API key; takes precedence over the environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Endpoint base URL; defaults per provider when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// HTTP-level budget for one backend call.
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "llama3.2:3b".to_string(),
            api_key_env: "EDUFORGE_API_KEY".to_string(),
            api_key: None,
            base_url: None,
            temperature: 0.7,
            max_tokens: None,
            request_timeout_secs: 120,
        }
    }
}

/// Grounding/search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingConfig {
    pub enabled: bool,
    pub max_results: usize,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_results: 5,
        }
    }
}

/// Orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum wait per role track before its outcome degrades to unparsed.
    pub role_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            role_timeout_secs: 180,
        }
    }
}

/// Load configuration with layered precedence:
/// defaults -> `~/.config/eduforge/config.toml` -> `<workspace>/eduforge.toml`
/// -> `EDUFORGE_`-prefixed environment variables (`__` as section separator).
pub fn load_config(workspace: Option<&Path>) -> Result<EduforgeConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(EduforgeConfig::default()));

    if let Some(dirs) = directories::ProjectDirs::from("dev", "eduforge", "eduforge") {
        let user_config = dirs.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(workspace) = workspace {
        let ws_config = workspace.join("eduforge.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    figment = figment.merge(Env::prefixed("EDUFORGE_").split("__"));

    figment.extract().map_err(Box::new)
}
