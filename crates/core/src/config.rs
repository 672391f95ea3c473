//! # Swarm Configuration
//!
//! Resolution order: built-in defaults, then an optional JSON config file,
//! then environment variables. The CLI applies its flags last.

use crate::models::{LlmProvider, ModelConfig};
use crate::swarm::crew::RoleCollisionPolicy;
use crate::swarm::limiter::{SafetyLimits, MAX_AGENTS, MAX_TASKS};
use crate::workspace::DEFAULT_WORKSPACE_DIR;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Requirement handed to the architect when none is configured
pub const DEFAULT_REQUIREMENT: &str =
    "A high-speed real-time stock market tracker with SMS alerts using Twilio and Redis.";

/// Model backing the architect
pub const MANAGER_MODEL_VAR: &str = "MANAGER_MODEL";
/// Model backing hired specialists
pub const WORKER_MODEL_VAR: &str = "WORKER_MODEL";
pub const PROVIDER_VAR: &str = "LLM_PROVIDER";
pub const BASE_URL_VAR: &str = "LLM_BASE_URL";
pub const WORKSPACE_VAR: &str = "DEV_SWARM_WORKSPACE";

/// Everything a run needs to know
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Output directory, wiped at the start of every run
    pub workspace_dir: PathBuf,
    /// Natural-language description of the software to build
    pub user_requirement: String,
    /// Specialists hired at most
    pub max_agents: usize,
    /// Tasks built at most
    pub max_tasks: usize,
    /// Provider for every agent
    pub provider: LlmProvider,
    /// Architect model (defaults to the provider's default model)
    pub manager_model: Option<String>,
    /// Specialist model (defaults to the manager model)
    pub worker_model: Option<String>,
    /// Base URL override for OpenAI-compatible endpoints
    pub base_url: Option<String>,
    /// Handling of duplicate roles in the hiring list
    pub on_role_collision: RoleCollisionPolicy,
    /// Sessions per task before it counts as failed
    pub max_attempts: u32,
    /// Stop the task loop at the first failed task
    pub fail_fast: bool,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            workspace_dir: PathBuf::from(DEFAULT_WORKSPACE_DIR),
            user_requirement: DEFAULT_REQUIREMENT.to_string(),
            max_agents: MAX_AGENTS,
            max_tasks: MAX_TASKS,
            provider: LlmProvider::OpenAI,
            manager_model: None,
            worker_model: None,
            base_url: None,
            on_role_collision: RoleCollisionPolicy::Overwrite,
            max_attempts: 2,
            fail_fast: false,
        }
    }
}

impl SwarmConfig {
    /// Defaults, overlaid with `path` (if given) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a JSON config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Apply environment overrides looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(provider) = get(PROVIDER_VAR) {
            let provider: LlmProvider = provider
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .with_context(|| format!("Invalid {}", PROVIDER_VAR))?;
            self.set_provider(provider);
        }
        if let Some(model) = get(MANAGER_MODEL_VAR) {
            self.manager_model = Some(model);
        }
        if let Some(model) = get(WORKER_MODEL_VAR) {
            self.worker_model = Some(model);
        }
        if let Some(url) = get(BASE_URL_VAR) {
            self.base_url = Some(url);
        }
        if let Some(dir) = get(WORKSPACE_VAR) {
            self.workspace_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Switch provider. Models named explicitly are kept; unset ones follow
    /// the new provider's default.
    pub fn set_provider(&mut self, provider: LlmProvider) {
        self.provider = provider;
    }

    /// Architect model name after defaulting
    pub fn manager_model(&self) -> &str {
        self.manager_model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    fn model_config(&self, model: &str) -> ModelConfig {
        let config = ModelConfig::with_provider(self.provider, model);
        match &self.base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }

    /// Model config for the architect
    pub fn manager_model_config(&self) -> ModelConfig {
        self.model_config(self.manager_model())
    }

    /// Model config for hired specialists
    pub fn worker_model_config(&self) -> ModelConfig {
        self.model_config(self.worker_model.as_deref().unwrap_or(self.manager_model()))
    }

    pub fn limits(&self) -> SafetyLimits {
        SafetyLimits {
            max_agents: self.max_agents,
            max_tasks: self.max_tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SwarmConfig::default();
        assert_eq!(config.workspace_dir, PathBuf::from("project_output"));
        assert_eq!(config.manager_model(), "gpt-4o");
        assert_eq!(config.limits(), SafetyLimits { max_agents: 2, max_tasks: 4 });
        assert_eq!(config.worker_model_config(), config.manager_model_config());
    }

    #[test]
    fn test_manager_model_from_env() {
        let mut config = SwarmConfig::default();
        config
            .apply_env(env(&[(MANAGER_MODEL_VAR, "gpt-4.1"), (WORKER_MODEL_VAR, "gpt-4o-mini")]))
            .unwrap();
        assert_eq!(config.manager_model_config().model, "gpt-4.1");
        assert_eq!(config.worker_model_config().model, "gpt-4o-mini");
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = SwarmConfig::default();
        config.apply_env(env(&[(MANAGER_MODEL_VAR, "  ")])).unwrap();
        assert_eq!(config.manager_model, None);
        assert_eq!(config.manager_model(), "gpt-4o");
    }

    #[test]
    fn test_provider_switch_moves_default_model() {
        let mut config = SwarmConfig::default();
        config.apply_env(env(&[(PROVIDER_VAR, "anthropic")])).unwrap();
        assert_eq!(config.provider, LlmProvider::Anthropic);
        assert_eq!(config.manager_model(), "claude-sonnet-4-20250514");

        let mut config = SwarmConfig::default();
        config
            .apply_env(env(&[(PROVIDER_VAR, "openrouter"), (MANAGER_MODEL_VAR, "x/y")]))
            .unwrap();
        assert_eq!(config.manager_model(), "x/y");
    }

    #[test]
    fn test_explicit_model_survives_later_provider_switch() {
        let mut config = SwarmConfig::default();
        config.apply_env(env(&[(MANAGER_MODEL_VAR, "gpt-4o")])).unwrap();

        config.set_provider(LlmProvider::OpenRouter);

        assert_eq!(config.manager_model(), "gpt-4o");
        assert_eq!(config.manager_model_config().provider, LlmProvider::OpenRouter);
        assert_eq!(config.worker_model_config().model, "gpt-4o");
    }

    #[test]
    fn test_invalid_provider_is_an_error() {
        let mut config = SwarmConfig::default();
        let err = config.apply_env(env(&[(PROVIDER_VAR, "mystery")])).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown LLM provider"));
    }

    #[test]
    fn test_base_url_only_reaches_openai_configs() {
        let mut config = SwarmConfig::default();
        config.apply_env(env(&[(BASE_URL_VAR, "http://localhost:8000/v1")])).unwrap();
        assert_eq!(
            config.manager_model_config().base_url.as_deref(),
            Some("http://localhost:8000/v1")
        );

        config.set_provider(LlmProvider::Gemini);
        assert!(config.manager_model_config().base_url.is_none());
    }

    #[test]
    fn test_partial_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("swarm.json");
        std::fs::write(
            &path,
            r#"{"max_tasks": 6, "on_role_collision": "disambiguate", "workspace_dir": "out"}"#,
        )
        .unwrap();

        let config = SwarmConfig::from_file(&path).unwrap();

        assert_eq!(config.max_tasks, 6);
        assert_eq!(config.max_agents, MAX_AGENTS);
        assert_eq!(config.on_role_collision, RoleCollisionPolicy::Disambiguate);
        assert_eq!(config.workspace_dir, PathBuf::from("out"));
        assert_eq!(config.user_requirement, DEFAULT_REQUIREMENT);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(SwarmConfig::from_file(Path::new("/definitely/not/here.json")).is_err());
    }
}
