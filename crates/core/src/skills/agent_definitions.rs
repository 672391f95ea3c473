//! # Agent Definitions
//!
//! Runtime agent handles. The architect is fixed; specialists are hired from
//! the blueprint's [`AgentSpec`]s by a [`SpecialistFactory`].

use crate::blueprint::AgentSpec;
use crate::models::ModelConfig;
use crate::skills::prompts;
use crate::swarm::session::AgentFactory;
use serde::{Deserialize, Serialize};

/// Role of the fixed phase-1 agent and the fallback for unknown roles
pub const ARCHITECT_ROLE: &str = "Architect";

/// A configured agent that can be put into an execution session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmAgent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub model: ModelConfig,
}

impl SwarmAgent {
    /// Role, goal and background, as the opening of any system prompt
    pub fn persona(&self) -> String {
        let mut persona = format!(
            "You are the {role}.\n\nYOUR GOAL: {goal}\n",
            role = self.role,
            goal = self.goal,
        );
        if !self.backstory.trim().is_empty() {
            persona.push_str(&format!("\nBACKGROUND: {}\n", self.backstory.trim()));
        }
        persona
    }

    /// System instructions for a file-build session run by this agent
    pub fn system_instructions(&self) -> String {
        format!("{}\n{}", self.persona(), prompts::SPECIALIST)
    }
}

/// The Architect
///
/// Plans the project in phase 1, then stays on the crew as the fallback
/// builder for tasks whose role nobody was hired for.
pub fn architect_agent(config: ModelConfig) -> SwarmAgent {
    SwarmAgent {
        role: ARCHITECT_ROLE.to_string(),
        goal: "Design a complete, minimal file layout for the requested software \
               and build any file no specialist owns."
            .to_string(),
        backstory: "A pragmatic senior software architect who turns vague requirements \
                    into small, buildable plans."
            .to_string(),
        model: config,
    }
}

/// Hires specialists backed by the worker model
#[derive(Debug, Clone)]
pub struct SpecialistFactory {
    config: ModelConfig,
}

impl SpecialistFactory {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }
}

impl AgentFactory for SpecialistFactory {
    fn hire(&self, spec: &AgentSpec) -> anyhow::Result<SwarmAgent> {
        let role = spec.role.trim();
        if role.is_empty() {
            anyhow::bail!("agent spec has no role");
        }

        let goal = if spec.goal.trim().is_empty() {
            format!("Build the files assigned to the {} role.", role)
        } else {
            spec.goal.trim().to_string()
        };

        Ok(SwarmAgent {
            role: role.to_string(),
            goal,
            backstory: spec.backstory.trim().to_string(),
            model: self.config.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LlmProvider;

    #[test]
    fn test_architect_uses_given_model() {
        let config = ModelConfig::with_provider(LlmProvider::Anthropic, "claude-sonnet-4-20250514");
        let architect = architect_agent(config.clone());
        assert_eq!(architect.role, ARCHITECT_ROLE);
        assert_eq!(architect.model, config);
    }

    #[test]
    fn test_hire_copies_spec_fields() {
        let factory = SpecialistFactory::new(ModelConfig::default());
        let spec = AgentSpec {
            role: " Redis Engineer ".to_string(),
            goal: "Cache quotes".to_string(),
            backstory: "Ten years of Redis".to_string(),
        };

        let agent = factory.hire(&spec).unwrap();

        assert_eq!(agent.role, "Redis Engineer");
        assert_eq!(agent.goal, "Cache quotes");
        assert_eq!(agent.model, ModelConfig::default());
        let instructions = agent.system_instructions();
        assert!(instructions.starts_with("You are the Redis Engineer."));
        assert!(instructions.contains("BACKGROUND: Ten years of Redis"));
    }

    #[test]
    fn test_hire_fills_missing_goal() {
        let factory = SpecialistFactory::new(ModelConfig::default());
        let agent = factory.hire(&AgentSpec::new("Tester", "")).unwrap();
        assert_eq!(agent.goal, "Build the files assigned to the Tester role.");
        assert!(!agent.system_instructions().contains("BACKGROUND"));
    }

    #[test]
    fn test_hire_rejects_blank_role() {
        let factory = SpecialistFactory::new(ModelConfig::default());
        assert!(factory.hire(&AgentSpec::new("  ", "goal")).is_err());
    }
}
