//! # Architect Skill
//!
//! Phase 1. A single-agent, single-task session: the architect reads the
//! discovery inputs and answers with a [`Blueprint`].

use crate::blueprint::Blueprint;
use crate::run_llm_function;
use crate::skills::agent_definitions::SwarmAgent;
use crate::skills::prompts;
use crate::swarm::session::{DiscoveryInputs, Planner, USER_REQUIREMENT_KEY};
use anyhow::Context;
use async_trait::async_trait;

/// Blueprint planner backed by the architect agent's model
#[derive(Debug, Clone)]
pub struct ArchitectSkill {
    agent: SwarmAgent,
}

impl ArchitectSkill {
    pub fn new(agent: SwarmAgent) -> Self {
        Self { agent }
    }

    /// Render the discovery inputs into the architect's task prompt.
    pub fn build_prompt(inputs: &DiscoveryInputs) -> anyhow::Result<String> {
        let requirement = inputs
            .get(USER_REQUIREMENT_KEY)
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .with_context(|| format!("discovery input '{}' is missing", USER_REQUIREMENT_KEY))?;

        let mut prompt = format!(
            "Analyze the following requirement and produce the project blueprint.\n\n\
             USER REQUIREMENT: {}\n",
            requirement
        );
        for (key, value) in inputs.iter().filter(|(k, _)| k.as_str() != USER_REQUIREMENT_KEY) {
            prompt.push_str(&format!("{}: {}\n", key.to_uppercase(), value));
        }
        Ok(prompt)
    }

    /// SDK-style call for direct Coordinator integration.
    pub async fn run(&self, inputs: &DiscoveryInputs) -> anyhow::Result<Blueprint> {
        let prompt = Self::build_prompt(inputs)?;
        let instructions = format!("{}\n{}", self.agent.persona(), prompts::ARCHITECT);

        tracing::debug!(model = %self.agent.model.model, "Running architect session");
        let blueprint =
            run_llm_function!(&self.agent.model, Blueprint, instructions.as_str(), prompt)
                .context("architect session did not return a blueprint")?;
        Ok(blueprint)
    }
}

#[async_trait]
impl Planner for ArchitectSkill {
    async fn discover(&self, inputs: &DiscoveryInputs) -> anyhow::Result<Blueprint> {
        self.run(inputs).await
    }
}
