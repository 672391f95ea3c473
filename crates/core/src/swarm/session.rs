//! # Session Seams
//!
//! The three collaborators the coordinator drives. The radkit-backed
//! implementations live in [`crate::skills`]; tests substitute stubs.

use crate::blueprint::{AgentSpec, Blueprint};
use crate::skills::agent_definitions::SwarmAgent;
use crate::skills::specialist_skill::SpecialistReport;
use crate::skills::tools::file_tools::SavedFile;
use crate::swarm::task::AtomicTask;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;

/// Input key carrying the project requirement into discovery
pub const USER_REQUIREMENT_KEY: &str = "user_requirement";

/// Named inputs for the discovery session
pub type DiscoveryInputs = BTreeMap<String, String>;

/// Build the discovery inputs for a requirement
pub fn discovery_inputs(requirement: &str) -> DiscoveryInputs {
    let mut inputs = DiscoveryInputs::new();
    inputs.insert(USER_REQUIREMENT_KEY.to_string(), requirement.to_string());
    inputs
}

/// Phase 1: turn a requirement into a blueprint
#[async_trait]
pub trait Planner: Send + Sync {
    async fn discover(&self, inputs: &DiscoveryInputs) -> anyhow::Result<Blueprint>;
}

/// Turns an [`AgentSpec`] into a runnable agent
pub trait AgentFactory: Send + Sync {
    fn hire(&self, spec: &AgentSpec) -> anyhow::Result<SwarmAgent>;
}

/// What one execution session produced
#[derive(Debug, Clone, Default)]
pub struct TaskReport {
    /// The agent's own structured account, if it returned one
    pub report: Option<SpecialistReport>,
    /// Files the save tool actually wrote during the session
    pub saved: Vec<SavedFile>,
}

/// Phase 2: run one agent against one task in a fresh session
#[async_trait]
pub trait TaskRunner: Send + Sync {
    async fn run_task(
        &self,
        agent: &SwarmAgent,
        task: &AtomicTask,
        workspace: &Path,
    ) -> anyhow::Result<TaskReport>;
}
