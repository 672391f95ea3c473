//! # Specialist Skill
//!
//! Phase 2. Every task gets a brand-new `LlmWorker` holding one agent's
//! instructions and one file writer tool bound to a fresh [`WriteLedger`], so
//! nothing leaks between sessions.

use crate::skills::agent_definitions::SwarmAgent;
use crate::skills::tools::file_tools::{self, WriteLedger};
use crate::swarm::session::{TaskReport, TaskRunner};
use crate::swarm::task::AtomicTask;
use crate::with_llm;
use async_trait::async_trait;
use radkit::agent::LlmWorker;
use radkit::macros::LLMOutput;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The agent's closing report for a file-build session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct SpecialistReport {
    /// Path the agent says it saved
    #[serde(default)]
    pub file_name: String,
    /// Whether the agent believes the save succeeded
    #[serde(default)]
    pub saved: bool,
    /// What the file does
    #[serde(default)]
    pub summary: String,
}

/// Runs atomic tasks through radkit tool-calling workers
#[derive(Debug, Clone, Default)]
pub struct SpecialistSkill;

impl SpecialistSkill {
    pub fn new() -> Self {
        Self
    }

    /// SDK-style call: one isolated session for `agent` on `task`.
    pub async fn run(
        agent: &SwarmAgent,
        task: &AtomicTask,
        workspace: &Path,
    ) -> anyhow::Result<TaskReport> {
        let ledger = WriteLedger::new();
        let writer = file_tools::advanced_file_writer(workspace, ledger.clone());
        let instructions = agent.system_instructions();
        let prompt = task.prompt();

        let report: SpecialistReport = with_llm!(&agent.model, |llm| {
            let worker = LlmWorker::<SpecialistReport>::builder(llm)
                .with_system_instructions(instructions.as_str())
                .with_tool(writer)
                .build();
            worker.run(prompt.as_str()).await?
        });

        tracing::debug!(
            role = %agent.role,
            file = %task.file_name,
            claimed_saved = report.saved,
            "Session finished"
        );

        Ok(TaskReport {
            report: Some(report),
            saved: ledger.snapshot(),
        })
    }
}

#[async_trait]
impl TaskRunner for SpecialistSkill {
    async fn run_task(
        &self,
        agent: &SwarmAgent,
        task: &AtomicTask,
        workspace: &Path,
    ) -> anyhow::Result<TaskReport> {
        Self::run(agent, task, workspace).await
    }
}
