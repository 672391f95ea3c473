//! # Atomic Task Executor
//!
//! Runs one task to a verified outcome. A session only counts as completed
//! when the file writer's ledger shows the task's file was written; anything
//! else (runner error, no tool call, wrong file) is retried in a new session
//! up to `max_attempts` times.

use crate::blueprint::TaskSpec;
use crate::skills::tools::file_tools::{SavedFile, FILE_WRITER_TOOL};
use crate::swarm::crew::Crew;
use crate::swarm::session::{TaskReport, TaskRunner};
use crate::swarm::task::AtomicTask;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Final state of one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskStatus {
    Completed { path: String, bytes: usize },
    Failed { reason: String },
    Skipped,
}

/// What happened to one task of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    /// Task file name as planned
    pub task: String,
    /// Role of the agent that ran it
    pub agent_role: String,
    /// Role the planner assigned
    pub assigned_role: String,
    /// Whether the Architect stood in for an unknown role
    pub fell_back: bool,
    /// Sessions started for this task
    pub attempts: u32,
    #[serde(flatten)]
    pub status: TaskStatus,
}

impl TaskOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self.status, TaskStatus::Completed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, TaskStatus::Failed { .. })
    }

    /// Outcome for a task the loop never reached
    pub fn skipped(crew: &Crew, spec: &TaskSpec) -> Self {
        let assignment = crew.resolve(&spec.assigned_agent_role);
        Self {
            task: spec.name.clone(),
            agent_role: assignment.agent.role.clone(),
            assigned_role: spec.assigned_agent_role.clone(),
            fell_back: assignment.fell_back,
            attempts: 0,
            status: TaskStatus::Skipped,
        }
    }
}

/// The ledger entry proving `task` was saved, if any
pub fn confirmation<'a>(task: &AtomicTask, report: &'a TaskReport) -> Option<&'a SavedFile> {
    report.saved.iter().rev().find(|f| f.path == task.file_name)
}

/// Run `spec` on the agent the crew assigns, in fresh sessions, until its file is written.
pub async fn run_atomic_task(
    crew: &Crew,
    spec: &TaskSpec,
    runner: &dyn TaskRunner,
    workspace: &Path,
    max_attempts: u32,
) -> TaskOutcome {
    let assignment = crew.resolve(&spec.assigned_agent_role);
    let agent = assignment.agent;
    if assignment.fell_back {
        tracing::warn!(
            task = %spec.name,
            assigned_role = %spec.assigned_agent_role,
            "No agent holds the assigned role, Architect takes the task"
        );
    }

    let mut outcome = TaskOutcome {
        task: spec.name.clone(),
        agent_role: agent.role.clone(),
        assigned_role: spec.assigned_agent_role.clone(),
        fell_back: assignment.fell_back,
        attempts: 0,
        status: TaskStatus::Skipped,
    };

    let task = match AtomicTask::from_spec(spec) {
        Ok(task) => task,
        Err(e) => {
            outcome.status = TaskStatus::Failed {
                reason: e.to_string(),
            };
            return outcome;
        }
    };

    let max_attempts = max_attempts.max(1);
    let mut last_reason = String::new();

    while outcome.attempts < max_attempts {
        outcome.attempts += 1;
        tracing::info!(
            task = %task.file_name,
            role = %agent.role,
            attempt = outcome.attempts,
            "Starting atomic session"
        );

        match runner.run_task(agent, &task, workspace).await {
            Ok(report) => match confirmation(&task, &report) {
                Some(saved) => {
                    outcome.status = TaskStatus::Completed {
                        path: saved.path.clone(),
                        bytes: saved.bytes,
                    };
                    return outcome;
                }
                None => {
                    let written: Vec<&str> = report.saved.iter().map(|f| f.path.as_str()).collect();
                    last_reason = if written.is_empty() {
                        format!(
                            "agent finished without calling {} for {}",
                            FILE_WRITER_TOOL, task.file_name
                        )
                    } else {
                        format!(
                            "agent saved {} instead of {}",
                            written.join(", "),
                            task.file_name
                        )
                    };
                }
            },
            Err(e) => {
                last_reason = format!("session error: {:#}", e);
            }
        }

        tracing::warn!(
            task = %task.file_name,
            attempt = outcome.attempts,
            reason = %last_reason,
            "Atomic session did not complete"
        );
    }

    outcome.status = TaskStatus::Failed {
        reason: last_reason,
    };
    outcome
}
