//! # Swarm Events
//!
//! Timeline of a run, kept in the run summary and optionally streamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of swarm event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SwarmEventKind {
    /// Run started
    RunStarted,
    /// Output directory wiped and recreated
    WorkspaceReset,
    /// Architect returned a valid blueprint
    BlueprintCreated,
    /// Blueprint entries were cut by the safety limits
    PlanTruncated,
    /// Specialist added to the crew
    AgentHired,
    /// Task session started
    TaskStarted,
    /// Task file confirmed written
    TaskCompleted,
    /// Task failed after all attempts
    TaskFailed,
    /// Task not attempted
    TaskSkipped,
    /// Run finished (whatever the task outcomes)
    RunCompleted,
    /// Run aborted
    RunFailed,
}

/// An event in the swarm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmEvent {
    /// Unique event ID
    pub id: String,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Kind of event
    pub kind: SwarmEventKind,
    /// Agent (role) or component that produced this event
    pub agent: String,
    /// Associated data (JSON)
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Task file the event concerns, if any
    #[serde(default)]
    pub task: Option<String>,
}

impl SwarmEvent {
    /// Create a new event
    pub fn new(kind: SwarmEventKind, agent: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            agent: agent.to_string(),
            data: None,
            task: None,
        }
    }

    /// Add data to the event
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach the task file name
    pub fn with_task(mut self, task: &str) -> Self {
        self.task = Some(task.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = SwarmEvent::new(SwarmEventKind::TaskStarted, "Coder").with_task("src/app.py");

        assert_eq!(event.agent, "Coder");
        assert_eq!(event.task.as_deref(), Some("src/app.py"));
        assert!(event.data.is_none());
    }

    #[test]
    fn test_event_ids_are_unique() {
        let a = SwarmEvent::new(SwarmEventKind::RunStarted, "coordinator");
        let b = SwarmEvent::new(SwarmEventKind::RunStarted, "coordinator");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_event_kind_serializes_snake_case() {
        let event = SwarmEvent::new(SwarmEventKind::AgentHired, "coordinator")
            .with_data(serde_json::json!({"role": "Tester"}));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"agent_hired\""));
        assert!(json.contains("Tester"));
    }
}
