//! # Blueprint
//!
//! The architect's structured answer to a project requirement: what to call
//! the project, which specialists to hire and which files to build.
//!
//! Every field defaults to empty on deserialization so that a sloppy planner
//! response surfaces as a typed [`BlueprintError`] from [`Blueprint::validate`]
//! instead of an opaque parse failure.

use crate::error::BlueprintError;
use crate::workspace;
use radkit::macros::LLMOutput;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A specialist the architect wants on the crew
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct AgentSpec {
    /// Unique role name, used to route tasks (e.g. "Backend Engineer")
    #[serde(default)]
    pub role: String,
    /// What this specialist is responsible for achieving
    #[serde(default)]
    pub goal: String,
    /// Expertise and working style of the specialist
    #[serde(default)]
    pub backstory: String,
}

impl AgentSpec {
    pub fn new(role: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: String::new(),
        }
    }
}

/// One file the crew must produce
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct TaskSpec {
    /// File path relative to the project root (e.g. "src/alerts.py")
    #[serde(default)]
    pub name: String,
    /// What the file must contain and do
    #[serde(default)]
    pub description: String,
    /// Role of the specialist who builds this file
    #[serde(default)]
    pub assigned_agent_role: String,
}

impl TaskSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        assigned_agent_role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            assigned_agent_role: assigned_agent_role.into(),
        }
    }
}

/// Output of the discovery phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct Blueprint {
    /// Short name of the project being built
    #[serde(default)]
    pub project_name: String,
    /// Specialists to hire, most important first
    #[serde(default)]
    pub required_agents: Vec<AgentSpec>,
    /// Files to build, in build order
    #[serde(default)]
    pub dynamic_tasks: Vec<TaskSpec>,
}

impl Blueprint {
    /// Check the required fields of the blueprint and every spec in it.
    ///
    /// Roles may repeat (the crew decides how to handle that); task file
    /// names may not, and must stay inside the workspace.
    pub fn validate(&self) -> Result<(), BlueprintError> {
        if self.project_name.trim().is_empty() {
            return Err(BlueprintError::MissingProjectName);
        }

        for (index, agent) in self.required_agents.iter().enumerate() {
            if agent.role.trim().is_empty() {
                return Err(BlueprintError::MissingRole { index });
            }
        }

        let mut seen = HashSet::new();
        for (index, task) in self.dynamic_tasks.iter().enumerate() {
            let required = [
                ("name", &task.name),
                ("description", &task.description),
                ("assigned_agent_role", &task.assigned_agent_role),
            ];
            if let Some(&(field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
                return Err(BlueprintError::MissingTaskField { index, field });
            }

            let canonical = workspace::canonical_name(&task.name).map_err(|source| {
                BlueprintError::UnsafeTaskPath {
                    name: task.name.clone(),
                    source,
                }
            })?;
            if !seen.insert(canonical) {
                return Err(BlueprintError::DuplicateTask {
                    name: task.name.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;

    fn sample() -> Blueprint {
        Blueprint {
            project_name: "Ticker".to_string(),
            required_agents: vec![AgentSpec::new("Coder", "Write the service")],
            dynamic_tasks: vec![
                TaskSpec::new("src/main.py", "Entry point", "Coder"),
                TaskSpec::new("src/alerts.py", "SMS alerts", "Coder"),
            ],
        }
    }

    #[test]
    fn test_valid_blueprint() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_empty_lists_are_valid() {
        let blueprint = Blueprint {
            project_name: "Empty".to_string(),
            ..Default::default()
        };
        assert_eq!(blueprint.validate(), Ok(()));
    }

    #[test]
    fn test_missing_project_name() {
        let mut blueprint = sample();
        blueprint.project_name = "  ".to_string();
        assert_eq!(blueprint.validate(), Err(BlueprintError::MissingProjectName));
    }

    #[test]
    fn test_missing_role() {
        let mut blueprint = sample();
        blueprint.required_agents.push(AgentSpec::default());
        assert_eq!(
            blueprint.validate(),
            Err(BlueprintError::MissingRole { index: 1 })
        );
    }

    #[test]
    fn test_missing_task_fields() {
        let mut blueprint = sample();
        blueprint.dynamic_tasks[1].description.clear();
        assert_eq!(
            blueprint.validate(),
            Err(BlueprintError::MissingTaskField {
                index: 1,
                field: "description"
            })
        );

        let mut blueprint = sample();
        blueprint.dynamic_tasks[0].assigned_agent_role.clear();
        assert_eq!(
            blueprint.validate(),
            Err(BlueprintError::MissingTaskField {
                index: 0,
                field: "assigned_agent_role"
            })
        );
    }

    #[test]
    fn test_escaping_task_path() {
        let mut blueprint = sample();
        blueprint.dynamic_tasks[0].name = "../../.bashrc".to_string();
        assert_eq!(
            blueprint.validate(),
            Err(BlueprintError::UnsafeTaskPath {
                name: "../../.bashrc".to_string(),
                source: PathError::EscapesWorkspace("../../.bashrc".to_string()),
            })
        );
    }

    #[test]
    fn test_duplicate_task_after_normalization() {
        let mut blueprint = sample();
        blueprint.dynamic_tasks[1].name = "./src/main.py".to_string();
        assert_eq!(
            blueprint.validate(),
            Err(BlueprintError::DuplicateTask {
                name: "./src/main.py".to_string()
            })
        );
    }

    #[test]
    fn test_missing_fields_deserialize_to_empty() {
        let blueprint: Blueprint = serde_json::from_str(
            r#"{"project_name": "Ticker", "dynamic_tasks": [{"name": "app.py"}]}"#,
        )
        .unwrap();

        assert!(blueprint.required_agents.is_empty());
        assert_eq!(
            blueprint.validate(),
            Err(BlueprintError::MissingTaskField {
                index: 0,
                field: "description"
            })
        );
    }
}
