//! # Safety Limiter
//!
//! Caps how much work an untrusted planner can schedule. Truncation is purely
//! positional: the architect is asked to list agents and tasks most important
//! first, and everything past the limit is dropped for this run.

use crate::blueprint::{AgentSpec, Blueprint, TaskSpec};
use serde::{Deserialize, Serialize};

/// Maximum number of specialists hired per run
pub const MAX_AGENTS: usize = 2;

/// Maximum number of file-build tasks executed per run
pub const MAX_TASKS: usize = 4;

/// First `limit` items of `items`, in order
pub fn take_first<T: Clone>(items: &[T], limit: usize) -> Vec<T> {
    items.iter().take(limit).cloned().collect()
}

/// Per-run caps on hiring and building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyLimits {
    pub max_agents: usize,
    pub max_tasks: usize,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_agents: MAX_AGENTS,
            max_tasks: MAX_TASKS,
        }
    }
}

/// A blueprint cut down to what this run will actually do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitedPlan {
    pub project_name: String,
    pub hiring_list: Vec<AgentSpec>,
    pub task_list: Vec<TaskSpec>,
    /// Agents past `max_agents` that were not hired
    pub dropped_agents: usize,
    /// Tasks past `max_tasks` that will not be built
    pub dropped_tasks: usize,
}

impl SafetyLimits {
    pub fn apply(&self, blueprint: &Blueprint) -> LimitedPlan {
        let hiring_list = take_first(&blueprint.required_agents, self.max_agents);
        let task_list = take_first(&blueprint.dynamic_tasks, self.max_tasks);

        LimitedPlan {
            project_name: blueprint.project_name.clone(),
            dropped_agents: blueprint.required_agents.len() - hiring_list.len(),
            dropped_tasks: blueprint.dynamic_tasks.len() - task_list.len(),
            hiring_list,
            task_list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_first_is_a_prefix() {
        let items = vec![1, 2, 3, 4, 5];
        for limit in 0..8 {
            let limited = take_first(&items, limit);
            assert_eq!(limited.len(), limit.min(items.len()));
            assert_eq!(limited[..], items[..limited.len()]);
        }
    }

    #[test]
    fn test_take_first_of_empty() {
        let items: Vec<String> = Vec::new();
        assert!(take_first(&items, MAX_TASKS).is_empty());
    }

    #[test]
    fn test_apply_default_limits() {
        let blueprint = Blueprint {
            project_name: "Ticker".to_string(),
            required_agents: ["Coder", "Tester", "Reviewer"]
                .iter()
                .map(|role| AgentSpec::new(*role, "goal"))
                .collect(),
            dynamic_tasks: (1..=5)
                .map(|i| TaskSpec::new(format!("t{}.py", i), "build it", "Coder"))
                .collect(),
        };

        let plan = SafetyLimits::default().apply(&blueprint);

        let roles: Vec<_> = plan.hiring_list.iter().map(|a| a.role.as_str()).collect();
        let names: Vec<_> = plan.task_list.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(roles, ["Coder", "Tester"]);
        assert_eq!(names, ["t1.py", "t2.py", "t3.py", "t4.py"]);
        assert_eq!(plan.dropped_agents, 1);
        assert_eq!(plan.dropped_tasks, 1);
    }

    #[test]
    fn test_apply_under_limits_keeps_everything() {
        let blueprint = Blueprint {
            project_name: "Tiny".to_string(),
            required_agents: Vec::new(),
            dynamic_tasks: vec![TaskSpec::new("main.rs", "hello", "Architect")],
        };

        let plan = SafetyLimits::default().apply(&blueprint);
        assert!(plan.hiring_list.is_empty());
        assert_eq!(plan.task_list, blueprint.dynamic_tasks);
        assert_eq!((plan.dropped_agents, plan.dropped_tasks), (0, 0));
    }
}
