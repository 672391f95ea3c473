//! # Crew
//!
//! The active-agents mapping: role name → agent. Seeded with the Architect,
//! extended by hiring, read-only once the task loop starts.

use crate::blueprint::AgentSpec;
use crate::error::SwarmError;
use crate::skills::agent_definitions::{SwarmAgent, ARCHITECT_ROLE};
use crate::swarm::session::AgentFactory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// What to do when a hired spec reuses a role that is already staffed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCollisionPolicy {
    /// Later spec replaces the earlier agent
    #[default]
    Overwrite,
    /// Abort assembly with [`SwarmError::RoleConflict`]
    Reject,
    /// Keep both; the later one becomes `Role#2`, `Role#3`, ...
    Disambiguate,
}

impl fmt::Display for RoleCollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoleCollisionPolicy::Overwrite => "overwrite",
            RoleCollisionPolicy::Reject => "reject",
            RoleCollisionPolicy::Disambiguate => "disambiguate",
        })
    }
}

impl FromStr for RoleCollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(RoleCollisionPolicy::Overwrite),
            "reject" => Ok(RoleCollisionPolicy::Reject),
            "disambiguate" => Ok(RoleCollisionPolicy::Disambiguate),
            other => Err(format!(
                "unknown role collision policy '{}' (expected overwrite, reject or disambiguate)",
                other
            )),
        }
    }
}

/// Result of hiring one spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hire {
    /// Key the agent was stored under
    pub role: String,
    /// Whether an existing agent was replaced
    pub replaced: bool,
}

/// The agent picked for a task
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a> {
    pub agent: &'a SwarmAgent,
    /// True when the task's role was unknown and the Architect stepped in
    pub fell_back: bool,
}

/// Role-keyed set of agents available to the executor
#[derive(Debug, Clone)]
pub struct Crew {
    agents: HashMap<String, SwarmAgent>,
    policy: RoleCollisionPolicy,
}

impl Crew {
    /// A crew holding only the Architect
    pub fn new(architect: SwarmAgent, policy: RoleCollisionPolicy) -> Self {
        let mut agents = HashMap::new();
        agents.insert(ARCHITECT_ROLE.to_string(), architect);
        Self { agents, policy }
    }

    /// Seed with the Architect and hire every spec in order.
    pub fn assemble(
        architect: SwarmAgent,
        hiring_list: &[AgentSpec],
        factory: &dyn AgentFactory,
        policy: RoleCollisionPolicy,
    ) -> Result<Self, SwarmError> {
        let mut crew = Self::new(architect, policy);
        for spec in hiring_list {
            crew.hire(spec, factory)?;
        }
        Ok(crew)
    }

    /// Hire one specialist under the crew's collision policy.
    pub fn hire(&mut self, spec: &AgentSpec, factory: &dyn AgentFactory) -> Result<Hire, SwarmError> {
        let requested = spec.role.trim().to_string();

        let role = if self.agents.contains_key(&requested) {
            match self.policy {
                RoleCollisionPolicy::Overwrite => {
                    tracing::warn!(role = %requested, "Role already staffed, replacing agent");
                    requested
                }
                RoleCollisionPolicy::Reject => {
                    return Err(SwarmError::RoleConflict { role: requested });
                }
                RoleCollisionPolicy::Disambiguate => {
                    let unique = self.next_free_role(&requested);
                    tracing::warn!(role = %requested, assigned = %unique, "Role already staffed, hiring under new name");
                    unique
                }
            }
        } else {
            requested
        };

        let mut agent = factory.hire(spec).map_err(|e| SwarmError::Hire {
            role: role.clone(),
            reason: format!("{:#}", e),
        })?;
        agent.role = role.clone();

        let replaced = self.agents.insert(role.clone(), agent).is_some();
        Ok(Hire { role, replaced })
    }

    fn next_free_role(&self, role: &str) -> String {
        (2..)
            .map(|n| format!("{}#{}", role, n))
            .find(|candidate| !self.agents.contains_key(candidate))
            .unwrap_or_else(|| role.to_string())
    }

    /// The agent currently filed under "Architect"
    pub fn architect(&self) -> &SwarmAgent {
        // `new` always seeds the key and nothing removes it
        &self.agents[ARCHITECT_ROLE]
    }

    /// Agent for `role`, or the Architect when nobody holds that role
    pub fn resolve(&self, role: &str) -> Assignment<'_> {
        match self.agents.get(role.trim()) {
            Some(agent) => Assignment {
                agent,
                fell_back: false,
            },
            None => Assignment {
                agent: self.architect(),
                fell_back: true,
            },
        }
    }

    /// Agent filed under `role` (surrounding whitespace ignored, as in `hire`)
    pub fn get(&self, role: &str) -> Option<&SwarmAgent> {
        self.agents.get(role.trim())
    }

    pub fn contains(&self, role: &str) -> bool {
        self.agents.contains_key(role.trim())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Staffed roles, sorted
    pub fn roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = self.agents.keys().cloned().collect();
        roles.sort();
        roles
    }
}
