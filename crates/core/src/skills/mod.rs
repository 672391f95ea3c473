//! # Swarm Skills
//!
//! LLM-backed roles of the swarm and the tools they can call.
//!
//! - `ArchitectSkill` - turns a requirement into a `Blueprint`
//! - `SpecialistSkill` - builds one file per session with the file writer tool

pub mod agent_definitions;
pub mod architect_skill;
pub mod llm_helpers;
pub mod prompts;
pub mod specialist_skill;
pub mod tools;

pub use agent_definitions::{architect_agent, SpecialistFactory, SwarmAgent, ARCHITECT_ROLE};
pub use architect_skill::ArchitectSkill;
pub use specialist_skill::{SpecialistReport, SpecialistSkill};
