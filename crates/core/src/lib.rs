//! # Dev Swarm Core
//!
//! A planner agent turns a one-line requirement into a blueprint of roles and
//! file-sized tasks; the coordinator hires specialists for those roles and
//! has each one write its file into a freshly reset workspace.
//!
//! ## Architecture
//!
//! - `blueprint` - the architect's structured plan and its validation
//! - `config` - run configuration (defaults, file, environment)
//! - `models` - LLM provider configuration
//! - `skills/` - architect and specialist sessions, prompts, tools
//! - `swarm/` - coordinator, crew, safety limits, task execution
//! - `workspace` - output directory reset and path safety
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dev_swarm_core::{config::SwarmConfig, swarm::Coordinator};
//!
//! let config = SwarmConfig::load(None)?;
//! let mut coordinator = Coordinator::new(config);
//! let summary = coordinator.run().await?;
//! println!("{}", summary.banner());
//! ```

pub mod blueprint;
pub mod config;
pub mod error;
pub mod models;
pub mod skills;
pub mod swarm;
pub mod workspace;

pub use blueprint::{AgentSpec, Blueprint, TaskSpec};
pub use config::SwarmConfig;
pub use error::{BlueprintError, PathError, SwarmError};
