//! # Swarm Orchestration
//!
//! Plan-then-build pipeline for the dev swarm.
//!
//! ## Pipeline Flow
//!
//! ```text
//! Reset Workspace → Architect (Blueprint) → Safety Limits → Hire Crew → Atomic Tasks
//! ```

pub mod coordinator;
pub mod crew;
pub mod events;
pub mod executor;
pub mod limiter;
pub mod pipeline;
pub mod session;
pub mod task;

pub use coordinator::{Coordinator, RunSummary};
pub use crew::{Crew, RoleCollisionPolicy};
pub use events::{SwarmEvent, SwarmEventKind};
pub use executor::{run_atomic_task, TaskOutcome, TaskStatus};
pub use limiter::{LimitedPlan, SafetyLimits, MAX_AGENTS, MAX_TASKS};
pub use pipeline::{Pipeline, PipelineStage};
pub use session::{AgentFactory, DiscoveryInputs, Planner, TaskReport, TaskRunner};
pub use task::AtomicTask;
