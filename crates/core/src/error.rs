//! Error types for the swarm.
//!
//! Collaborator seams (planner, hire factory, task runner) report failures as
//! `anyhow::Error`; the coordinator folds them into [`SwarmError`] so callers
//! can tell which stage of the run broke.

use std::path::PathBuf;
use thiserror::Error;

/// A task file name that cannot be placed inside the workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("file name is empty")]
    Empty,

    #[error("'{0}' is an absolute path")]
    Absolute(String),

    #[error("'{0}' escapes the workspace")]
    EscapesWorkspace(String),
}

/// Why a blueprint returned by the architect was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlueprintError {
    #[error("blueprint has no project name")]
    MissingProjectName,

    #[error("required agent #{index} has no role")]
    MissingRole { index: usize },

    #[error("task #{index} is missing its {field}")]
    MissingTaskField { index: usize, field: &'static str },

    #[error("task '{name}' has an unusable file name: {source}")]
    UnsafeTaskPath {
        name: String,
        #[source]
        source: PathError,
    },

    #[error("task file '{name}' is listed more than once")]
    DuplicateTask { name: String },
}

/// Failure of a whole swarm run.
#[derive(Error, Debug)]
pub enum SwarmError {
    #[error("failed to reset workspace {}: {source}", path.display())]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("discovery failed: {0:#}")]
    Discovery(anyhow::Error),

    #[error("invalid blueprint: {0}")]
    InvalidBlueprint(#[from] BlueprintError),

    #[error("role '{role}' is already staffed")]
    RoleConflict { role: String },

    #[error("failed to hire '{role}': {reason}")]
    Hire { role: String, reason: String },
}

/// Result type alias for swarm operations.
pub type Result<T> = std::result::Result<T, SwarmError>;
