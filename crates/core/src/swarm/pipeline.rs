//! # Pipeline Stages
//!
//! The run is strictly linear: every stage finishes before the next starts,
//! and any stage can fail the run.

use serde::{Deserialize, Serialize};

/// Stage of a swarm run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Wiping and recreating the output directory
    ResettingWorkspace,
    /// Architect producing the blueprint
    Discovering,
    /// Truncating the blueprint to the safety limits
    Limiting,
    /// Hiring specialists
    Assembling,
    /// Running atomic build tasks
    Executing,
    /// Complete
    Complete,
    /// Failed
    Failed,
}

/// The pipeline state machine
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Current stage
    pub stage: PipelineStage,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            stage: PipelineStage::ResettingWorkspace,
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at an arbitrary stage (planning-only runs skip the reset)
    pub fn starting_at(stage: PipelineStage) -> Self {
        Self { stage }
    }

    /// Advance to the next stage
    pub fn advance(&mut self) -> PipelineStage {
        self.stage = match self.stage {
            PipelineStage::ResettingWorkspace => PipelineStage::Discovering,
            PipelineStage::Discovering => PipelineStage::Limiting,
            PipelineStage::Limiting => PipelineStage::Assembling,
            PipelineStage::Assembling => PipelineStage::Executing,
            PipelineStage::Executing => PipelineStage::Complete,
            PipelineStage::Complete => PipelineStage::Complete,
            PipelineStage::Failed => PipelineStage::Failed,
        };
        self.stage
    }

    /// Fail the pipeline
    pub fn fail(&mut self) {
        self.stage = PipelineStage::Failed;
    }

    /// Check if pipeline is complete
    pub fn is_complete(&self) -> bool {
        matches!(self.stage, PipelineStage::Complete | PipelineStage::Failed)
    }

    /// Check if pipeline succeeded
    pub fn is_success(&self) -> bool {
        self.stage == PipelineStage::Complete
    }
}
