//! # Swarm Coordinator
//!
//! Drives one run: reset the workspace, let the architect plan, cap the plan,
//! hire the crew, then build each file in its own session, one at a time.

use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::config::SwarmConfig;
use crate::error::SwarmError;
use crate::skills::agent_definitions::{architect_agent, SpecialistFactory, SwarmAgent};
use crate::skills::{ArchitectSkill, SpecialistSkill};
use crate::workspace;

use super::crew::Crew;
use super::events::{SwarmEvent, SwarmEventKind};
use super::executor::{run_atomic_task, TaskOutcome, TaskStatus};
use super::limiter::LimitedPlan;
use super::pipeline::{Pipeline, PipelineStage};
use super::session::{discovery_inputs, AgentFactory, Planner, TaskRunner};

/// Result of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub project_name: String,
    pub workspace: PathBuf,
    /// Roles on the crew, sorted (includes the Architect)
    pub crew: Vec<String>,
    /// Agents cut by the safety limits
    pub dropped_agents: usize,
    /// Tasks cut by the safety limits
    pub dropped_tasks: usize,
    /// One entry per task in the limited plan, in build order
    pub outcomes: Vec<TaskOutcome>,
    /// Files present in the workspace after the run
    pub files: Vec<String>,
    pub events: Vec<SwarmEvent>,
}

impl RunSummary {
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_completed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.completed() - self.failed()
    }

    /// Every planned task was built and confirmed
    pub fn is_success(&self) -> bool {
        self.completed() == self.outcomes.len()
    }

    /// Closing console banner
    pub fn banner(&self) -> String {
        let headline = if self.is_success() {
            "MISSION ACCOMPLISHED: ALL FILES CREATED".to_string()
        } else {
            format!(
                "MISSION INCOMPLETE: {}/{} FILES CREATED",
                self.completed(),
                self.outcomes.len()
            )
        };

        let mut lines = vec![
            "####################################".to_string(),
            format!("## {} ##", headline),
            "####################################".to_string(),
        ];
        for outcome in &self.outcomes {
            let line = match &outcome.status {
                TaskStatus::Completed { path, bytes } => {
                    format!("  [ok]      {} ({} bytes, {})", path, bytes, outcome.agent_role)
                }
                TaskStatus::Failed { reason } => {
                    format!("  [failed]  {} ({}): {}", outcome.task, outcome.agent_role, reason)
                }
                TaskStatus::Skipped => format!("  [skipped] {}", outcome.task),
            };
            lines.push(line);
        }
        if self.dropped_tasks > 0 {
            lines.push(format!(
                "  {} planned task(s) were over the safety limit and not built",
                self.dropped_tasks
            ));
        }
        lines.join("\n")
    }
}

/// The swarm coordinator
pub struct Coordinator {
    config: SwarmConfig,
    architect: SwarmAgent,
    planner: Box<dyn Planner>,
    factory: Box<dyn AgentFactory>,
    runner: Box<dyn TaskRunner>,
    pipeline: Pipeline,
    events: Vec<SwarmEvent>,
    event_tx: Option<mpsc::Sender<SwarmEvent>>,
}

impl Coordinator {
    /// Coordinator backed by radkit LLM sessions
    pub fn new(config: SwarmConfig) -> Self {
        let planner = Box::new(ArchitectSkill::new(architect_agent(
            config.manager_model_config(),
        )));
        let factory = Box::new(SpecialistFactory::new(config.worker_model_config()));
        let runner = Box::new(SpecialistSkill::new());
        Self::with_collaborators(config, planner, factory, runner)
    }

    /// Coordinator with explicit collaborators
    pub fn with_collaborators(
        config: SwarmConfig,
        planner: Box<dyn Planner>,
        factory: Box<dyn AgentFactory>,
        runner: Box<dyn TaskRunner>,
    ) -> Self {
        Self {
            architect: architect_agent(config.manager_model_config()),
            config,
            planner,
            factory,
            runner,
            pipeline: Pipeline::new(),
            events: Vec::new(),
            event_tx: None,
        }
    }

    /// Set event channel for streaming events
    pub fn with_event_channel(mut self, tx: mpsc::Sender<SwarmEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn stage(&self) -> PipelineStage {
        self.pipeline.stage
    }

    /// Events emitted so far
    pub fn events(&self) -> &[SwarmEvent] {
        &self.events
    }

    /// Emit an event
    async fn emit(&mut self, event: SwarmEvent) {
        self.events.push(event.clone());
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    fn enter(&mut self, stage: PipelineStage) {
        while self.pipeline.stage != stage && !self.pipeline.is_complete() {
            self.pipeline.advance();
        }
        tracing::debug!(stage = ?self.pipeline.stage, "Pipeline stage");
    }

    async fn abort(&mut self, err: SwarmError) -> SwarmError {
        self.pipeline.fail();
        tracing::error!(error = %err, "Swarm run aborted");
        self.emit(
            SwarmEvent::new(SwarmEventKind::RunFailed, "coordinator")
                .with_data(json!({ "error": err.to_string() })),
        )
        .await;
        err
    }

    /// Discovery, validation and limiting, without touching the workspace.
    pub async fn plan(&mut self) -> Result<LimitedPlan, SwarmError> {
        self.pipeline = Pipeline::starting_at(PipelineStage::Discovering);
        match self.discover_and_limit().await {
            Ok(plan) => Ok(plan),
            Err(err) => Err(self.abort(err).await),
        }
    }

    async fn discover_and_limit(&mut self) -> Result<LimitedPlan, SwarmError> {
        self.enter(PipelineStage::Discovering);
        tracing::info!(model = %self.architect.model.model, "Running discovery");
        let inputs = discovery_inputs(&self.config.user_requirement);
        let blueprint = self
            .planner
            .discover(&inputs)
            .await
            .map_err(SwarmError::Discovery)?;
        blueprint.validate()?;

        tracing::info!(
            project = %blueprint.project_name,
            agents = blueprint.required_agents.len(),
            tasks = blueprint.dynamic_tasks.len(),
            "Blueprint created"
        );
        self.emit(
            SwarmEvent::new(SwarmEventKind::BlueprintCreated, &self.architect.role)
                .with_data(json!({
                    "project_name": blueprint.project_name,
                    "agents": blueprint.required_agents.len(),
                    "tasks": blueprint.dynamic_tasks.len(),
                })),
        )
        .await;

        self.enter(PipelineStage::Limiting);
        let plan = self.config.limits().apply(&blueprint);
        if plan.dropped_agents > 0 || plan.dropped_tasks > 0 {
            tracing::warn!(
                dropped_agents = plan.dropped_agents,
                dropped_tasks = plan.dropped_tasks,
                "Blueprint exceeds safety limits, extra entries discarded"
            );
            self.emit(
                SwarmEvent::new(SwarmEventKind::PlanTruncated, "coordinator").with_data(json!({
                    "dropped_agents": plan.dropped_agents,
                    "dropped_tasks": plan.dropped_tasks,
                })),
            )
            .await;
        }
        Ok(plan)
    }

    /// Run the full plan-then-build workflow.
    ///
    /// Stage failures (workspace, discovery, validation, hiring) abort the
    /// run; task failures are recorded in the summary and the loop moves on
    /// unless `fail_fast` is set.
    #[tracing::instrument(skip(self), fields(workspace = %self.config.workspace_dir.display()))]
    pub async fn run(&mut self) -> Result<RunSummary, SwarmError> {
        self.pipeline = Pipeline::new();
        self.emit(SwarmEvent::new(SwarmEventKind::RunStarted, "coordinator"))
            .await;

        // Stage 1: clean workspace
        let root = self.config.workspace_dir.clone();
        if let Err(err) = workspace::reset_workspace(&root).await {
            return Err(self.abort(err).await);
        }
        self.emit(
            SwarmEvent::new(SwarmEventKind::WorkspaceReset, "coordinator")
                .with_data(json!({ "path": root.display().to_string() })),
        )
        .await;

        // Stage 2-3: discovery and safety limits
        println!(
            "## Phase 1: Discovery & Architecture Research using {}...",
            self.architect.model.model
        );
        let plan = match self.discover_and_limit().await {
            Ok(plan) => plan,
            Err(err) => return Err(self.abort(err).await),
        };
        println!("\n## Blueprint Created: {}", plan.project_name);

        // Stage 4: dynamic assembly
        self.enter(PipelineStage::Assembling);
        let crew = Crew::new(self.architect.clone(), self.config.on_role_collision);
        let crew = match self.hire_all(crew, &plan).await {
            Ok(crew) => crew,
            Err(err) => return Err(self.abort(err).await),
        };

        // Stage 5: atomic execution loop
        self.enter(PipelineStage::Executing);
        println!(
            "\n## Phase 2: Executing {} Atomic Build Tasks...",
            plan.task_list.len()
        );
        let outcomes = self.execute(&crew, &plan).await;

        self.enter(PipelineStage::Complete);
        let summary = RunSummary {
            project_name: plan.project_name.clone(),
            workspace: root.clone(),
            crew: crew.roles(),
            dropped_agents: plan.dropped_agents,
            dropped_tasks: plan.dropped_tasks,
            files: workspace::inventory(&root),
            outcomes,
            events: Vec::new(),
        };

        tracing::info!(
            completed = summary.completed(),
            failed = summary.failed(),
            skipped = summary.skipped(),
            "Swarm run finished"
        );
        self.emit(
            SwarmEvent::new(SwarmEventKind::RunCompleted, "coordinator").with_data(json!({
                "completed": summary.completed(),
                "failed": summary.failed(),
                "skipped": summary.skipped(),
            })),
        )
        .await;

        Ok(RunSummary {
            events: self.events.clone(),
            ..summary
        })
    }

    async fn hire_all(&mut self, mut crew: Crew, plan: &LimitedPlan) -> Result<Crew, SwarmError> {
        for spec in &plan.hiring_list {
            let hire = crew.hire(spec, self.factory.as_ref())?;
            println!("   -> Hired Specialist: {}", hire.role);
            tracing::info!(role = %hire.role, replaced = hire.replaced, "Hired specialist");
            self.emit(
                SwarmEvent::new(SwarmEventKind::AgentHired, "coordinator").with_data(json!({
                    "role": hire.role,
                    "requested_role": spec.role,
                    "replaced": hire.replaced,
                })),
            )
            .await;
        }
        Ok(crew)
    }

    async fn execute(&mut self, crew: &Crew, plan: &LimitedPlan) -> Vec<TaskOutcome> {
        let mut outcomes = Vec::with_capacity(plan.task_list.len());
        let mut halted = false;

        for spec in &plan.task_list {
            if halted {
                let outcome = TaskOutcome::skipped(crew, spec);
                self.emit(
                    SwarmEvent::new(SwarmEventKind::TaskSkipped, &outcome.agent_role)
                        .with_task(&spec.name),
                )
                .await;
                outcomes.push(outcome);
                continue;
            }

            println!("\n🛠️  Building Module: {}...", spec.name);
            let role = crew.resolve(&spec.assigned_agent_role).agent.role.clone();
            self.emit(SwarmEvent::new(SwarmEventKind::TaskStarted, &role).with_task(&spec.name))
                .await;

            let outcome = run_atomic_task(
                crew,
                spec,
                self.runner.as_ref(),
                &self.config.workspace_dir,
                self.config.max_attempts,
            )
            .await;

            let event = match &outcome.status {
                TaskStatus::Completed { path, bytes } => {
                    SwarmEvent::new(SwarmEventKind::TaskCompleted, &outcome.agent_role)
                        .with_data(json!({ "path": path, "bytes": bytes, "attempts": outcome.attempts }))
                }
                TaskStatus::Failed { reason } => {
                    println!("   !! {} failed: {}", spec.name, reason);
                    if self.config.fail_fast {
                        halted = true;
                    }
                    SwarmEvent::new(SwarmEventKind::TaskFailed, &outcome.agent_role)
                        .with_data(json!({ "reason": reason, "attempts": outcome.attempts }))
                }
                TaskStatus::Skipped => {
                    SwarmEvent::new(SwarmEventKind::TaskSkipped, &outcome.agent_role)
                }
            };
            self.emit(event.with_task(&spec.name)).await;
            outcomes.push(outcome);
        }

        outcomes
    }
}
