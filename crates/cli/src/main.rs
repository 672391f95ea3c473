//! `dev-swarm`: plan a project with an architect agent, then build it file by
//! file with hired specialists.

mod telemetry;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use dev_swarm_core::config::SwarmConfig;
use dev_swarm_core::models::LlmProvider;
use dev_swarm_core::swarm::{Coordinator, RoleCollisionPolicy};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "dev-swarm")]
#[command(about = "Plan-then-build multi-agent code generator", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<CliCommand>,

    #[command(flatten)]
    overrides: Overrides,

    /// JSON config file (keys of SwarmConfig)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as newline-delimited JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Reset the workspace, plan, hire and build (default)
    Run,
    /// Ask the architect for a blueprint and print the limited plan as JSON
    Plan,
}

/// Settings that override the config file and environment
#[derive(ClapArgs, Clone, Default)]
struct Overrides {
    /// What to build
    #[arg(short, long, global = true)]
    requirement: Option<String>,
    /// Output directory (wiped at the start of `run`)
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,
    #[arg(long, global = true)]
    max_agents: Option<usize>,
    #[arg(long, global = true)]
    max_tasks: Option<usize>,
    /// openai, anthropic, gemini, openrouter, grok or deepseek
    #[arg(long, global = true)]
    provider: Option<LlmProvider>,
    #[arg(long, global = true)]
    manager_model: Option<String>,
    #[arg(long, global = true)]
    worker_model: Option<String>,
    /// OpenAI-compatible endpoint
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// overwrite, reject or disambiguate
    #[arg(long, global = true)]
    on_role_collision: Option<RoleCollisionPolicy>,
    /// Sessions per task before it counts as failed
    #[arg(long, global = true)]
    max_attempts: Option<u32>,
    /// Skip remaining tasks after the first failure
    #[arg(long, global = true)]
    fail_fast: bool,
}

impl Overrides {
    fn apply(self, config: &mut SwarmConfig) {
        if let Some(provider) = self.provider {
            config.set_provider(provider);
        }
        if let Some(requirement) = self.requirement {
            config.user_requirement = requirement;
        }
        if let Some(workspace) = self.workspace {
            config.workspace_dir = workspace;
        }
        if let Some(max_agents) = self.max_agents {
            config.max_agents = max_agents;
        }
        if let Some(max_tasks) = self.max_tasks {
            config.max_tasks = max_tasks;
        }
        if let Some(model) = self.manager_model {
            config.manager_model = Some(model);
        }
        if let Some(model) = self.worker_model {
            config.worker_model = Some(model);
        }
        if let Some(url) = self.base_url {
            config.base_url = Some(url);
        }
        if let Some(policy) = self.on_role_collision {
            config.on_role_collision = policy;
        }
        if let Some(attempts) = self.max_attempts {
            config.max_attempts = attempts;
        }
        if self.fail_fast {
            config.fail_fast = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    telemetry::init_tracing(args.json, Level::INFO);

    let mut config = SwarmConfig::load(args.config.as_deref())?;
    args.overrides.apply(&mut config);

    let key_var = config.provider.api_key_var();
    if std::env::var(key_var).map(|v| v.trim().is_empty()).unwrap_or(true) {
        tracing::warn!(
            provider = %config.provider,
            "{} is not set, LLM sessions will fail",
            key_var
        );
    }

    let mut coordinator = Coordinator::new(config);

    match args.command.unwrap_or(CliCommand::Run) {
        CliCommand::Plan => {
            let plan = coordinator.plan().await?;
            let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
            println!("{}", json);
        }
        CliCommand::Run => {
            println!("🚀 Dev swarm online");
            let summary = match coordinator.run().await {
                Ok(summary) => summary,
                Err(e) => {
                    eprintln!("❌ Swarm failed: {}", e);
                    std::process::exit(1);
                }
            };
            println!("\n{}", summary.banner());
            if !summary.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_run() {
        let args = Args::try_parse_from(["dev-swarm"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.json);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "dev-swarm",
            "plan",
            "--requirement",
            "A todo app",
            "--provider",
            "anthropic",
            "--max-tasks",
            "6",
            "--on-role-collision",
            "disambiguate",
            "--fail-fast",
        ])
        .unwrap();
        assert!(matches!(args.command, Some(CliCommand::Plan)));

        let mut config = SwarmConfig::default();
        args.overrides.apply(&mut config);

        assert_eq!(config.user_requirement, "A todo app");
        assert_eq!(config.provider, LlmProvider::Anthropic);
        assert_eq!(config.manager_model(), LlmProvider::Anthropic.default_model());
        assert_eq!(config.max_tasks, 6);
        assert_eq!(config.max_agents, 2);
        assert_eq!(config.on_role_collision, RoleCollisionPolicy::Disambiguate);
        assert!(config.fail_fast);
    }

    #[test]
    fn test_rejects_unknown_provider() {
        assert!(Args::try_parse_from(["dev-swarm", "--provider", "mystery"]).is_err());
    }

    #[test]
    fn test_provider_flag_keeps_model_from_env() {
        let args = Args::try_parse_from(["dev-swarm", "--provider", "openrouter"]).unwrap();
        let mut config = SwarmConfig::default();
        config
            .apply_env(|key: &str| (key == "MANAGER_MODEL").then(|| "gpt-4o".to_string()))
            .unwrap();

        args.overrides.apply(&mut config);

        assert_eq!(config.provider, LlmProvider::OpenRouter);
        assert_eq!(config.manager_model_config().model, "gpt-4o");
    }
}
