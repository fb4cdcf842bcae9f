// runner/src/runtime.rs
use crate::commit::{CommitConfig, CommitPipeline};
use crate::config::RunConfig;
use crate::scenarios::{Scenario, ScenarioContext, ScenarioReport};
use crate::tools::{Broadcaster, CommandBroadcaster, CommandMiner, CommandSigner, Miner, Signer};
use rpc::RpcClient;
use serde::Serialize;
use smart_contracts::ContractRegistry;
use std::path::PathBuf;
use storage::ArtifactStore;

pub const SUMMARY_FILE: &str = "run-summary.json";

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub rpc_url: String,
    pub scenarios: Vec<ScenarioReport>,
}

impl RunSummary {
    pub fn artifact_count(&self) -> usize {
        self.scenarios.iter().map(|s| s.artifacts.len()).sum()
    }
}

/// Owns every collaborator of a run and drives the scenarios one after another.
pub struct Runner {
    config: RunConfig,
    client: RpcClient,
    registry: ContractRegistry,
    pipeline: CommitPipeline,
}

impl Runner {
    /// Wire the command-line signer, broadcaster and node binary from `config`.
    pub fn new(config: RunConfig) -> anyhow::Result<Self> {
        let commands = &config.settings.commands;
        let signer = CommandSigner::new(commands.signer.clone());
        let broadcaster = CommandBroadcaster::new(commands.broadcaster.clone());
        let miner = CommandMiner::new(config.node_bin.clone(), config.node_dir()?);

        tracing::info!(
            signer = %commands.signer,
            broadcaster = %commands.broadcaster,
            node = %config.node_bin.display(),
            "using external commands"
        );

        Self::with_tools(config, Box::new(signer), Box::new(broadcaster), Box::new(miner))
    }

    pub fn with_tools(
        config: RunConfig,
        signer: Box<dyn Signer>,
        broadcaster: Box<dyn Broadcaster>,
        miner: Box<dyn Miner>,
    ) -> anyhow::Result<Self> {
        tracing::info!("Initializing runner components");

        let client = RpcClient::new(&config.settings.rpc.url)?;
        let registry = ContractRegistry::builtin()?;
        let store = ArtifactStore::new(&config.target_dir)?;

        let commit_config = CommitConfig {
            key_path: config.privkey_path.clone(),
            block_limit: config.settings.commands.block_limit,
            exit_policy: config.settings.commands.exit_policy,
        };
        let pipeline = CommitPipeline::new(store, signer, broadcaster, miner, commit_config);

        tracing::info!(
            rpc = %client.url(),
            target_dir = %config.target_dir.display(),
            contracts = registry.len(),
            exit_policy = ?config.settings.commands.exit_policy,
            "Runner components initialized"
        );

        Ok(Self {
            config,
            client,
            registry,
            pipeline,
        })
    }

    pub fn pipeline(&self) -> &CommitPipeline {
        &self.pipeline
    }

    /// Run `scenarios` strictly in order. The first failure aborts the run.
    pub async fn run(&mut self, scenarios: &[Scenario]) -> anyhow::Result<RunSummary> {
        let mut reports = Vec::with_capacity(scenarios.len());

        for scenario in scenarios {
            tracing::info!(scenario = %scenario, "starting scenario");
            let mut ctx = ScenarioContext {
                client: &self.client,
                pipeline: &mut self.pipeline,
                registry: &self.registry,
                sender: &self.config.settings.rpc.sender,
                verify: self.config.settings.scenarios.verify,
            };
            let report = scenario.run(&mut ctx).await?;
            reports.push(report);
        }

        let summary = RunSummary {
            rpc_url: self.client.url().to_string(),
            scenarios: reports,
        };
        let path = self.write_summary(&summary)?;
        tracing::info!(
            scenarios = summary.scenarios.len(),
            artifacts = summary.artifact_count(),
            summary = %path.display(),
            "run complete"
        );
        Ok(summary)
    }

    fn write_summary(&self, summary: &RunSummary) -> anyhow::Result<PathBuf> {
        Ok(self.pipeline.store().write_document(SUMMARY_FILE, summary)?)
    }
}
