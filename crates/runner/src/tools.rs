// runner/src/tools.rs

use crate::commit::{CommitError, CommitStage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tokio::process::Command;

/// What to do when an external command exits nonzero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitPolicy {
    /// Abort the run with [`CommitError::Stage`].
    #[default]
    Strict,
    /// Log a warning and carry on with the next stage.
    Lenient,
}

/// Observed result of one external stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageOutcome {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl StageOutcome {
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl From<ExitStatus> for StageOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            exit_code: status.code(),
        }
    }
}

/// Turns a persisted transaction intent into a signed transaction file.
#[async_trait]
pub trait Signer: Send + Sync {
    async fn sign(
        &self,
        key_path: &Path,
        unsigned_tx: &Path,
        signed_tx: &Path,
    ) -> Result<StageOutcome, CommitError>;
}

/// Submits a signed transaction without waiting for confirmation.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn broadcast(&self, signed_tx: &Path) -> Result<StageOutcome, CommitError>;
}

/// Forces chain progress so a broadcast transaction gets included.
#[async_trait]
pub trait Miner: Send + Sync {
    async fn advance(&self, block_limit: u32) -> Result<StageOutcome, CommitError>;
}

/// `<program> sign-tx -k <key> -t <unsigned> -o <signed>`
#[derive(Debug, Clone)]
pub struct CommandSigner {
    program: String,
}

impl CommandSigner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Signer for CommandSigner {
    async fn sign(
        &self,
        key_path: &Path,
        unsigned_tx: &Path,
        signed_tx: &Path,
    ) -> Result<StageOutcome, CommitError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("sign-tx")
            .arg("-k")
            .arg(key_path)
            .arg("-t")
            .arg(unsigned_tx)
            .arg("-o")
            .arg(signed_tx);
        run_command(CommitStage::Sign, cmd).await
    }
}

/// `<program> tx send --tx-file <signed> --skip-check`
#[derive(Debug, Clone)]
pub struct CommandBroadcaster {
    program: String,
}

impl CommandBroadcaster {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Broadcaster for CommandBroadcaster {
    async fn broadcast(&self, signed_tx: &Path) -> Result<StageOutcome, CommitError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("tx")
            .arg("send")
            .arg("--tx-file")
            .arg(signed_tx)
            .arg("--skip-check");
        run_command(CommitStage::Broadcast, cmd).await
    }
}

/// `<node_bin> miner -C <node_dir> -l <blocks>`
#[derive(Debug, Clone)]
pub struct CommandMiner {
    node_bin: PathBuf,
    node_dir: PathBuf,
}

impl CommandMiner {
    pub fn new(node_bin: impl Into<PathBuf>, node_dir: impl Into<PathBuf>) -> Self {
        Self {
            node_bin: node_bin.into(),
            node_dir: node_dir.into(),
        }
    }
}

#[async_trait]
impl Miner for CommandMiner {
    async fn advance(&self, block_limit: u32) -> Result<StageOutcome, CommitError> {
        let mut cmd = Command::new(&self.node_bin);
        cmd.arg("miner")
            .arg("-C")
            .arg(&self.node_dir)
            .arg("-l")
            .arg(block_limit.to_string());
        run_command(CommitStage::Advance, cmd).await
    }
}

/// Run a command to completion, inheriting stdio.
async fn run_command(stage: CommitStage, mut cmd: Command) -> Result<StageOutcome, CommitError> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    tracing::info!(stage = %stage, "[RUN]: {:?}", cmd.as_std());

    let status = cmd
        .status()
        .await
        .map_err(|source| CommitError::Spawn {
            stage,
            program: program.clone(),
            source,
        })?;

    let outcome = StageOutcome::from(status);
    tracing::debug!(stage = %stage, program = %program, exit_code = ?outcome.exit_code, "command finished");
    Ok(outcome)
}
