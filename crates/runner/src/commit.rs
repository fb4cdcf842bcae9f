// runner/src/commit.rs

use crate::tools::{Broadcaster, ExitPolicy, Miner, Signer, StageOutcome};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use storage::{ActionName, ActionSequence, ArtifactStore, StorageError};

/// Default number of blocks the block producer is asked for per commit.
pub const DEFAULT_BLOCK_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitStage {
    Persist,
    Sign,
    Broadcast,
    Advance,
}

impl fmt::Display for CommitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommitStage::Persist => "persist",
            CommitStage::Sign => "sign",
            CommitStage::Broadcast => "broadcast",
            CommitStage::Advance => "advance",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("Persist failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to start {program} for {stage} stage: {source}")]
    Spawn {
        stage: CommitStage,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} stage failed with exit code {}", fmt_exit_code(.exit_code))]
    Stage {
        stage: CommitStage,
        exit_code: Option<i32>,
    },

    #[error("Signer reported success but {path} was not written")]
    MissingSignedTx { path: PathBuf },

    #[error("Action {0} was already committed in this run")]
    DuplicateAction(String),
}

fn fmt_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct CommitConfig {
    pub key_path: PathBuf,
    pub block_limit: u32,
    pub exit_policy: ExitPolicy,
}

impl CommitConfig {
    pub fn new(key_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
            block_limit: DEFAULT_BLOCK_LIMIT,
            exit_policy: ExitPolicy::Strict,
        }
    }
}

/// Files produced by one successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitReceipt {
    pub action: String,
    pub result_path: PathBuf,
    pub signed_tx_path: PathBuf,
}

/// persist -> sign -> broadcast -> advance.
///
/// Each stage is awaited to completion and its outcome inspected before the
/// next one starts. Under [`ExitPolicy::Strict`] the first failing stage ends
/// the commit; artifacts already written are left in place.
pub struct CommitPipeline {
    store: ArtifactStore,
    signer: Box<dyn Signer>,
    broadcaster: Box<dyn Broadcaster>,
    miner: Box<dyn Miner>,
    config: CommitConfig,
    sequence: ActionSequence,
    committed: HashSet<ActionName>,
    receipts: Vec<CommitReceipt>,
}

impl CommitPipeline {
    pub fn new(
        store: ArtifactStore,
        signer: Box<dyn Signer>,
        broadcaster: Box<dyn Broadcaster>,
        miner: Box<dyn Miner>,
        config: CommitConfig,
    ) -> Self {
        Self {
            store,
            signer,
            broadcaster,
            miner,
            config,
            sequence: ActionSequence::new(),
            committed: HashSet::new(),
            receipts: Vec::new(),
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Next per-run sequence number for an action name.
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence.next()
    }

    /// All commits completed so far, in order.
    pub fn receipts(&self) -> &[CommitReceipt] {
        &self.receipts
    }

    pub async fn commit(
        &mut self,
        result: &serde_json::Value,
        action: ActionName,
    ) -> Result<CommitReceipt, CommitError> {
        if !self.committed.insert(action.clone()) {
            return Err(CommitError::DuplicateAction(action.to_string()));
        }

        tracing::debug!(action = %action, stage = %CommitStage::Persist, "commit stage");
        let result_path = self.store.persist(result, &action)?;
        self.store.discard_signed_tx(&action)?;
        let signed_tx_path = self.store.signed_tx_path(&action);

        tracing::debug!(action = %action, stage = %CommitStage::Sign, "commit stage");
        let outcome = self
            .signer
            .sign(&self.config.key_path, &result_path, &signed_tx_path)
            .await;
        self.check(CommitStage::Sign, outcome)?;
        if self.config.exit_policy == ExitPolicy::Strict && !signed_tx_path.exists() {
            return Err(CommitError::MissingSignedTx {
                path: signed_tx_path,
            });
        }

        tracing::debug!(action = %action, stage = %CommitStage::Broadcast, "commit stage");
        let outcome = self.broadcaster.broadcast(&signed_tx_path).await;
        self.check(CommitStage::Broadcast, outcome)?;

        tracing::debug!(action = %action, stage = %CommitStage::Advance, "commit stage");
        let outcome = self.miner.advance(self.config.block_limit).await;
        self.check(CommitStage::Advance, outcome)?;

        tracing::info!(action = %action, path = %result_path.display(), "committed");
        let receipt = CommitReceipt {
            action: action.to_string(),
            result_path,
            signed_tx_path,
        };
        self.receipts.push(receipt.clone());
        Ok(receipt)
    }

    /// Decide whether a stage's result lets the commit continue. Under
    /// [`ExitPolicy::Lenient`] a command that could not be started counts as a
    /// failed stage rather than a fatal error.
    fn check(
        &self,
        stage: CommitStage,
        outcome: Result<StageOutcome, CommitError>,
    ) -> Result<(), CommitError> {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err @ CommitError::Spawn { .. })
                if self.config.exit_policy == ExitPolicy::Lenient =>
            {
                tracing::warn!(stage = %stage, "{}, continuing (lenient mode)", err);
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        if outcome.is_success() {
            return Ok(());
        }
        match self.config.exit_policy {
            ExitPolicy::Strict => Err(CommitError::Stage {
                stage,
                exit_code: outcome.exit_code,
            }),
            ExitPolicy::Lenient => {
                tracing::warn!(
                    stage = %stage,
                    exit_code = ?outcome.exit_code,
                    "external command failed, continuing (lenient mode)"
                );
                Ok(())
            }
        }
    }
}
