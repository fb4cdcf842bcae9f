// runner/src/lib.rs

//! Transaction lifecycle orchestration
//!
//! Turns RPC-computed transaction intents into on-chain state changes:
//! - `tools`: external signer, broadcaster and block producer
//! - `commit`: persist -> sign -> broadcast -> advance, strictly in order
//! - `session`: deploy-then-invoke against one contract
//! - `scenarios`: the scripted fixture scenarios
//! - `runtime`: wiring everything from a `RunConfig`

pub mod commit;
pub mod config;
pub mod runtime;
pub mod scenarios;
pub mod session;
pub mod tools;

pub use commit::{CommitConfig, CommitError, CommitPipeline, CommitReceipt, CommitStage};
pub use config::{RunConfig, RunSettings};
pub use runtime::{RunSummary, Runner};
pub use scenarios::{Scenario, ScenarioContext, ScenarioReport};
pub use session::ContractSession;
pub use tools::{
    Broadcaster, CommandBroadcaster, CommandMiner, CommandSigner, ExitPolicy, Miner, Signer,
    StageOutcome,
};

/// Errors raised while driving a scenario. None of them is recovered from.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Rpc(#[from] rpc::RpcError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error(transparent)]
    Contract(#[from] smart_contracts::ContractError),

    #[error(transparent)]
    Storage(#[from] storage::StorageError),

    #[error("Contract {0} has not been deployed in this session")]
    NotDeployed(String),

    #[error("Contract {contract} already deployed at {address}")]
    AlreadyDeployed { contract: String, address: String },

    #[error("Verification failed for {contract}: {reason}")]
    VerificationFailed { contract: String, reason: String },
}

pub type RunResult<T> = Result<T, RunError>;
