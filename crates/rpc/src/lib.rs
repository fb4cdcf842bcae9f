// rpc/src/lib.rs

//! JSON-RPC client for the contract execution service
//!
//! The execution service computes transaction intents but never commits them.
//! This crate provides:
//! - The JSON-RPC 2.0 envelope types
//! - `RpcClient` with the `create`, `call` and `static_call` methods
//! - Classification of service, transport and protocol failures

pub mod client;
pub mod methods;
pub mod types;

pub use client::RpcClient;
pub use methods::{CreateOutcome, RpcMethod};
pub use types::*;

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The service answered with an `error` member.
    #[error("JSONRPC ERROR: {message}")]
    Service { code: Option<i64>, message: String },
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),
}

impl RpcError {
    /// Service-reported message, if this error came from the service.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            RpcError::Service { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type RpcResult<T> = Result<T, RpcError>;
