// smart-contracts/src/lib.rs

//! Fixture contracts exercised against the execution service
//!
//! Bytecode and calldata are precompiled constants. This crate only provides:
//! - Contract descriptors (name, bytecode, constructor arguments)
//! - An immutable registry built once at start-up
//! - Method selectors and scripted calldata

pub mod fixtures;
pub mod registry;

pub use registry::{ContractDescriptor, ContractRegistry};

/// Result type for contract fixture operations
pub type ContractResult<T> = Result<T, ContractError>;

/// Errors that can occur while assembling contract fixtures
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Contract not found: {0}")]
    ContractNotFound(String),

    #[error("Invalid bytecode for {name}: {reason}")]
    InvalidBytecode { name: String, reason: String },

    #[error("Invalid constructor arguments for {name}: {reason}")]
    InvalidConstructorArgs { name: String, reason: String },

    #[error("Duplicate contract name: {0}")]
    DuplicateName(String),
}
