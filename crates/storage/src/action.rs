// storage/src/action.rs

use crate::{StorageError, StorageResult};
use std::fmt;

/// Identifier under which a commit's artifacts are stored.
///
/// Built from the contract name, the target address and the calldata, then
/// suffixed with a per-run sequence number so that two identical calls in one
/// run still land in different files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionName(String);

impl ActionName {
    /// `create-<contract>-<seq>`
    pub fn create(contract: &str, seq: u64) -> StorageResult<Self> {
        Self::parse(&format!("create-{}-{}", contract, seq))
    }

    /// `call-<contract>-<address>-<calldata>-<seq>`
    pub fn call(contract: &str, address: &str, calldata: &str, seq: u64) -> StorageResult<Self> {
        Self::parse(&format!("call-{}-{}-{}-{}", contract, address, calldata, seq))
    }

    /// Accept a raw name if it is safe to use as a file stem.
    pub fn parse(raw: &str) -> StorageResult<Self> {
        if raw.is_empty() {
            return Err(StorageError::InvalidActionName("empty".into()));
        }
        if raw.starts_with('.') {
            return Err(StorageError::InvalidActionName(raw.to_string()));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(StorageError::InvalidActionName(format!(
                "{} (contains {:?})",
                raw, bad
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-run monotonic counter feeding [`ActionName`] suffixes.
#[derive(Debug, Default)]
pub struct ActionSequence {
    next: u64,
}

impl ActionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> u64 {
        let seq = self.next;
        self.next += 1;
        seq
    }
}
