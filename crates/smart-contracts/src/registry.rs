// smart-contracts/src/registry.rs

use crate::fixtures::*;
use crate::{ContractError, ContractResult};
use std::collections::BTreeMap;

/// A deployable contract: bytecode plus optional constructor arguments, both
/// as bare hex without a `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDescriptor {
    pub name: String,
    pub bytecode: String,
    pub constructor_args: String,
}

impl ContractDescriptor {
    pub fn new(name: impl Into<String>, bytecode: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytecode: bytecode.into(),
            constructor_args: String::new(),
        }
    }

    pub fn with_constructor_args(mut self, args: impl Into<String>) -> Self {
        self.constructor_args = args.into();
        self
    }

    /// Check that bytecode and arguments are well-formed hex.
    pub fn validate(&self) -> ContractResult<()> {
        if self.bytecode.is_empty() {
            return Err(ContractError::InvalidBytecode {
                name: self.name.clone(),
                reason: "empty".into(),
            });
        }
        hex::decode(&self.bytecode).map_err(|e| ContractError::InvalidBytecode {
            name: self.name.clone(),
            reason: e.to_string(),
        })?;
        hex::decode(&self.constructor_args).map_err(|e| ContractError::InvalidConstructorArgs {
            name: self.name.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// `0x<bytecode><constructor args>`, the `data` parameter of `create`.
    pub fn deploy_payload(&self) -> String {
        format!("0x{}{}", self.bytecode, self.constructor_args)
    }
}

/// Immutable name -> descriptor table.
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    contracts: BTreeMap<String, ContractDescriptor>,
}

impl ContractRegistry {
    pub fn new(descriptors: impl IntoIterator<Item = ContractDescriptor>) -> ContractResult<Self> {
        let mut contracts = BTreeMap::new();
        for descriptor in descriptors {
            descriptor.validate()?;
            if contracts.contains_key(&descriptor.name) {
                return Err(ContractError::DuplicateName(descriptor.name));
            }
            contracts.insert(descriptor.name.clone(), descriptor);
        }
        Ok(Self { contracts })
    }

    /// The fixture contracts shipped with the runner.
    pub fn builtin() -> ContractResult<Self> {
        Self::new([
            ContractDescriptor::new(SIMPLE_STORAGE, SIMPLE_STORAGE_BIN),
            ContractDescriptor::new(LOG_EVENTS, LOG_EVENTS_BIN),
            ContractDescriptor::new(SELF_DESTRUCT, SELF_DESTRUCT_BIN)
                .with_constructor_args(SELF_DESTRUCT_BENEFICIARY_ARG),
        ])
    }

    pub fn get(&self, name: &str) -> ContractResult<&ContractDescriptor> {
        self.contracts
            .get(name)
            .ok_or_else(|| ContractError::ContractNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
