// runner/src/session.rs

use crate::commit::{CommitPipeline, CommitReceipt};
use crate::{RunError, RunResult};
use rpc::{ContractAddress, RpcClient};
use smart_contracts::ContractDescriptor;
use storage::ActionName;

/// Service error fragments meaning "no contract at this address".
const ABSENT_MARKERS: [&str; 3] = ["destructed", "not found", "does not exist"];

/// One deploy-then-invoke scenario against a single contract.
///
/// The session owns the address returned by its own `create`; every later
/// invocation targets exactly that address.
pub struct ContractSession<'a> {
    client: &'a RpcClient,
    pipeline: &'a mut CommitPipeline,
    contract: &'a ContractDescriptor,
    sender: &'a str,
    address: Option<ContractAddress>,
    receipts: Vec<CommitReceipt>,
}

impl<'a> ContractSession<'a> {
    pub fn new(
        client: &'a RpcClient,
        pipeline: &'a mut CommitPipeline,
        contract: &'a ContractDescriptor,
        sender: &'a str,
    ) -> Self {
        Self {
            client,
            pipeline,
            contract,
            sender,
            address: None,
            receipts: Vec::new(),
        }
    }

    /// Commits made by this session, in order.
    pub fn receipts(&self) -> &[CommitReceipt] {
        &self.receipts
    }

    pub fn into_receipts(self) -> Vec<CommitReceipt> {
        self.receipts
    }

    /// Create the contract and commit the deployment as `create-<name>-<seq>`.
    pub async fn deploy(&mut self) -> RunResult<ContractAddress> {
        if let Some(address) = &self.address {
            return Err(RunError::AlreadyDeployed {
                contract: self.contract.name.clone(),
                address: address.to_string(),
            });
        }

        tracing::info!(
            contract = %self.contract.name,
            args = %self.contract.constructor_args,
            "deploying contract"
        );
        let outcome = self
            .client
            .create(self.sender, &self.contract.deploy_payload())
            .await?;

        let action = ActionName::create(&self.contract.name, self.pipeline.next_sequence())?;
        let receipt = self.pipeline.commit(&outcome.result, action).await?;
        self.receipts.push(receipt);

        self.address = Some(outcome.address.clone());
        Ok(outcome.address)
    }

    /// Mutating call, committed as `call-<name>-<address>-<calldata>-<seq>`.
    pub async fn invoke(&mut self, calldata: &str) -> RunResult<CommitReceipt> {
        let address = self.deployed()?.clone();
        let result = self.client.call(self.sender, &address, calldata).await?;

        let action = ActionName::call(
            &self.contract.name,
            address.as_str(),
            calldata,
            self.pipeline.next_sequence(),
        )?;
        let receipt = self.pipeline.commit(&result, action).await?;
        self.receipts.push(receipt.clone());
        Ok(receipt)
    }

    /// Read-only call. Never committed.
    pub async fn query(&self, calldata: &str) -> RunResult<serde_json::Value> {
        let address = self.deployed()?;
        Ok(self.client.static_call(self.sender, address, calldata).await?)
    }

    /// Whether the deployed contract still answers a static call.
    ///
    /// A service error naming the contract as destructed or missing means
    /// absent; any other failure is propagated.
    pub async fn contract_exists(&self, calldata: &str) -> RunResult<bool> {
        let address = self.deployed()?;
        match self.client.static_call(self.sender, address, calldata).await {
            Ok(_) => Ok(true),
            Err(err) if err.service_message().is_some_and(is_absent) => {
                tracing::info!(address = %address, reason = %err, "contract absent");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn deployed(&self) -> RunResult<&ContractAddress> {
        self.address
            .as_ref()
            .ok_or_else(|| RunError::NotDeployed(self.contract.name.clone()))
    }
}

fn is_absent(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    ABSENT_MARKERS.iter().any(|marker| message.contains(marker))
}
