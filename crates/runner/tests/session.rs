// runner/tests/session.rs
mod common;

use common::{healthy_tools, mock_result, Journal, SENDER};
use runner::{CommitConfig, CommitPipeline, ContractSession, RunError};
use serde_json::json;
use smart_contracts::ContractDescriptor;
use storage::ArtifactStore;
use tempfile::TempDir;
use wiremock::MockServer;

fn pipeline(dir: &TempDir, journal: &Journal) -> CommitPipeline {
    let (signer, broadcaster, miner) = healthy_tools(journal);
    CommitPipeline::new(
        ArtifactStore::new(dir.path()).unwrap(),
        signer,
        broadcaster,
        miner,
        CommitConfig::new(dir.path().join("privkey")),
    )
}

#[tokio::test]
async fn test_invoke_before_deploy_is_rejected() {
    let server = MockServer::start().await;
    let client = rpc::RpcClient::new(&server.uri()).unwrap();
    let dir = TempDir::new().unwrap();
    let journal = Journal::default();
    let mut pipeline = pipeline(&dir, &journal);
    let contract = ContractDescriptor::new("Counter", "6080");

    let mut session = ContractSession::new(&client, &mut pipeline, &contract, SENDER);
    assert!(matches!(
        session.invoke("0x01").await,
        Err(RunError::NotDeployed(_))
    ));
    assert!(matches!(
        session.query("0x01").await,
        Err(RunError::NotDeployed(_))
    ));
    assert!(journal.entries().is_empty());
}

#[tokio::test]
async fn test_deploy_once_then_query_without_commit() {
    let server = MockServer::start().await;
    let address = "0x4444444444444444444444444444444444444444";
    mock_result(
        &server,
        "create",
        json!([SENDER, "0x6080abcd"]),
        json!({"contract_address": address}),
    )
    .await;
    mock_result(
        &server,
        "static_call",
        json!([SENDER, address, "0x6d4ce63c"]),
        json!({"return_data": "0x01"}),
    )
    .await;

    let client = rpc::RpcClient::new(&server.uri()).unwrap();
    let dir = TempDir::new().unwrap();
    let journal = Journal::default();
    let mut pipeline = pipeline(&dir, &journal);
    let contract = ContractDescriptor::new("Counter", "6080").with_constructor_args("abcd");

    let mut session = ContractSession::new(&client, &mut pipeline, &contract, SENDER);
    let deployed = session.deploy().await.unwrap();
    assert_eq!(deployed.as_str(), address);
    assert!(matches!(
        session.deploy().await,
        Err(RunError::AlreadyDeployed { .. })
    ));

    let result = session.query("0x6d4ce63c").await.unwrap();
    assert_eq!(result["return_data"], "0x01");
    assert_eq!(session.receipts().len(), 1);
    // Only the deployment went through sign/broadcast/advance.
    assert_eq!(journal.entries().len(), 3);
}
