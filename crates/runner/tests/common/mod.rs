// runner/tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use runner::{Broadcaster, CommitError, Miner, Signer, StageOutcome};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SENDER: &str = "0xc8328aabcd9b9e8e64fbc566c4385c3bdeb219d7";

/// Ordered record of every stage invocation across all fakes.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

pub struct FakeSigner {
    pub journal: Journal,
    pub exit_code: i32,
    pub write_output: bool,
}

#[async_trait]
impl Signer for FakeSigner {
    async fn sign(
        &self,
        _key_path: &Path,
        unsigned_tx: &Path,
        signed_tx: &Path,
    ) -> Result<StageOutcome, CommitError> {
        self.journal.push(format!("sign {}", file_name(unsigned_tx)));
        if self.write_output {
            std::fs::copy(unsigned_tx, signed_tx).unwrap();
        }
        Ok(StageOutcome::exited(self.exit_code))
    }
}

pub struct FakeBroadcaster {
    pub journal: Journal,
    pub exit_code: i32,
}

#[async_trait]
impl Broadcaster for FakeBroadcaster {
    async fn broadcast(&self, signed_tx: &Path) -> Result<StageOutcome, CommitError> {
        self.journal.push(format!("broadcast {}", file_name(signed_tx)));
        Ok(StageOutcome::exited(self.exit_code))
    }
}

pub struct FakeMiner {
    pub journal: Journal,
    pub exit_code: i32,
}

#[async_trait]
impl Miner for FakeMiner {
    async fn advance(&self, block_limit: u32) -> Result<StageOutcome, CommitError> {
        self.journal.push(format!("advance {}", block_limit));
        Ok(StageOutcome::exited(self.exit_code))
    }
}

/// Fakes that all succeed, the signer copying its input to its output.
pub fn healthy_tools(
    journal: &Journal,
) -> (Box<dyn Signer>, Box<dyn Broadcaster>, Box<dyn Miner>) {
    (
        Box::new(FakeSigner {
            journal: journal.clone(),
            exit_code: 0,
            write_output: true,
        }),
        Box::new(FakeBroadcaster {
            journal: journal.clone(),
            exit_code: 0,
        }),
        Box::new(FakeMiner {
            journal: journal.clone(),
            exit_code: 0,
        }),
    )
}

/// Answer one JSON-RPC request (matched on method and exact params) with `result`.
pub async fn mock_result(server: &MockServer, rpc_method: &str, params: Value, result: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": rpc_method, "params": params})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 0, "jsonrpc": "2.0", "result": result
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Answer one JSON-RPC request with a service error.
pub async fn mock_error(server: &MockServer, rpc_method: &str, params: Value, message: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": rpc_method, "params": params})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 0, "jsonrpc": "2.0", "error": {"code": -32000, "message": message}
        })))
        .expect(1)
        .mount(server)
        .await;
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
