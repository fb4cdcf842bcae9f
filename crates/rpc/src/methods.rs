// rpc/src/methods.rs
use crate::{contract_address, ContractAddress, RpcClient, RpcResult};
use serde_json::{json, Value};
use std::fmt;

/// Methods exposed by the execution service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    Create,
    Call,
    StaticCall,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::Create => "create",
            RpcMethod::Call => "call",
            RpcMethod::StaticCall => "static_call",
        }
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a `create` request: the raw transaction intent plus the address
/// it will deploy to.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub result: Value,
    pub address: ContractAddress,
}

impl RpcClient {
    /// Compute a deployment. `binary_with_args` is the `0x`-prefixed bytecode
    /// followed by the hex-encoded constructor arguments.
    pub async fn create(&self, sender: &str, binary_with_args: &str) -> RpcResult<CreateOutcome> {
        tracing::info!(sender, data = binary_with_args, "[create contract]");
        let result = self
            .send(RpcMethod::Create, vec![json!(sender), json!(binary_with_args)])
            .await?;
        let address = contract_address(&result)?;
        tracing::info!(address = %address, "  >> created address");
        Ok(CreateOutcome { result, address })
    }

    /// Compute a state-changing invocation. The returned intent is not on
    /// chain until it has been committed.
    pub async fn call(
        &self,
        sender: &str,
        address: &ContractAddress,
        calldata: &str,
    ) -> RpcResult<Value> {
        tracing::info!(sender, address = %address, args = calldata, "[call contract]");
        let result = self
            .send(
                RpcMethod::Call,
                vec![json!(sender), json!(address.as_str()), json!(calldata)],
            )
            .await?;
        tracing::debug!(result = %result, "  >> call result");
        Ok(result)
    }

    /// Read-only invocation. Its result must never be committed.
    pub async fn static_call(
        &self,
        sender: &str,
        address: &ContractAddress,
        calldata: &str,
    ) -> RpcResult<Value> {
        tracing::info!(sender, address = %address, args = calldata, "[static call contract]");
        let result = self
            .send(
                RpcMethod::StaticCall,
                vec![json!(sender), json!(address.as_str()), json!(calldata)],
            )
            .await?;
        tracing::info!(result = %result, "  >> static call result");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RpcError;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SENDER: &str = "0xc8328aabcd9b9e8e64fbc566c4385c3bdeb219d7";

    #[tokio::test]
    async fn test_create_returns_address() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "create", "params": [SENDER, "0x6080"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 0,
                "jsonrpc": "2.0",
                "result": {"contract_address": "0x1111111111111111111111111111111111111111", "tx": {}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RpcClient::new(&server.uri()).unwrap();
        let outcome = client.create(SENDER, "0x6080").await.unwrap();
        assert_eq!(outcome.address.as_str(), "0x1111111111111111111111111111111111111111");
        assert!(outcome.result.get("tx").is_some());
    }

    #[tokio::test]
    async fn test_create_without_address_fails_fast() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 0, "result": {"tx": {}}})),
            )
            .mount(&server)
            .await;

        let client = RpcClient::new(&server.uri()).unwrap();
        let err = client.create(SENDER, "0x6080").await.unwrap_err();
        assert!(matches!(err, RpcError::ProtocolViolation(_)));
    }

    #[tokio::test]
    async fn test_static_call_uses_static_method() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "static_call"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 0, "result": {"return_data": "0x0ccc"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RpcClient::new(&server.uri()).unwrap();
        let address = ContractAddress::parse("0x2222222222222222222222222222222222222222").unwrap();
        let result = client.static_call(SENDER, &address, "0x6d4ce63c").await.unwrap();
        assert_eq!(crate::return_data(&result).unwrap(), "0x0ccc");
    }

    #[test]
    fn test_method_names() {
        assert_eq!(RpcMethod::Create.to_string(), "create");
        assert_eq!(RpcMethod::Call.to_string(), "call");
        assert_eq!(RpcMethod::StaticCall.to_string(), "static_call");
    }
}
