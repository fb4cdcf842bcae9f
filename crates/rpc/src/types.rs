// rpc/src/types.rs
use crate::{RpcError, RpcResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub id: u64,
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<serde_json::Value>,
}

impl RpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<serde_json::Value>) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub id: serde_json::Value,
}

impl RpcResponse {
    /// Split the envelope into its payload. An `error` member always wins,
    /// even when a `result` is present alongside it.
    pub fn into_result(self) -> RpcResult<serde_json::Value> {
        if let Some(error) = self.error {
            return Err(service_error(error));
        }
        self.result.ok_or_else(|| {
            RpcError::ProtocolViolation("response carries neither `result` nor `error`".into())
        })
    }
}

fn service_error(error: serde_json::Value) -> RpcError {
    let code = error.get("code").and_then(|c| c.as_i64());
    let message = match &error {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(obj) => match obj.get("message").and_then(|m| m.as_str()) {
            Some(m) => m.to_string(),
            None => error.to_string(),
        },
        other => other.to_string(),
    };
    RpcError::Service { code, message }
}

/// Address of a deployed contract instance, kept exactly as the service
/// returned it (`0x`-prefixed hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn parse(s: &str) -> RpcResult<Self> {
        let digits = s.strip_prefix("0x").ok_or_else(|| {
            RpcError::ProtocolViolation(format!("contract address `{}` lacks 0x prefix", s))
        })?;
        if digits.is_empty() || hex::decode(digits).is_err() {
            return Err(RpcError::ProtocolViolation(format!(
                "contract address `{}` is not valid hex",
                s
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the `contract_address` member of a `create` result.
pub fn contract_address(result: &serde_json::Value) -> RpcResult<ContractAddress> {
    let raw = result
        .get("contract_address")
        .ok_or_else(|| {
            RpcError::ProtocolViolation("create result is missing `contract_address`".into())
        })?
        .as_str()
        .ok_or_else(|| {
            RpcError::ProtocolViolation("`contract_address` is not a string".into())
        })?;
    ContractAddress::parse(raw)
}

/// Extract the `return_data` member of a `static_call` result.
pub fn return_data(result: &serde_json::Value) -> RpcResult<&str> {
    result
        .get("return_data")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            RpcError::ProtocolViolation("static_call result is missing `return_data`".into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_wins_over_result() {
        let resp: RpcResponse = serde_json::from_value(json!({
            "id": 1,
            "jsonrpc": "2.0",
            "result": {"contract_address": "0x01"},
            "error": {"code": -32000, "message": "out of gas"}
        }))
        .unwrap();

        match resp.into_result() {
            Err(RpcError::Service { code, message }) => {
                assert_eq!(code, Some(-32000));
                assert_eq!(message, "out of gas");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_string_error_kept_verbatim() {
        let resp: RpcResponse =
            serde_json::from_value(json!({"id": 0, "error": "Contract already destructed: 0xab"}))
                .unwrap();
        let err = resp.into_result().unwrap_err();
        assert_eq!(err.service_message(), Some("Contract already destructed: 0xab"));
    }

    #[test]
    fn test_empty_envelope_is_protocol_violation() {
        let resp: RpcResponse = serde_json::from_value(json!({"id": 0, "jsonrpc": "2.0"})).unwrap();
        assert!(matches!(resp.into_result(), Err(RpcError::ProtocolViolation(_))));
    }

    #[test]
    fn test_contract_address_extraction() {
        let result = json!({"contract_address": "0xc8328aabcd9b9e8e64fbc566c4385c3bdeb219d7"});
        let address = contract_address(&result).unwrap();
        assert_eq!(address.as_str(), "0xc8328aabcd9b9e8e64fbc566c4385c3bdeb219d7");

        assert!(matches!(
            contract_address(&json!({"tx": {}})),
            Err(RpcError::ProtocolViolation(_))
        ));
        assert!(matches!(
            contract_address(&json!({"contract_address": 7})),
            Err(RpcError::ProtocolViolation(_))
        ));
    }

    #[test]
    fn test_contract_address_rejects_non_hex() {
        assert!(ContractAddress::parse("c8328aab").is_err());
        assert!(ContractAddress::parse("0x").is_err());
        assert!(ContractAddress::parse("0xzz").is_err());
        assert!(ContractAddress::parse("0xabcd").is_ok());
    }
}
