// rpc/src/client.rs
use crate::{RpcError, RpcMethod, RpcRequest, RpcResponse, RpcResult};
use reqwest::{Client, Url};
use std::sync::atomic::{AtomicU64, Ordering};

/// Blocking-per-call JSON-RPC client. Every request is awaited to completion
/// before the caller proceeds; there is no timeout or retry layer.
pub struct RpcClient {
    client: Client,
    url: Url,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: &str) -> RpcResult<Self> {
        let url = Url::parse(url).map_err(|e| RpcError::InvalidUrl(format!("{}: {}", url, e)))?;
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            url,
            next_id: AtomicU64::new(0),
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Send one request and return its `result` member.
    ///
    /// Fails with [`RpcError::Service`] whenever the decoded envelope contains
    /// an `error` member, regardless of the HTTP status.
    pub async fn send(
        &self,
        method: RpcMethod,
        params: Vec<serde_json::Value>,
    ) -> RpcResult<serde_json::Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method.as_str(), params);
        tracing::debug!(id, method = %method, url = %self.url, "sending JSON-RPC request");

        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        let envelope: RpcResponse = serde_json::from_slice(&body).map_err(|e| {
            RpcError::Decode(format!(
                "HTTP {} with undecodable body ({}): {}",
                status,
                e,
                String::from_utf8_lossy(&body)
            ))
        })?;

        match envelope.into_result() {
            Ok(result) => Ok(result),
            Err(err) => {
                tracing::error!(id, method = %method, "{}", err);
                Err(err)
            }
        }
    }
}
