use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;
use crate::wallet::{Eip1193, InjectedProvider};

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: Option<i64>,
    message: String,
}

/// Plain HTTP JSON-RPC endpoint for read-only calls.
#[derive(Clone, Debug)]
pub struct HttpRpc {
    url: String,
}

impl HttpRpc {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Eip1193 for HttpRpc {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let req = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let resp = Request::post(&self.url)
            .json(&req)
            .map_err(|e| ProviderError::new(e.to_string()))?
            .send()
            .await
            .map_err(|e| ProviderError::new(e.to_string()))?;

        if !resp.ok() {
            return Err(ProviderError::new(format!("RPC HTTP error: {}", resp.status())));
        }

        let body: RpcResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::new(e.to_string()))?;
        into_result(body)
    }
}

fn into_result(body: RpcResponse) -> Result<Value, ProviderError> {
    if let Some(err) = body.error {
        return Err(ProviderError {
            code: err.code,
            message: err.message,
        });
    }
    Ok(body.result.unwrap_or(Value::Null))
}

/// Whatever can serve read-only calls: the wallet when injected, otherwise the
/// public endpoint.
#[derive(Clone, Debug)]
pub enum ReadProvider {
    Injected(InjectedProvider),
    Http(HttpRpc),
}

impl Eip1193 for ReadProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        match self {
            ReadProvider::Injected(p) => p.request(method, params).await,
            ReadProvider::Http(p) => p.request(method, params).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_becomes_provider_error() {
        let body: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"header not found"}}"#,
        )
        .unwrap();
        assert_eq!(
            into_result(body),
            Err(ProviderError::with_code(-32000, "header not found"))
        );
    }

    #[test]
    fn null_result_is_null() {
        let body: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert_eq!(into_result(body), Ok(Value::Null));
    }

    #[test]
    fn request_serializes_as_json_rpc() {
        let req = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: serde_json::json!([{ "to": "0x01" }, "latest"]),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["method"], "eth_call");
        assert_eq!(v["params"][1], "latest");
    }
}
