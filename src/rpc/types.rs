//! JSON-RPC 2.0 envelopes

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::abi::Address;

/// Outgoing request
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Value,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Value, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
            id,
        }
    }
}

/// Incoming response. `error` is kept raw so the node's payload survives.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl JsonRpcResponse {
    /// Echoed id as a number; some nodes echo numeric ids as strings
    pub fn id_u64(&self) -> Option<u64> {
        match self.id.as_ref()? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// `eth_call` params for a read against the latest block
pub fn eth_call_params(to: &Address, data: &str) -> Value {
    json!([{ "to": to.to_string(), "data": data }, "latest"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope() {
        let request = JsonRpcRequest::new("eth_gasPrice", json!([]), 7);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "method": "eth_gasPrice", "params": [], "id": 7})
        );
    }

    #[test]
    fn test_eth_call_params() {
        let to = Address::parse("0xAF88d065e77c8cC2239327C5EDb3A432268e5831").unwrap();
        assert_eq!(
            eth_call_params(&to, "0x313ce567"),
            json!([
                {"to": "0xaf88d065e77c8cc2239327c5edb3a432268e5831", "data": "0x313ce567"},
                "latest"
            ])
        );
    }

    #[test]
    fn test_response_ids() {
        let response: JsonRpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 4, "result": "0x1"})).unwrap();
        assert_eq!(response.id_u64(), Some(4));
        assert_eq!(response.result, Some(json!("0x1")));
        assert!(response.error.is_none());

        let response: JsonRpcResponse =
            serde_json::from_value(json!({"id": "9", "error": {"code": -32000}})).unwrap();
        assert_eq!(response.id_u64(), Some(9));

        let response: JsonRpcResponse = serde_json::from_value(json!({"id": null})).unwrap();
        assert_eq!(response.id_u64(), None);
    }
}
