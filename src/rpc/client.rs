//! Web3 client: single requests and contract reads

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use super::multicall::BatchOrdering;
use super::transport::{HttpTransport, Transport};
use super::types::{eth_call_params, JsonRpcRequest, JsonRpcResponse};
use crate::abi::{Contract, DecodedOutput, U256};
use crate::config::ClientConfig;
use crate::error::{Web3Error, Web3Result};

/// JSON-RPC client bound to one endpoint.
///
/// Request ids come from a per-client atomic counter starting at 1, so a
/// client can be shared across threads by reference or `Arc`.
pub struct Web3Client<T: Transport = HttpTransport> {
    pub(crate) transport: T,
    request_id: AtomicU64,
    pub(crate) batch_ordering: BatchOrdering,
}

impl Web3Client<HttpTransport> {
    /// Create an HTTP client from a validated configuration
    pub fn new(config: &ClientConfig) -> Web3Result<Self> {
        let transport = HttpTransport::new(config)?;
        crate::log_debug!("rpc", "Client created", endpoint = config.rpc_url, timeout_ms = config.timeout.as_millis());
        Ok(Self::with_transport(transport, config.batch_ordering))
    }
}

impl<T: Transport> Web3Client<T> {
    pub fn with_transport(transport: T, batch_ordering: BatchOrdering) -> Self {
        Self {
            transport,
            request_id: AtomicU64::new(1),
            batch_ordering,
        }
    }

    pub fn batch_ordering(&self) -> BatchOrdering {
        self.batch_ordering
    }

    /// Reserve `count` consecutive ids and return the first
    pub(crate) fn reserve_ids(&self, count: u64) -> u64 {
        self.request_id.fetch_add(count, Ordering::SeqCst)
    }

    /// Send one JSON-RPC request and return its `result`
    pub fn send_rpc_request(&self, method: &str, params: Value) -> Web3Result<Value> {
        let id = self.reserve_ids(1);
        let request = JsonRpcRequest::new(method, params, id);
        crate::log_debug!("rpc", "Sending request", method = method, id = id);

        let reply = self.transport.send(&serde_json::to_value(&request)?)?;
        let response: JsonRpcResponse = serde_json::from_value(reply)
            .map_err(|e| Web3Error::parse(format!("Invalid JSON-RPC response: {}", e)))?;

        if let Some(payload) = response.error {
            let err = Web3Error::rpc(payload);
            crate::log_warn!("rpc", "Node returned an error", method = method, id = id, error = err);
            return Err(err);
        }

        response
            .result
            .ok_or_else(|| Web3Error::parse(format!("Missing result in {} response", method)))
    }

    /// Read-only call of a contract function against the latest block
    pub fn call<S: AsRef<str>>(
        &self,
        contract: &Contract,
        function: &str,
        params: &[S],
    ) -> Web3Result<DecodedOutput> {
        self.call_inner(contract, function, params)
            .map_err(|source| Web3Error::Call {
                function: function.to_string(),
                address: contract.address(),
                source: Box::new(source),
            })
    }

    fn call_inner<S: AsRef<str>>(
        &self,
        contract: &Contract,
        function: &str,
        params: &[S],
    ) -> Web3Result<DecodedOutput> {
        let data = contract.encode_call(function, params)?;
        crate::log_debug!("rpc", "eth_call", function = function, address = contract.address(), data = data);

        let result = self.send_rpc_request("eth_call", eth_call_params(&contract.address(), &data))?;
        let hex = result
            .as_str()
            .ok_or_else(|| Web3Error::parse(format!("eth_call result is not a hex string: {}", result)))?;

        Ok(contract.decode_output(function, hex)?)
    }

    /// Current gas price in wei
    pub fn gas_price(&self) -> Web3Result<U256> {
        let result = self.send_rpc_request("eth_gasPrice", json!([]))?;
        let hex = result
            .as_str()
            .ok_or_else(|| Web3Error::parse(format!("eth_gasPrice result is not a string: {}", result)))?;
        U256::from_hex(hex).map_err(|e| Web3Error::parse(format!("Bad gas price {:?}: {}", hex, e)))
    }

    /// Latest block number
    pub fn block_number(&self) -> Web3Result<u64> {
        let result = self.send_rpc_request("eth_blockNumber", json!([]))?;
        let hex = result
            .as_str()
            .ok_or_else(|| Web3Error::parse(format!("eth_blockNumber result is not a string: {}", result)))?;
        let digits = hex.strip_prefix("0x").unwrap_or(hex);
        u64::from_str_radix(digits, 16)
            .map_err(|e| Web3Error::parse(format!("Bad block number {:?}: {}", hex, e)))
    }
}
