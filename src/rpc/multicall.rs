//! Batched read calls (multicall)
//!
//! N calls are encoded up front and sent as one JSON-RPC batch array. Replies
//! are paired back to their requests by echoed id (default) or by position,
//! decoded, and grouped by function name in submission order. Any failing
//! item fails the whole batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::client::Web3Client;
use super::transport::Transport;
use super::types::{eth_call_params, JsonRpcRequest, JsonRpcResponse};
use crate::abi::{Contract, DecodedOutput};
use crate::error::{Web3Error, Web3Result};

/// How batch replies are matched to requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOrdering {
    /// Match by the echoed request id
    #[default]
    #[serde(rename = "id")]
    ById,
    /// The i-th reply belongs to the i-th request
    Positional,
}

impl FromStr for BatchOrdering {
    type Err = Web3Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" | "byid" | "by_id" => Ok(BatchOrdering::ById),
            "positional" | "position" => Ok(BatchOrdering::Positional),
            other => Err(Web3Error::config(format!(
                "Unknown batch ordering {:?}, expected \"id\" or \"positional\"",
                other
            ))),
        }
    }
}

impl fmt::Display for BatchOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchOrdering::ById => write!(f, "id"),
            BatchOrdering::Positional => write!(f, "positional"),
        }
    }
}

/// One call of a batch
#[derive(Debug, Clone)]
pub struct CallRequest<'a> {
    pub contract: &'a Contract,
    pub function: String,
    pub params: Vec<String>,
}

impl<'a> CallRequest<'a> {
    pub fn new(contract: &'a Contract, function: impl Into<String>) -> Self {
        Self {
            contract,
            function: function.into(),
            params: Vec::new(),
        }
    }

    /// Append one parameter
    pub fn arg(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Replace the parameter list
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }
}

/// Decoded batch outputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MulticallResults {
    /// Function name to its outputs, in submission order
    by_function: BTreeMap<String, Vec<DecodedOutput>>,
    /// Every output in submission order
    #[serde(skip)]
    ordered: Vec<DecodedOutput>,
}

impl MulticallResults {
    fn push(&mut self, function: &str, output: DecodedOutput) {
        self.by_function
            .entry(function.to_string())
            .or_default()
            .push(output.clone());
        self.ordered.push(output);
    }

    /// Outputs of every call to `function`, in submission order
    pub fn get(&self, function: &str) -> Option<&[DecodedOutput]> {
        self.by_function.get(function).map(Vec::as_slice)
    }

    /// Output of the `index`-th submitted call
    pub fn output(&self, index: usize) -> Option<&DecodedOutput> {
        self.ordered.get(index)
    }

    /// All outputs in submission order
    pub fn outputs(&self) -> &[DecodedOutput] {
        &self.ordered
    }

    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.by_function.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_grouped(self) -> BTreeMap<String, Vec<DecodedOutput>> {
        self.by_function
    }
}

impl<T: Transport> Web3Client<T> {
    /// Run several read calls in one round trip
    pub fn multicall(&self, calls: &[CallRequest<'_>]) -> Web3Result<MulticallResults> {
        if calls.is_empty() {
            return Ok(MulticallResults::default());
        }

        let encoded = calls
            .iter()
            .enumerate()
            .map(|(index, call)| {
                call.contract
                    .encode_call(&call.function, &call.params)
                    .map_err(|e| batch_error(index, call, e.into()))
            })
            .collect::<Web3Result<Vec<_>>>()?;

        let start_id = self.reserve_ids(calls.len() as u64);
        let batch: Vec<JsonRpcRequest> = calls
            .iter()
            .zip(&encoded)
            .enumerate()
            .map(|(i, (call, data))| {
                JsonRpcRequest::new(
                    "eth_call",
                    eth_call_params(&call.contract.address(), data),
                    start_id + i as u64,
                )
            })
            .collect();

        crate::log_debug!(
            "rpc",
            "Sending batch",
            size = calls.len(),
            first_id = start_id,
            ordering = self.batch_ordering
        );

        let reply = self.transport.send(&serde_json::to_value(&batch)?)?;
        let responses = parse_batch_reply(reply, calls.len())?;

        let paired = match self.batch_ordering {
            BatchOrdering::ById => pair_by_id(responses, start_id)?,
            BatchOrdering::Positional => responses,
        };

        let mut results = MulticallResults::default();
        for (index, (call, response)) in calls.iter().zip(paired).enumerate() {
            if let Some(payload) = response.error {
                let err = batch_error(index, call, Web3Error::rpc(payload));
                crate::log_warn!("rpc", "Batch item failed", index = index, error = err);
                return Err(err);
            }

            let hex = response
                .result
                .as_ref()
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    batch_error(index, call, Web3Error::parse("eth_call result is not a hex string"))
                })?;

            let output = call
                .contract
                .decode_output(&call.function, hex)
                .map_err(|e| batch_error(index, call, e.into()))?;
            results.push(&call.function, output);
        }

        Ok(results)
    }
}

fn batch_error(index: usize, call: &CallRequest<'_>, source: Web3Error) -> Web3Error {
    Web3Error::Batch {
        index,
        function: call.function.clone(),
        address: call.contract.address(),
        source: Box::new(source),
    }
}

/// The reply must be an array with one response per request
fn parse_batch_reply(reply: Value, expected: usize) -> Web3Result<Vec<JsonRpcResponse>> {
    let items = match reply {
        Value::Array(items) => items,
        Value::Object(ref obj) if obj.contains_key("error") => {
            // Whole batch rejected by the node
            let payload = obj.get("error").cloned().unwrap_or(Value::Null);
            return Err(Web3Error::rpc(payload));
        }
        other => {
            return Err(Web3Error::parse(format!(
                "Batch reply is not an array: {}",
                other
            )))
        }
    };

    if items.len() != expected {
        return Err(Web3Error::parse(format!(
            "Batch reply has {} items, expected {}",
            items.len(),
            expected
        )));
    }

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| Web3Error::parse(format!("Invalid batch item: {}", e)))
        })
        .collect()
}

/// Reorder replies so the i-th entry answers request id `start_id + i`.
///
/// Nodes answer with `"id": null` when they cannot attribute an error to a
/// request. A single such item fills the one slot left unanswered; with more
/// than one the failing index cannot be known and the node's error is
/// returned as is.
fn pair_by_id(responses: Vec<JsonRpcResponse>, start_id: u64) -> Web3Result<Vec<JsonRpcResponse>> {
    let count = responses.len();
    let mut slots: Vec<Option<JsonRpcResponse>> = (0..count).map(|_| None).collect();
    let mut unclaimed = Vec::new();

    for response in responses {
        let id = match response.id_u64() {
            Some(id) => id,
            None if response.error.is_some() => {
                unclaimed.push(response);
                continue;
            }
            None => return Err(Web3Error::parse("Batch reply item without a numeric id")),
        };

        let index = id
            .checked_sub(start_id)
            .map(|offset| offset as usize)
            .filter(|offset| *offset < count)
            .ok_or_else(|| Web3Error::parse(format!("Unexpected id {} in batch reply", id)))?;

        if slots[index].replace(response).is_some() {
            return Err(Web3Error::parse(format!("Duplicate id {} in batch reply", id)));
        }
    }

    if unclaimed.len() == 1 {
        if let Some(slot) = slots.iter_mut().find(|slot| slot.is_none()) {
            *slot = unclaimed.pop();
        }
    } else if let Some(response) = unclaimed.into_iter().next() {
        let payload = response.error.unwrap_or(Value::Null);
        let mut err = Web3Error::rpc(payload);
        if let Web3Error::Rpc { message, .. } = &mut err {
            message.push_str(" (batch item index could not be determined)");
        }
        crate::log_warn!("rpc", "Unattributed batch item errors", error = err);
        return Err(err);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.ok_or_else(|| {
                Web3Error::parse(format!("No reply for id {} in batch", start_id + i as u64))
            })
        })
        .collect()
}
