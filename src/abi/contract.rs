//! JSON ABI loading and the contract handle

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use super::decoder::AbiDecoder;
use super::encoder::AbiEncoder;
use super::types::*;
use crate::error::{Web3Error, Web3Result};

/// A deployed contract: its address plus the callable functions of its ABI.
///
/// Read-only after construction. Share it by reference (or `Arc`) between
/// calls and batches.
#[derive(Debug, Clone)]
pub struct Contract {
    address: Address,
    functions: HashMap<String, FunctionSpec>,
}

impl Contract {
    /// Parse a JSON ABI document.
    ///
    /// Accepts either a bare ABI array or a build artifact object with an
    /// `abi` field.
    pub fn from_json(address: Address, json: &str) -> AbiResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| AbiError::InvalidAbi(format!("JSON parse error: {}", e)))?;
        Self::from_json_value(address, value)
    }

    /// Parse ABI from JSON Value
    pub fn from_json_value(address: Address, value: Value) -> AbiResult<Self> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut obj) => match obj.remove("abi") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(AbiError::InvalidAbi(
                        "expected an ABI array or an object with an `abi` array".to_string(),
                    ))
                }
            },
            _ => return Err(AbiError::InvalidAbi("expected an ABI array".to_string())),
        };

        Self::from_items(address, items)
    }

    /// Read and parse an ABI file
    pub fn load(address: Address, path: impl AsRef<Path>) -> Web3Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Web3Error::config(format!("Cannot read ABI file {}: {}", path.display(), e))
        })?;

        Self::from_json(address, &json).map_err(|e| {
            Web3Error::config(format!("Malformed ABI file {}: {}", path.display(), e))
        })
    }

    fn from_items(address: Address, items: Vec<Value>) -> AbiResult<Self> {
        let mut functions = HashMap::new();

        for item in items {
            // Entries without a type are functions
            let kind = item.get("type").and_then(Value::as_str).unwrap_or("function");
            if kind != "function" {
                continue;
            }

            let parsed: ParsedFunction = serde_json::from_value(item)
                .map_err(|e| AbiError::InvalidAbi(format!("Bad function entry: {}", e)))?;
            if parsed.name.is_empty() {
                continue;
            }

            let function = FunctionSpec {
                name: parsed.name,
                inputs: parsed.inputs,
                outputs: parsed.outputs,
            };

            if let Some(previous) = functions.insert(function.name.clone(), function) {
                crate::log_warn!(
                    "abi",
                    "Overloaded function, keeping the last declaration",
                    function = previous.name,
                    address = address
                );
            }
        }

        Ok(Self { address, functions })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Find function by name
    pub fn function(&self, name: &str) -> AbiResult<&FunctionSpec> {
        self.functions
            .get(name)
            .ok_or_else(|| AbiError::FunctionNotFound(name.to_string()))
    }

    /// All callable functions, in no particular order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionSpec> {
        self.functions.values()
    }

    /// Encode a call to the named function
    pub fn encode_call<S: AsRef<str>>(&self, name: &str, params: &[S]) -> AbiResult<String> {
        AbiEncoder::encode_call(self.function(name)?, params)
    }

    /// Decode the hex result of a call to the named function
    pub fn decode_output(&self, name: &str, data: &str) -> AbiResult<DecodedOutput> {
        AbiDecoder::decode_output(self.function(name)?, data)
    }
}

#[derive(Debug, Deserialize)]
struct ParsedFunction {
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiParam>,
}
