//! Unified error types for web3call
//!
//! Codec errors come from [`AbiError`]; everything that crosses the network or
//! the configuration boundary is a [`Web3Error`]. Errors raised while serving a
//! call or a batch item are wrapped with the function name and contract
//! address so the failing request can be identified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::abi::{AbiError, Address};

/// Main error type for client operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum Web3Error {
    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{function} on {address} failed: {source}")]
    Call {
        function: String,
        address: Address,
        source: Box<Web3Error>,
    },

    #[error("Batch item {index} ({function} on {address}) failed: {source}")]
    Batch {
        index: usize,
        function: String,
        address: Address,
        source: Box<Web3Error>,
    },
}

impl Web3Error {
    // Convenience constructors
    pub fn config(msg: impl Into<String>) -> Self {
        Web3Error::Config(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Web3Error::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Web3Error::Parse(msg.into())
    }

    /// Build an RPC error from a node's `error` object, keeping its payload
    pub fn rpc(payload: Value) -> Self {
        let code = payload.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = match payload.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => payload.to_string(),
        };
        let data = payload.get("data").cloned();
        Web3Error::Rpc { code, message, data }
    }

    /// Flat category of this error; wrapped errors report their source's code
    pub fn code(&self) -> ErrorCode {
        match self {
            Web3Error::Abi(e) => ErrorCode::from(e),
            Web3Error::Config(_) => ErrorCode::ConfigError,
            Web3Error::Network(_) => ErrorCode::NetworkError,
            Web3Error::Rpc { .. } => ErrorCode::RpcError,
            Web3Error::Parse(_) => ErrorCode::ParseError,
            Web3Error::Call { source, .. } | Web3Error::Batch { source, .. } => source.code(),
        }
    }

    /// Index of the failing item for batch errors
    pub fn batch_index(&self) -> Option<usize> {
        match self {
            Web3Error::Batch { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The innermost error, past any call or batch context
    pub fn root_cause(&self) -> &Web3Error {
        match self {
            Web3Error::Call { source, .. } | Web3Error::Batch { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    ConfigError,

    // Codec errors
    FunctionNotFound,
    ParameterCountMismatch,
    UnsupportedType,
    InvalidAddress,
    InvalidLength,
    InvalidOffset,
    BytesTooLong,
    InvalidValue,

    // Transport errors
    NetworkError,
    RpcError,
    ParseError,
}

impl From<&AbiError> for ErrorCode {
    fn from(e: &AbiError) -> Self {
        match e {
            AbiError::FunctionNotFound(_) => ErrorCode::FunctionNotFound,
            AbiError::ParameterCountMismatch { .. } => ErrorCode::ParameterCountMismatch,
            AbiError::UnsupportedType(_) => ErrorCode::UnsupportedType,
            AbiError::InvalidAddress(_) => ErrorCode::InvalidAddress,
            AbiError::InvalidLength(_) => ErrorCode::InvalidLength,
            AbiError::InvalidOffset(_) => ErrorCode::InvalidOffset,
            AbiError::BytesTooLong { .. } => ErrorCode::BytesTooLong,
            AbiError::InvalidValue { .. } | AbiError::InvalidHex(_) => ErrorCode::InvalidValue,
            AbiError::InvalidAbi(_) => ErrorCode::ConfigError,
        }
    }
}

/// Result type alias for client operations
pub type Web3Result<T> = Result<T, Web3Error>;

// Conversions from common error types

impl From<serde_json::Error> for Web3Error {
    fn from(e: serde_json::Error) -> Self {
        Web3Error::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for Web3Error {
    fn from(e: reqwest::Error) -> Self {
        // Endpoint URLs may embed API keys
        let e = e.without_url();
        if e.is_timeout() {
            Web3Error::network("Request timed out")
        } else if e.is_connect() {
            Web3Error::network(format!("Connection failed: {}", e))
        } else {
            Web3Error::network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ParameterCountMismatch).unwrap();
        assert_eq!(json, "\"parameter_count_mismatch\"");
    }

    #[test]
    fn test_rpc_error_keeps_payload() {
        let err = Web3Error::rpc(json!({
            "code": 3,
            "message": "execution reverted",
            "data": "0x08c379a0"
        }));
        match &err {
            Web3Error::Rpc { code, message, data } => {
                assert_eq!(*code, 3);
                assert_eq!(message, "execution reverted");
                assert_eq!(data, &Some(json!("0x08c379a0")));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(err.code(), ErrorCode::RpcError);
        assert_eq!(err.to_string(), "RPC error 3: execution reverted");
    }

    #[test]
    fn test_rpc_error_without_message() {
        let err = Web3Error::rpc(json!("boom"));
        assert!(matches!(err, Web3Error::Rpc { code: 0, ref message, .. } if message == "\"boom\""));
    }

    #[test]
    fn test_wrapped_code_and_root_cause() {
        let inner = Web3Error::from(AbiError::FunctionNotFound("swap".to_string()));
        let err = Web3Error::Batch {
            index: 1,
            function: "swap".to_string(),
            address: Address::ZERO,
            source: Box::new(inner),
        };

        assert_eq!(err.code(), ErrorCode::FunctionNotFound);
        assert_eq!(err.batch_index(), Some(1));
        assert!(matches!(
            err.root_cause(),
            Web3Error::Abi(AbiError::FunctionNotFound(_))
        ));
        assert!(err.to_string().starts_with("Batch item 1 (swap on 0x0000"));
    }

    #[test]
    fn test_abi_code_mapping() {
        let err: Web3Error = AbiError::InvalidHex("zz".to_string()).into();
        assert_eq!(err.code(), ErrorCode::InvalidValue);
        let err: Web3Error = AbiError::InvalidAbi("bad".to_string()).into();
        assert_eq!(err.code(), ErrorCode::ConfigError);
    }
}
