//! web3call Core Library
//!
//! Contract calls against EVM JSON-RPC nodes.
//!
//! # Architecture
//!
//! This crate provides:
//! - **abi**: Selector hashing, call encoding and result decoding
//! - **rpc**: JSON-RPC transport, single calls and batched multicalls
//! - **erc20**: Token metadata sync and a token registry
//! - **config**: Endpoint, timeout and batch pairing settings
//! - **logging**: Structured stderr logging with redaction
//!
//! # Example
//!
//! ```rust,ignore
//! use web3call::{abi::Address, config::ClientConfig, erc20, rpc::Web3Client};
//!
//! let client = Web3Client::new(&ClientConfig::default())?;
//! let usdc = erc20::erc20_contract("0xaf88d065e77c8cc2239327c5edb3a432268e5831".parse()?)?;
//! let decimals = client.call(&usdc, "decimals", &[] as &[&str])?;
//! println!("decimals: {}", decimals.first().unwrap_or_default());
//! ```

pub mod abi;
pub mod config;
pub mod erc20;
pub mod error;
pub mod logging;
pub mod rpc;

// Re-export key types for convenience
pub use abi::{AbiError, Address, Contract, DecodedOutput, U256};
pub use config::ClientConfig;
pub use error::{ErrorCode, Web3Error, Web3Result};
pub use rpc::{BatchOrdering, CallRequest, MulticallResults, Web3Client};
