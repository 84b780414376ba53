//! JSON-RPC client for EVM nodes
//!
//! - JSON-RPC 2.0 envelopes
//! - Blocking HTTP transport behind the [`Transport`] trait
//! - Single `eth_call`, gas price and block number queries
//! - Batched calls (multicall) with id-based or positional pairing

pub mod client;
pub mod multicall;
pub mod transport;
pub mod types;

pub use client::*;
pub use multicall::*;
pub use transport::*;
pub use types::*;
