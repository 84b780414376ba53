//! ABI (Application Binary Interface) module for Solidity/EVM contracts
//!
//! This module provides the calling-convention codec:
//! - Scalar types (uint, int, address, bool, bytesN) and dynamic string/bytes
//! - Function call encoding from text parameters
//! - Result decoding into named, rendered values
//! - JSON ABI parsing
//! - Function selector calculation

pub mod contract;
pub mod decoder;
pub mod encoder;
pub mod selector;
pub mod types;


pub use contract::*;
pub use decoder::*;
pub use encoder::*;
pub use selector::*;
pub use types::*;
