//! Function selector calculation

use sha3::{Digest, Keccak256};

/// ABI selector calculator
pub struct AbiSelector;

impl AbiSelector {
    /// Build `name(type1,type2,...)` from a name and its input types
    pub fn signature<'a, I>(name: &str, input_types: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let types: Vec<&str> = input_types.into_iter().collect();
        format!("{}({})", name, types.join(","))
    }

    /// Selector as 8 lowercase hex digits, no prefix
    pub fn selector<'a, I>(name: &str, input_types: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        hex::encode(Self::selector_bytes(&Self::signature(name, input_types)))
    }

    /// Calculate function selector from signature string
    pub fn selector_bytes(signature: &str) -> [u8; 4] {
        let hash = Self::keccak256(signature.as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Calculate keccak256 hash
    pub fn keccak256(data: &[u8]) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        let result = hasher.finalize();
        let mut output = [0u8; 32];
        output.copy_from_slice(&result);
        output
    }
}
