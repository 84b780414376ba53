//! ABI type definitions for Solidity/EVM contracts

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Size of one ABI word in bytes
pub const WORD_SIZE: usize = 32;

/// Solidity types handled by the codec.
///
/// Only scalars and single-level dynamic `string`/`bytes` are representable.
/// Arrays and tuples are rejected at parse time with [`AbiError::UnsupportedType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// `uintN`, bit width 8..=256 in steps of 8
    Uint(usize),
    /// `intN`, bit width 8..=256 in steps of 8
    Int(usize),
    /// Address (20 bytes)
    Address,
    /// Boolean
    Bool,
    /// `bytesN`, 1..=32 bytes
    FixedBytes(usize),
    /// Dynamic bytes
    Bytes,
    /// Dynamic UTF-8 string
    String,
}

impl AbiType {
    /// Parse a type from its ABI text, e.g. `uint256` or `bytes32`
    pub fn parse(s: &str) -> Result<Self, AbiError> {
        let s = s.trim();

        // Arrays (`T[]`, `T[N]`) and tuples are outside the supported set
        if s.contains('[') || s.starts_with('(') || s == "tuple" {
            return Err(AbiError::UnsupportedType(s.to_string()));
        }

        match s {
            "address" => Ok(AbiType::Address),
            "bool" => Ok(AbiType::Bool),
            "string" => Ok(AbiType::String),
            "bytes" => Ok(AbiType::Bytes),
            "uint" => Ok(AbiType::Uint(256)),
            "int" => Ok(AbiType::Int(256)),

            s if s.starts_with("bytes") => {
                let size: usize = s[5..]
                    .parse()
                    .map_err(|_| AbiError::UnsupportedType(s.to_string()))?;
                if size == 0 || size > 32 {
                    return Err(AbiError::UnsupportedType(s.to_string()));
                }
                Ok(AbiType::FixedBytes(size))
            }

            s if s.starts_with("uint") => Ok(AbiType::Uint(Self::parse_bits(&s[4..], s)?)),
            s if s.starts_with("int") => Ok(AbiType::Int(Self::parse_bits(&s[3..], s)?)),

            _ => Err(AbiError::UnsupportedType(s.to_string())),
        }
    }

    fn parse_bits(size_str: &str, full: &str) -> Result<usize, AbiError> {
        let bits: usize = size_str
            .parse()
            .map_err(|_| AbiError::UnsupportedType(full.to_string()))?;
        if bits == 0 || bits > 256 || bits % 8 != 0 {
            return Err(AbiError::UnsupportedType(full.to_string()));
        }
        Ok(bits)
    }

    /// Check if the type is dynamic (requires offset encoding)
    pub fn is_dynamic(&self) -> bool {
        matches!(self, AbiType::Bytes | AbiType::String)
    }

    /// Get the canonical type string for signature calculation
    pub fn canonical_type(&self) -> String {
        match self {
            AbiType::Uint(bits) => format!("uint{}", bits),
            AbiType::Int(bits) => format!("int{}", bits),
            AbiType::Address => "address".to_string(),
            AbiType::Bool => "bool".to_string(),
            AbiType::FixedBytes(size) => format!("bytes{}", size),
            AbiType::Bytes => "bytes".to_string(),
            AbiType::String => "string".to_string(),
        }
    }
}

impl FromStr for AbiType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AbiType::parse(s)
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_type())
    }
}

/// 20-byte account or contract address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    /// Parse a `0x`-prefixed (or bare) 40 hex digit address
    pub fn parse(s: &str) -> Result<Self, AbiError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 40 {
            return Err(AbiError::InvalidAddress(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AbiError::InvalidAddress(s.to_string()));
        }

        let bytes = hex::decode(digits).map_err(|_| AbiError::InvalidAddress(s.to_string()))?;
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&bytes);
        Ok(Address(addr))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// 256-bit unsigned integer, little-endian limbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U256(pub [u64; 4]);

impl U256 {
    pub const ZERO: U256 = U256([0, 0, 0, 0]);
    pub const ONE: U256 = U256([1, 0, 0, 0]);
    pub const MAX: U256 = U256([u64::MAX, u64::MAX, u64::MAX, u64::MAX]);

    /// Create from u128
    pub fn from_u128(value: u128) -> Self {
        U256([value as u64, (value >> 64) as u64, 0, 0])
    }

    /// Create from bytes (big-endian). Inputs longer than 32 bytes keep the low 32.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let bytes = if bytes.len() > WORD_SIZE {
            &bytes[bytes.len() - WORD_SIZE..]
        } else {
            bytes
        };

        let mut result = [0u64; 4];
        for (i, byte) in bytes.iter().rev().enumerate() {
            result[i / 8] |= (*byte as u64) << ((i % 8) * 8);
        }
        U256(result)
    }

    /// Convert to bytes (big-endian, 32 bytes)
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            let offset = (3 - i) * 8;
            bytes[offset..offset + 8].copy_from_slice(&self.0[i].to_be_bytes());
        }
        bytes
    }

    /// Parse from hex string, with or without `0x`, odd length allowed
    pub fn from_hex(s: &str) -> Result<Self, AbiError> {
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if digits.is_empty() {
            return Err(AbiError::InvalidHex(s.to_string()));
        }

        let significant = digits.trim_start_matches('0');
        if significant.len() > 64 {
            return Err(AbiError::InvalidValue {
                kind: "uint256".to_string(),
                value: s.to_string(),
            });
        }

        let padded = format!("{:0>64}", significant);
        let bytes = hex::decode(&padded).map_err(|_| AbiError::InvalidHex(s.to_string()))?;
        Ok(Self::from_be_bytes(&bytes))
    }

    /// Parse from decimal string
    pub fn from_dec(s: &str) -> Result<Self, AbiError> {
        let invalid = || AbiError::InvalidValue {
            kind: "uint256".to_string(),
            value: s.to_string(),
        };

        if s.is_empty() {
            return Err(invalid());
        }

        let mut result = U256::ZERO;
        for c in s.bytes() {
            if !c.is_ascii_digit() {
                return Err(invalid());
            }
            result = result.checked_mul_u64(10).ok_or_else(invalid)?;
            result = result
                .checked_add(U256::from((c - b'0') as u64))
                .ok_or_else(invalid)?;
        }
        Ok(result)
    }

    /// Addition returning the wrapped result and an overflow flag
    pub fn overflowing_add(&self, other: U256) -> (U256, bool) {
        let mut result = [0u64; 4];
        let mut carry = false;

        for i in 0..4 {
            let (sum1, c1) = self.0[i].overflowing_add(other.0[i]);
            let (sum2, c2) = sum1.overflowing_add(carry as u64);
            result[i] = sum2;
            carry = c1 || c2;
        }

        (U256(result), carry)
    }

    /// Checked addition
    pub fn checked_add(&self, other: U256) -> Option<U256> {
        match self.overflowing_add(other) {
            (value, false) => Some(value),
            (_, true) => None,
        }
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: U256) -> Option<U256> {
        let mut result = [0u64; 4];
        let mut borrow = false;

        for i in 0..4 {
            let (diff1, b1) = self.0[i].overflowing_sub(other.0[i]);
            let (diff2, b2) = diff1.overflowing_sub(borrow as u64);
            result[i] = diff2;
            borrow = b1 || b2;
        }

        if borrow {
            None
        } else {
            Some(U256(result))
        }
    }

    /// Checked multiplication by u64
    pub fn checked_mul_u64(&self, other: u64) -> Option<U256> {
        let mut result = [0u64; 4];
        let mut carry = 0u128;

        for i in 0..4 {
            let prod = (self.0[i] as u128) * (other as u128) + carry;
            result[i] = prod as u64;
            carry = prod >> 64;
        }

        if carry != 0 {
            None
        } else {
            Some(U256(result))
        }
    }

    /// Divide by a u64, returning quotient and remainder. `None` for a zero divisor.
    pub fn checked_div_rem_u64(&self, divisor: u64) -> Option<(U256, u64)> {
        if divisor == 0 {
            return None;
        }
        Some(self.div_rem_u64(divisor))
    }

    /// Caller guarantees a non-zero divisor
    fn div_rem_u64(&self, divisor: u64) -> (U256, u64) {
        let mut quotient = [0u64; 4];
        let mut rem = 0u128;

        for i in (0..4).rev() {
            let current = (rem << 64) | self.0[i] as u128;
            quotient[i] = (current / divisor as u128) as u64;
            rem = current % divisor as u128;
        }

        (U256(quotient), rem as u64)
    }

    /// Two's complement negation modulo 2^256
    pub fn wrapping_neg(&self) -> U256 {
        let inverted = U256([!self.0[0], !self.0[1], !self.0[2], !self.0[3]]);
        inverted.overflowing_add(U256::ONE).0
    }

    /// Number of significant bits
    pub fn bits(&self) -> usize {
        for i in (0..4).rev() {
            if self.0[i] != 0 {
                return i * 64 + 64 - self.0[i].leading_zeros() as usize;
            }
        }
        0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0, 0, 0, 0]
    }

    /// Get as u64 (truncates)
    pub fn as_u64(&self) -> u64 {
        self.0[0]
    }

    /// Get as u128 (truncates)
    pub fn as_u128(&self) -> u128 {
        (self.0[1] as u128) << 64 | (self.0[0] as u128)
    }

    /// To hex string (64 digits, no prefix)
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// To decimal string
    pub fn to_dec_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        // Largest power of ten that fits in a u64
        const CHUNK: u64 = 10_000_000_000_000_000_000;

        let mut chunks = Vec::new();
        let mut value = *self;
        while !value.is_zero() {
            let (quotient, rem) = value.div_rem_u64(CHUNK);
            chunks.push(rem);
            value = quotient;
        }

        let mut out = String::new();
        for (i, chunk) in chunks.iter().rev().enumerate() {
            if i == 0 {
                out.push_str(&chunk.to_string());
            } else {
                out.push_str(&format!("{:019}", chunk));
            }
        }
        out
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        U256([value, 0, 0, 0])
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dec_string())
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// ABI parameter as declared in the contract ABI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    /// Parameter name (can be empty)
    #[serde(default)]
    pub name: String,
    /// Parameter type, kept as its ABI text
    #[serde(rename = "type")]
    pub param_type: String,
}

impl AbiParam {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
        }
    }

    /// Parse the declared type
    pub fn abi_type(&self) -> Result<AbiType, AbiError> {
        AbiType::parse(&self.param_type)
    }
}

/// Callable function of a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Function name
    pub name: String,
    /// Input parameters, in declaration order
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    /// Output parameters, in declaration order
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
}

impl FunctionSpec {
    /// Canonical signature for selector calculation, e.g. `transfer(address,uint256)`.
    ///
    /// Built from the recorded input order with every type in canonical form,
    /// so `uint` is written `uint256`.
    pub fn signature(&self) -> AbiResult<String> {
        let types = self.canonical_input_types()?;
        Ok(super::selector::AbiSelector::signature(
            &self.name,
            types.iter().map(String::as_str),
        ))
    }

    /// 4-byte selector of the canonical signature as 8 lowercase hex digits
    pub fn selector(&self) -> AbiResult<String> {
        let types = self.canonical_input_types()?;
        Ok(super::selector::AbiSelector::selector(
            &self.name,
            types.iter().map(String::as_str),
        ))
    }

    fn canonical_input_types(&self) -> AbiResult<Vec<String>> {
        self.inputs
            .iter()
            .map(|p| p.abi_type().map(|t| t.canonical_type()))
            .collect()
    }
}

/// Decoded return values: output name to rendered value, in output order.
///
/// Unnamed outputs use the empty string as their name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedOutput {
    entries: Vec<(String, String)>,
}

impl DecodedOutput {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Value of the first output with this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of the first output regardless of its name
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DecodedOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// ABI errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    #[error("Function not found in ABI: {0}")]
    FunctionNotFound(String),

    #[error("Parameter count mismatch for {function}: expected {expected}, got {got}")]
    ParameterCountMismatch {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid length: {0}")]
    InvalidLength(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Bytes value too long for {kind}: {len} bytes")]
    BytesTooLong { kind: String, len: usize },

    #[error("Invalid value for {kind}: {value}")]
    InvalidValue { kind: String, value: String },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid ABI: {0}")]
    InvalidAbi(String),
}

pub type AbiResult<T> = Result<T, AbiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abi_type_from_str() {
        assert_eq!(AbiType::parse("uint256").unwrap(), AbiType::Uint(256));
        assert_eq!(AbiType::parse("uint").unwrap(), AbiType::Uint(256));
        assert_eq!(AbiType::parse("uint24").unwrap(), AbiType::Uint(24));
        assert_eq!(AbiType::parse("int256").unwrap(), AbiType::Int(256));
        assert_eq!(AbiType::parse("int24").unwrap(), AbiType::Int(24));
        assert_eq!(AbiType::parse("address").unwrap(), AbiType::Address);
        assert_eq!(AbiType::parse("bool").unwrap(), AbiType::Bool);
        assert_eq!(AbiType::parse("bytes32").unwrap(), AbiType::FixedBytes(32));
        assert_eq!(AbiType::parse("bytes").unwrap(), AbiType::Bytes);
        assert_eq!(AbiType::parse("string").unwrap(), AbiType::String);
    }

    #[test]
    fn test_arrays_and_tuples_rejected() {
        for ty in ["uint256[]", "address[2]", "string[]", "tuple", "(uint256,bool)", "tuple[]"] {
            assert_eq!(
                AbiType::parse(ty),
                Err(AbiError::UnsupportedType(ty.to_string())),
                "{} should be unsupported",
                ty
            );
        }
    }

    #[test]
    fn test_bad_widths_rejected() {
        for ty in ["uint7", "uint264", "int0", "bytes0", "bytes33", "uintx", "fixed128x18"] {
            assert!(matches!(AbiType::parse(ty), Err(AbiError::UnsupportedType(_))), "{}", ty);
        }
    }

    #[test]
    fn test_abi_type_is_dynamic() {
        assert!(!AbiType::Uint(256).is_dynamic());
        assert!(!AbiType::Address.is_dynamic());
        assert!(!AbiType::Bool.is_dynamic());
        assert!(!AbiType::FixedBytes(32).is_dynamic());
        assert!(AbiType::Bytes.is_dynamic());
        assert!(AbiType::String.is_dynamic());
    }

    #[test]
    fn test_canonical_type() {
        assert_eq!(AbiType::Uint(256).canonical_type(), "uint256");
        assert_eq!(AbiType::parse("uint").unwrap().to_string(), "uint256");
        assert_eq!(AbiType::FixedBytes(4).to_string(), "bytes4");
    }

    #[test]
    fn test_u256_from_dec() {
        let value = U256::from_dec("12345").unwrap();
        assert_eq!(value.as_u64(), 12345);
        assert!(U256::from_dec("").is_err());
        assert!(U256::from_dec("12a").is_err());
        assert!(U256::from_dec("-1").is_err());
    }

    #[test]
    fn test_u256_from_hex() {
        assert_eq!(U256::from_hex("ff").unwrap().as_u64(), 255);
        assert_eq!(U256::from_hex("0x1").unwrap().as_u64(), 1);
        assert_eq!(U256::from_hex("0x3b9aca00").unwrap().as_u64(), 1_000_000_000);
        assert!(U256::from_hex("0x").is_err());
        assert!(U256::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_u256_to_be_bytes() {
        let value = U256::from(256);
        let bytes = value.to_be_bytes();
        assert_eq!(bytes[30], 1);
        assert_eq!(bytes[31], 0);
        assert_eq!(U256::from_be_bytes(&bytes), value);
    }

    #[test]
    fn test_u256_decimal_max() {
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(U256::MAX.to_dec_string(), max);
        assert_eq!(U256::from_dec(max).unwrap(), U256::MAX);
        assert!(U256::from_dec(
            "115792089237316195423570985008687907853269984665640564039457584007913129639936"
        )
        .is_err());
    }

    #[test]
    fn test_u256_decimal_chunk_padding() {
        // 10^19 exactly crosses the chunk boundary
        let value = U256::from_dec("10000000000000000000").unwrap();
        assert_eq!(value.to_dec_string(), "10000000000000000000");
        let value = U256::from_dec("340282366920938463463374607431768211456").unwrap();
        assert_eq!(value.bits(), 129);
        assert_eq!(value.to_string(), "340282366920938463463374607431768211456");
    }

    #[test]
    fn test_u256_checked_div_rem() {
        let value = U256::from_dec("100000000000000000000").unwrap();
        assert_eq!(
            value.checked_div_rem_u64(7),
            Some((U256::from(14285714285714285714), 2))
        );
        assert_eq!(U256::MAX.checked_div_rem_u64(0), None);
    }

    #[test]
    fn test_u256_wrapping_neg() {
        assert_eq!(U256::ONE.wrapping_neg(), U256::MAX);
        assert_eq!(U256::ZERO.wrapping_neg(), U256::ZERO);
        assert_eq!(U256::MAX.wrapping_neg(), U256::ONE);
    }

    #[test]
    fn test_u256_ordering_and_sub() {
        assert!(U256::from_u128(1 << 64) > U256::from(u64::MAX));
        assert_eq!(U256::from(5).checked_sub(U256::from(3)), Some(U256::from(2)));
        assert_eq!(U256::from(3).checked_sub(U256::from(5)), None);
    }

    #[test]
    fn test_address_parse() {
        let addr = Address::parse("0x1234567890123456789012345678901234567890").unwrap();
        assert_eq!(addr.0[0], 0x12);
        assert_eq!(addr.0[19], 0x90);

        let mixed = Address::parse("0xaf88d065e77c8cC2239327C5EDb3A432268e5831").unwrap();
        assert_eq!(mixed.to_string(), "0xaf88d065e77c8cc2239327c5edb3a432268e5831");

        assert!(Address::parse("1234567890123456789012345678901234567890").is_ok());
    }

    #[test]
    fn test_address_validation() {
        for bad in [
            "",
            "0x",
            "0x123",
            "0x12345678901234567890123456789012345678901",
            "0x123456789012345678901234567890123456789g",
            "0x12345678901234567890123456789012345678 0",
        ] {
            assert_eq!(
                Address::parse(bad),
                Err(AbiError::InvalidAddress(bad.to_string())),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_decoded_output_lookup() {
        let mut out = DecodedOutput::default();
        out.push("reserve0", "1");
        out.push("", "2");
        assert_eq!(out.get("reserve0"), Some("1"));
        assert_eq!(out.get(""), Some("2"));
        assert_eq!(out.get("missing"), None);
        assert_eq!(out.first(), Some("1"));
        assert_eq!(out.len(), 2);

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json, serde_json::json!({"reserve0": "1", "": "2"}));
    }

    #[test]
    fn test_function_signature_uses_declared_order() {
        let function = FunctionSpec {
            name: "transfer".to_string(),
            inputs: vec![AbiParam::new("to", "address"), AbiParam::new("amount", "uint256")],
            outputs: vec![AbiParam::new("", "bool")],
        };
        assert_eq!(function.signature().unwrap(), "transfer(address,uint256)");
        assert_eq!(function.selector().unwrap(), "a9059cbb");
    }

    #[test]
    fn test_signature_uses_canonical_types() {
        let function = FunctionSpec {
            name: "transfer".to_string(),
            inputs: vec![AbiParam::new("to", "address"), AbiParam::new("amount", " uint ")],
            outputs: vec![],
        };
        assert_eq!(function.signature().unwrap(), "transfer(address,uint256)");
        assert_eq!(function.selector().unwrap(), "a9059cbb");

        let unsupported = FunctionSpec {
            name: "batch".to_string(),
            inputs: vec![AbiParam::new("", "uint256[]")],
            outputs: vec![],
        };
        assert!(matches!(unsupported.signature(), Err(AbiError::UnsupportedType(_))));
    }
}
