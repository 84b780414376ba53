//! ABI encoder for Solidity/EVM contracts
//!
//! Parameters arrive as text and are converted per declared type. Static
//! values occupy one head word each; `string` and `bytes` put an offset word
//! in the head and their length-prefixed, padded payload in the tail.

use super::types::*;

/// ABI encoder
pub struct AbiEncoder;

impl AbiEncoder {
    /// Encode a function call: `0x` + selector + head + tail
    pub fn encode_call<S: AsRef<str>>(function: &FunctionSpec, params: &[S]) -> AbiResult<String> {
        if params.len() != function.inputs.len() {
            return Err(AbiError::ParameterCountMismatch {
                function: function.name.clone(),
                expected: function.inputs.len(),
                got: params.len(),
            });
        }

        let types = function
            .inputs
            .iter()
            .map(AbiParam::abi_type)
            .collect::<AbiResult<Vec<_>>>()?;

        let encoded = Self::encode_params(&types, params)?;
        Ok(format!("0x{}{}", function.selector()?, hex::encode(encoded)))
    }

    /// Encode a parameter list (head words followed by the tail)
    pub fn encode_params<S: AsRef<str>>(types: &[AbiType], values: &[S]) -> AbiResult<Vec<u8>> {
        if values.len() != types.len() {
            return Err(AbiError::ParameterCountMismatch {
                function: String::new(),
                expected: types.len(),
                got: values.len(),
            });
        }

        let head_size = types.len() * WORD_SIZE;

        let mut head = Vec::with_capacity(head_size);
        let mut tail = Vec::new();

        for (value, abi_type) in values.iter().zip(types.iter()) {
            let value = value.as_ref();
            if abi_type.is_dynamic() {
                // Offset from the start of the parameter area
                let offset = head_size + tail.len();
                head.extend_from_slice(&U256::from(offset as u64).to_be_bytes());

                let payload = match abi_type {
                    AbiType::String => value.as_bytes().to_vec(),
                    _ => Self::parse_hex_bytes(value)?,
                };
                tail.extend_from_slice(&Self::encode_dynamic_bytes(&payload));
            } else {
                head.extend_from_slice(&Self::encode_word(abi_type, value)?);
            }
        }

        head.extend_from_slice(&tail);
        Ok(head)
    }

    /// Encode a single static value into one word
    pub fn encode_word(abi_type: &AbiType, value: &str) -> AbiResult<[u8; 32]> {
        match abi_type {
            AbiType::Address => {
                let addr = Address::parse(value)?;
                let mut word = [0u8; 32];
                word[12..].copy_from_slice(addr.as_bytes());
                Ok(word)
            }
            AbiType::Bool => Self::encode_bool(value),
            AbiType::Uint(bits) => Self::encode_uint(*bits, value),
            AbiType::Int(bits) => Self::encode_int(*bits, value),
            AbiType::FixedBytes(size) => Self::encode_fixed_bytes(*size, value),
            AbiType::Bytes | AbiType::String => Err(AbiError::UnsupportedType(format!(
                "{} is dynamic and has no single-word encoding",
                abi_type
            ))),
        }
    }

    fn encode_bool(value: &str) -> AbiResult<[u8; 32]> {
        let mut word = [0u8; 32];
        match value.trim() {
            "true" | "1" | "0x1" => word[31] = 1,
            "false" | "0" | "0x0" => {}
            _ => {
                return Err(AbiError::InvalidValue {
                    kind: "bool".to_string(),
                    value: value.to_string(),
                })
            }
        }
        Ok(word)
    }

    fn encode_uint(bits: usize, value: &str) -> AbiResult<[u8; 32]> {
        let invalid = || AbiError::InvalidValue {
            kind: format!("uint{}", bits),
            value: value.to_string(),
        };

        let trimmed = value.trim();
        let parsed = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
            U256::from_hex(trimmed)
        } else {
            U256::from_dec(trimmed)
        }
        .map_err(|_| invalid())?;

        if parsed.bits() > bits {
            return Err(invalid());
        }
        Ok(parsed.to_be_bytes())
    }

    fn encode_int(bits: usize, value: &str) -> AbiResult<[u8; 32]> {
        let invalid = || AbiError::InvalidValue {
            kind: format!("int{}", bits),
            value: value.to_string(),
        };

        let trimmed = value.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let magnitude = U256::from_dec(digits).map_err(|_| invalid())?;

        if negative && !magnitude.is_zero() {
            // Smallest value is -2^(bits-1), so magnitude - 1 must fit in bits-1
            let below = magnitude.checked_sub(U256::ONE).ok_or_else(invalid)?;
            if below.bits() > bits - 1 {
                return Err(invalid());
            }
            Ok(magnitude.wrapping_neg().to_be_bytes())
        } else {
            if magnitude.bits() > bits - 1 {
                return Err(invalid());
            }
            Ok(magnitude.to_be_bytes())
        }
    }

    fn encode_fixed_bytes(size: usize, value: &str) -> AbiResult<[u8; 32]> {
        let bytes = Self::parse_hex_bytes(value)?;
        if bytes.len() > size {
            return Err(AbiError::BytesTooLong {
                kind: format!("bytes{}", size),
                len: bytes.len(),
            });
        }

        let mut word = [0u8; 32];
        word[..bytes.len()].copy_from_slice(&bytes);
        Ok(word)
    }

    /// Encode dynamic bytes: length word + data right-padded to 32
    fn encode_dynamic_bytes(bytes: &[u8]) -> Vec<u8> {
        let len = bytes.len();

        // Calculate padded length (multiple of 32)
        let padded_len = len.div_ceil(WORD_SIZE) * WORD_SIZE;

        let mut result = Vec::with_capacity(WORD_SIZE + padded_len);
        result.extend_from_slice(&U256::from(len as u64).to_be_bytes());
        result.extend_from_slice(bytes);
        result.resize(WORD_SIZE + padded_len, 0);
        result
    }

    fn parse_hex_bytes(value: &str) -> AbiResult<Vec<u8>> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        hex::decode(digits).map_err(|_| AbiError::InvalidHex(value.to_string()))
    }
}
