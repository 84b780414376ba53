//! ABI decoder for Solidity/EVM contracts

use super::types::*;

/// ABI decoder
pub struct AbiDecoder;

impl AbiDecoder {
    /// Decode an `eth_call` result into the function's named outputs
    pub fn decode_output(function: &FunctionSpec, data: &str) -> AbiResult<DecodedOutput> {
        let bytes = Self::decode_hex_data(data)?;
        let types = function
            .outputs
            .iter()
            .map(AbiParam::abi_type)
            .collect::<AbiResult<Vec<_>>>()?;

        let values = Self::decode(&types, &bytes)?;

        let mut output = DecodedOutput::with_capacity(values.len());
        for (param, value) in function.outputs.iter().zip(values) {
            output.push(param.name.clone(), value);
        }
        Ok(output)
    }

    /// Decode a parameter area into rendered values, one per type
    pub fn decode(types: &[AbiType], data: &[u8]) -> AbiResult<Vec<String>> {
        let mut values = Vec::with_capacity(types.len());

        for (i, abi_type) in types.iter().enumerate() {
            let head = i * WORD_SIZE;
            let value = if abi_type.is_dynamic() {
                let offset = Self::read_offset(data, head)?;
                Self::decode_dynamic(data, offset, abi_type)?
            } else {
                Self::decode_word(abi_type, Self::read_word(data, head)?)?
            };
            values.push(value);
        }

        Ok(values)
    }

    /// Render one static word according to its type
    pub fn decode_word(abi_type: &AbiType, word: &[u8; 32]) -> AbiResult<String> {
        match abi_type {
            AbiType::Uint(_) => Ok(Self::render_uint(&U256::from_be_bytes(word))),
            AbiType::Int(_) => {
                let value = U256::from_be_bytes(word);
                // Most significant nibble >= 8 means the word is value - 2^256
                if word[0] >= 0x80 {
                    Ok(format!("-{}", value.wrapping_neg().to_dec_string()))
                } else {
                    Ok(Self::render_uint(&value))
                }
            }
            AbiType::Bool => Ok((word[31] & 0x0f == 1).to_string()),
            AbiType::Address => Ok(format!("0x{}", hex::encode(&word[12..]))),
            AbiType::FixedBytes(size) => Ok(format!("0x{}", hex::encode(&word[..*size]))),
            AbiType::Bytes | AbiType::String => Err(AbiError::UnsupportedType(format!(
                "{} is dynamic and has no single-word encoding",
                abi_type
            ))),
        }
    }

    fn render_uint(value: &U256) -> String {
        if value.bits() <= 64 {
            value.as_u64().to_string()
        } else {
            value.to_dec_string()
        }
    }

    fn decode_dynamic(data: &[u8], offset: usize, abi_type: &AbiType) -> AbiResult<String> {
        let len_word = Self::read_word(data, offset)?;
        let len = U256::from_be_bytes(len_word);
        if len.bits() > 32 {
            return Err(AbiError::InvalidLength(format!(
                "Length word {} at offset {} is too large",
                len, offset
            )));
        }
        let len = len.as_u64() as usize;

        let start = offset + WORD_SIZE;
        let end = start + len;
        if end > data.len() {
            return Err(AbiError::InvalidLength(format!(
                "Insufficient data for {}: need {} bytes at {}, have {}",
                abi_type,
                len,
                start,
                data.len()
            )));
        }

        let payload = &data[start..end];
        match abi_type {
            AbiType::String => String::from_utf8(payload.to_vec()).map_err(|_| AbiError::InvalidValue {
                kind: "string".to_string(),
                value: format!("0x{}", hex::encode(payload)),
            }),
            _ => Ok(format!("0x{}", hex::encode(payload))),
        }
    }

    fn read_offset(data: &[u8], head: usize) -> AbiResult<usize> {
        let offset = U256::from_be_bytes(Self::read_word(data, head)?);
        if offset.bits() > 32 || offset.as_u64() as usize + WORD_SIZE > data.len() {
            return Err(AbiError::InvalidOffset(format!(
                "Offset {} at byte {} points outside {} bytes of data",
                offset,
                head,
                data.len()
            )));
        }
        Ok(offset.as_u64() as usize)
    }

    fn read_word(data: &[u8], offset: usize) -> AbiResult<&[u8; 32]> {
        data.get(offset..offset + WORD_SIZE)
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| {
                AbiError::InvalidLength(format!(
                    "Insufficient data: need 32 bytes at offset {}, have {}",
                    offset,
                    data.len()
                ))
            })
    }

    /// Strip an optional `0x` and decode whole bytes
    pub fn decode_hex_data(data: &str) -> AbiResult<Vec<u8>> {
        let trimmed = data.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        hex::decode(digits).map_err(|_| AbiError::InvalidHex(data.to_string()))
    }
}
