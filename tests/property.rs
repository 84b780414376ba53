use proptest::prelude::*;
use web3call::abi::{AbiDecoder, AbiEncoder, AbiError, AbiParam, AbiType, FunctionSpec, U256};

fn spec(types: &[&str]) -> FunctionSpec {
    FunctionSpec {
        name: "f".to_string(),
        inputs: types.iter().map(|t| AbiParam::new("", *t)).collect(),
        outputs: types
            .iter()
            .enumerate()
            .map(|(i, t)| AbiParam::new(format!("v{}", i), *t))
            .collect(),
    }
}

/// Encode as inputs, decode the parameter area as outputs of the same types
fn round_trip(types: &[&str], params: &[String]) -> Result<Vec<String>, AbiError> {
    let spec = spec(types);
    let encoded = AbiEncoder::encode_call(&spec, params)?;
    let decoded = AbiDecoder::decode_output(&spec, &format!("0x{}", &encoded[10..]))?;
    Ok(decoded.iter().map(|(_, v)| v.to_string()).collect())
}

fn any_u256() -> impl Strategy<Value = U256> {
    prop::array::uniform4(any::<u64>()).prop_map(U256)
}

proptest! {
    #[test]
    fn uint256_roundtrip(value in any_u256()) {
        let text = value.to_dec_string();
        prop_assert_eq!(round_trip(&["uint256"], &[text.clone()]).unwrap(), vec![text.clone()]);
        prop_assert_eq!(U256::from_dec(&text).unwrap(), value);
    }

    #[test]
    fn int128_roundtrip(value in any::<i128>()) {
        let text = value.to_string();
        prop_assert_eq!(round_trip(&["int256"], &[text.clone()]).unwrap(), vec![text.clone()]);
        prop_assert_eq!(round_trip(&["int128"], &[text.clone()]).unwrap(), vec![text]);
    }

    #[test]
    fn int256_word_roundtrip(word in prop::array::uniform32(any::<u8>())) {
        // Any 32-byte word is a valid int256; its rendering must encode back to it
        let text = AbiDecoder::decode_word(&AbiType::Int(256), &word).unwrap();
        let encoded = AbiEncoder::encode_word(&AbiType::Int(256), &text).unwrap();
        prop_assert_eq!(encoded, word);
    }

    #[test]
    fn uint_width_enforced(value in any::<u64>(), bits in (1usize..=8).prop_map(|n| n * 8)) {
        let fits = bits == 64 || value < (1u64 << bits);
        let result = AbiEncoder::encode_word(&AbiType::Uint(bits), &value.to_string());
        prop_assert_eq!(result.is_ok(), fits);
    }

    #[test]
    fn address_roundtrip(bytes in prop::array::uniform20(any::<u8>())) {
        let text = format!("0x{}", hex::encode(bytes));
        prop_assert_eq!(round_trip(&["address"], &[text.clone()]).unwrap(), vec![text.clone()]);

        // Mixed case input decodes to the lowercase form
        let upper = format!("0x{}", hex::encode_upper(bytes));
        prop_assert_eq!(round_trip(&["address"], &[upper]).unwrap(), vec![text]);
    }

    #[test]
    fn bool_roundtrip(value in any::<bool>()) {
        let text = value.to_string();
        prop_assert_eq!(round_trip(&["bool"], &[text.clone()]).unwrap(), vec![text]);
    }

    #[test]
    fn fixed_bytes_roundtrip(bytes in prop::collection::vec(any::<u8>(), 1..=32)) {
        let ty = format!("bytes{}", bytes.len());
        let text = format!("0x{}", hex::encode(&bytes));
        prop_assert_eq!(round_trip(&[ty.as_str()], &[text.clone()]).unwrap(), vec![text]);
    }

    #[test]
    fn fixed_bytes_too_long_rejected(bytes in prop::collection::vec(any::<u8>(), 2..=32)) {
        let ty = AbiType::FixedBytes(bytes.len() - 1);
        let result = AbiEncoder::encode_word(&ty, &hex::encode(&bytes));
        let is_too_long = matches!(result, Err(AbiError::BytesTooLong { .. }));
        prop_assert!(is_too_long);
    }

    #[test]
    fn string_roundtrip(text in ".{0,200}") {
        prop_assert_eq!(round_trip(&["string"], &[text.clone()]).unwrap(), vec![text]);
    }

    #[test]
    fn dynamic_bytes_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        let text = format!("0x{}", hex::encode(&bytes));
        prop_assert_eq!(round_trip(&["bytes"], &[text.clone()]).unwrap(), vec![text]);
    }

    #[test]
    fn mixed_params_roundtrip(
        amount in any::<u64>(),
        delta in any::<i64>(),
        label in "[a-zA-Z0-9 ]{0,80}",
        flag in any::<bool>(),
    ) {
        let params = vec![
            amount.to_string(),
            label.clone(),
            delta.to_string(),
            "0x".to_string(),
            flag.to_string(),
        ];
        let decoded = round_trip(&["uint64", "string", "int64", "bytes", "bool"], &params).unwrap();
        prop_assert_eq!(decoded, params);
    }

    #[test]
    fn truncated_data_never_panics(cut in 0usize..160) {
        let params = vec!["7".to_string(), "hello world".to_string()];
        let spec = spec(&["uint256", "string"]);
        let encoded = AbiEncoder::encode_call(&spec, &params).unwrap();
        let body = &encoded[10..];
        let cut = cut.min(body.len() / 2);
        // two head words, length word, then 11 payload bytes; the rest is padding
        let needed = 3 * 32 + "hello world".len();

        let result = AbiDecoder::decode_output(&spec, &body[..cut * 2]);
        if cut < needed {
            let is_length_error = matches!(
                result,
                Err(AbiError::InvalidLength(_)) | Err(AbiError::InvalidOffset(_))
            );
            prop_assert!(is_length_error);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
