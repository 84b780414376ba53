//! ERC-20 token metadata and registry

use serde::Serialize;
use std::collections::HashMap;

use crate::abi::{AbiError, AbiResult, Address, Contract, U256};
use crate::error::{Web3Error, Web3Result};
use crate::rpc::{CallRequest, Transport, Web3Client};

/// ERC-20 Token Standard ABI
pub const ERC20_ABI: &str = r#"[
    {"type":"function","name":"name","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
    {"type":"function","name":"symbol","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
    {"type":"function","name":"decimals","inputs":[],"outputs":[{"name":"","type":"uint8"}],"stateMutability":"view"},
    {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"balanceOf","inputs":[{"name":"account","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"allowance","inputs":[{"name":"owner","type":"address"},{"name":"spender","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"approve","inputs":[{"name":"spender","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"transferFrom","inputs":[{"name":"from","type":"address"},{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"event","name":"Transfer","inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]},
    {"type":"event","name":"Approval","inputs":[{"name":"owner","type":"address","indexed":true},{"name":"spender","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}
]"#;

/// Contract handle for an ERC-20 token at `address`
pub fn erc20_contract(address: Address) -> AbiResult<Contract> {
    Contract::from_json(address, ERC20_ABI)
}

/// `name`, `symbol` and `decimals` of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMetadata {
    /// Fetch all three fields in one batch
    pub fn fetch<T: Transport>(client: &Web3Client<T>, token: &Contract) -> Web3Result<Self> {
        let calls = [
            CallRequest::new(token, "name"),
            CallRequest::new(token, "symbol"),
            CallRequest::new(token, "decimals"),
        ];
        let results = client.multicall(&calls)?;

        let field = |index: usize| -> Web3Result<String> {
            results
                .output(index)
                .and_then(|output| output.first())
                .map(str::to_string)
                .ok_or_else(|| Web3Error::parse(format!("Missing {} in token metadata", calls[index].function)))
        };

        let decimals_text = field(2)?;
        let decimals = decimals_text.parse::<u8>().map_err(|_| {
            Web3Error::from(AbiError::InvalidValue {
                kind: "decimals".to_string(),
                value: decimals_text.clone(),
            })
        })?;

        Ok(Self {
            name: field(0)?,
            symbol: field(1)?,
            decimals,
        })
    }
}

/// Token balance of `owner`
pub fn balance_of<T: Transport>(
    client: &Web3Client<T>,
    token: &Contract,
    owner: &Address,
) -> Web3Result<U256> {
    let output = client.call(token, "balanceOf", &[owner.to_string()])?;
    let text = output
        .first()
        .ok_or_else(|| Web3Error::parse("balanceOf returned no value"))?;
    Ok(U256::from_dec(text)?)
}

/// A known token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Position in the registry, stable for the registry's lifetime
    pub index: usize,
}

/// Tokens keyed by address, synced on first use
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: HashMap<Address, Token>,
    order: Vec<Address>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the token, fetching its metadata if it is not known yet
    pub fn insert_or_sync<T: Transport>(
        &mut self,
        client: &Web3Client<T>,
        address: Address,
    ) -> Web3Result<&Token> {
        if !self.tokens.contains_key(&address) {
            let contract = erc20_contract(address)?;
            let metadata = TokenMetadata::fetch(client, &contract)?;
            crate::log_info!(
                "erc20",
                "Token synced",
                address = address,
                symbol = metadata.symbol,
                decimals = metadata.decimals
            );
            self.insert(address, metadata);
        }

        self.get(&address)
            .ok_or_else(|| Web3Error::parse(format!("Token {} missing after sync", address)))
    }

    /// Register a token with known metadata. Existing entries keep their index.
    pub fn insert(&mut self, address: Address, metadata: TokenMetadata) -> &Token {
        let index = match self.tokens.get(&address) {
            Some(existing) => existing.index,
            None => {
                self.order.push(address);
                self.order.len() - 1
            }
        };

        let token = Token {
            address,
            name: metadata.name,
            symbol: metadata.symbol,
            decimals: metadata.decimals,
            index,
        };
        self.tokens.insert(address, token);
        &self.tokens[&address]
    }

    pub fn get(&self, address: &Address) -> Option<&Token> {
        self.tokens.get(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.tokens.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.order.iter().filter_map(|address| self.tokens.get(address))
    }
}
