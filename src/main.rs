//! web3call CLI - contract calls against EVM JSON-RPC nodes

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;

use web3call::abi::{AbiSelector, Address, Contract};
use web3call::{BatchOrdering, CallRequest, ClientConfig, Web3Client};

#[derive(Parser)]
#[command(name = "web3call")]
#[command(version, about = "Encode, decode and batch read-only contract calls")]
#[command(after_help = r#"EXAMPLES:
    # Selector of a signature
    web3call selector "transfer(address,uint256)"

    # Calldata for an ABI function
    web3call encode --abi erc20.json --function balanceOf 0x82af49447d8a07e3bd95bd0d56f35241523fbab1

    # decimals() of three tokens in one round trip
    web3call multicall --abi erc20.json --function decimals \
        --address 0xaf88d065e77c8cc2239327c5edb3a432268e5831 \
        --address 0x82af49447d8a07e3bd95bd0d56f35241523fbab1 \
        --address 0xfd086bc7cd5c481dcc9c85ebe478a1c0b69fcbb9

ENVIRONMENT VARIABLES:
    WEB3CALL_RPC_URL            RPC endpoint (default https://arb1.arbitrum.io/rpc)
    WEB3CALL_TIMEOUT_SECS       Request timeout in seconds (default 10)
    WEB3CALL_BATCH_ORDERING     "id" or "positional"
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    network: NetworkArgs,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct NetworkArgs {
    /// RPC endpoint URL (overrides WEB3CALL_RPC_URL)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Pair batch replies by position instead of by id
    #[arg(long, global = true)]
    positional: bool,
}

#[derive(Args)]
struct FunctionArgs {
    /// Path to ABI JSON file
    #[arg(long)]
    abi: PathBuf,

    /// Function name
    #[arg(long)]
    function: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the 4-byte selector of a function signature
    Selector {
        /// e.g. "transfer(address,uint256)"
        signature: String,
    },

    /// Encode calldata for a function
    Encode {
        #[command(flatten)]
        target: FunctionArgs,

        /// Parameters, in declaration order
        #[arg(allow_hyphen_values = true)]
        params: Vec<String>,
    },

    /// Decode a call result
    Decode {
        #[command(flatten)]
        target: FunctionArgs,

        /// Hex returned by eth_call
        data: String,
    },

    /// Call a function on a contract
    Call {
        /// Contract address
        #[arg(long)]
        address: String,

        #[command(flatten)]
        target: FunctionArgs,

        /// Parameters, in declaration order
        #[arg(allow_hyphen_values = true)]
        params: Vec<String>,
    },

    /// Call the same function on several contracts in one batch
    Multicall {
        /// Contract addresses (repeatable)
        #[arg(long = "address", required = true)]
        addresses: Vec<String>,

        #[command(flatten)]
        target: FunctionArgs,

        /// Parameters, shared by every call
        #[arg(allow_hyphen_values = true)]
        params: Vec<String>,
    },

    /// Current gas price in wei
    GasPrice,

    /// Latest block number
    BlockNumber,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        web3call::logging::enable_debug();
    }

    match cli.command {
        Commands::Selector { signature } => {
            let signature: String = signature.split_whitespace().collect();
            let selector = AbiSelector::selector_bytes(&signature);
            println!("0x{}", hex::encode(selector));
        }

        Commands::Encode { target, params } => {
            let contract = load_contract(Address::ZERO, &target)?;
            println!("{}", contract.encode_call(&target.function, &params)?);
        }

        Commands::Decode { target, data } => {
            let contract = load_contract(Address::ZERO, &target)?;
            let output = contract.decode_output(&target.function, &data)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Call { address, target, params } => {
            let address: Address = address.parse()?;
            let contract = load_contract(address, &target)?;
            let client = build_client(&cli.network)?;
            let output = client.call(&contract, &target.function, &params)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Multicall { addresses, target, params } => {
            let contracts = addresses
                .iter()
                .map(|a| load_contract(a.parse()?, &target))
                .collect::<Result<Vec<_>>>()?;
            let calls: Vec<CallRequest<'_>> = contracts
                .iter()
                .map(|c| CallRequest::new(c, target.function.as_str()).with_params(params.iter().cloned()))
                .collect();

            let client = build_client(&cli.network)?;
            let results = client.multicall(&calls)?;

            let rows: Vec<_> = contracts
                .iter()
                .zip(results.outputs())
                .map(|(contract, output)| json!({ "address": contract.address(), "output": output }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }

        Commands::GasPrice => {
            let client = build_client(&cli.network)?;
            println!("{}", client.gas_price()?);
        }

        Commands::BlockNumber => {
            let client = build_client(&cli.network)?;
            println!("{}", client.block_number()?);
        }
    }

    Ok(())
}

fn load_contract(address: Address, target: &FunctionArgs) -> Result<Contract> {
    Contract::load(address, &target.abi)
        .with_context(|| format!("loading ABI for {}", target.function))
}

fn build_client(args: &NetworkArgs) -> Result<Web3Client> {
    let mut config = ClientConfig::from_env()?;

    if let Some(url) = &args.rpc_url {
        config.rpc_url = url.clone();
    }
    if let Some(secs) = args.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    if args.positional {
        config.batch_ordering = BatchOrdering::Positional;
    }

    Ok(Web3Client::new(&config)?)
}
