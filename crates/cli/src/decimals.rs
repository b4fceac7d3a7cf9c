use batchcall_config::{parse_gas_limit, parse_url_arg};
use batchcall_multicall::MulticallArgs;
use clap::Parser;

/// Well-known ERC-20 tokens on Polygon, as `(symbol, address)`.
pub(crate) const POLYGON_TOKENS: [(&str, &str); 5] = [
    ("AAVE", "0xD6DF932A45C0f255f85145f286eA0b292B21C90B"),
    ("DAI", "0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063"),
    ("USDT", "0xc2132d05d31c914a87c6611c10748aeb04b58e8f"),
    ("WBTC", "0x1bfd67037b42cf73acf2047067bd4f2c47d9bfd6"),
    ("WMATIC", "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"),
];

#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Fetch the decimals of well-known Polygon tokens in one round trip",
    override_usage = "batchcall decimals [OPTIONS]"
)]
pub(crate) struct DecimalsArgs {
    /// The RPC provider to use. Should point at Polygon mainnet.
    /// This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, env = "RPC_URL", value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// The address of the multicall aggregator.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub multicall_address: String,

    /// The gas allowance forwarded to every sub-call.
    #[clap(long, value_parser = parse_gas_limit)]
    pub gas_limit: Option<u64>,

    /// The block to query: a number, a block hash, or a tag such as `latest`.
    #[clap(long, short)]
    pub block: Option<String>,

    /// The output format, either 'print' or 'json'.
    #[clap(long = "output", short = 'o', default_value = "print", hide_default_value = true)]
    pub output: String,
}

impl DecimalsArgs {
    /// The token symbols, in the order the tokens are queried.
    pub(crate) fn labels() -> Vec<String> {
        POLYGON_TOKENS.iter().map(|(symbol, _)| symbol.to_string()).collect()
    }

    /// A `decimals()` multicall against every token in [`POLYGON_TOKENS`].
    pub(crate) fn into_multicall_args(self) -> MulticallArgs {
        MulticallArgs {
            targets: POLYGON_TOKENS.iter().map(|(_, address)| address.to_string()).collect(),
            method: "decimals".to_string(),
            args: Vec::new(),
            abi: None,
            rpc_url: self.rpc_url,
            multicall_address: self.multicall_address,
            gas_limit: self.gas_limit,
            block: self.block,
            output: self.output,
        }
    }
}
