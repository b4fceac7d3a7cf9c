use batchcall_config::{parse_gas_limit, parse_url_arg};
use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Call the same method on many contracts in a single multicall round trip",
    override_usage = "batchcall call <TARGETS>... [OPTIONS]"
)]
/// Arguments for the multicall operation
///
/// The same method, with the same arguments, is called on every target. The method is looked up
/// in the ABI file given by `abi`, or in the built-in ERC-20 metadata interface if none is given.
pub struct MulticallArgs {
    /// The contracts to call, in order.
    #[clap(required = true, num_args = 1..)]
    pub targets: Vec<String>,

    /// The method to call on every target, by name or full signature (e.g. `balanceOf(address)`).
    #[clap(long, short, default_value = "decimals")]
    pub method: String,

    /// An argument to pass to the method. Repeat for methods taking several arguments.
    #[clap(long = "arg", short = 'a', value_name = "VALUE")]
    pub args: Vec<String>,

    /// Path to a JSON ABI file declaring the method. Defaults to ERC-20 metadata.
    #[clap(long, default_value = None, hide_default_value = true)]
    pub abi: Option<String>,

    /// The RPC provider to send the batch to.
    /// This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, env = "RPC_URL", value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// The address of the multicall aggregator. Defaults to the UniswapInterfaceMulticall
    /// deployment.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub multicall_address: String,

    /// The gas allowance forwarded to every sub-call. An upper bound, not an estimate.
    #[clap(long, value_parser = parse_gas_limit)]
    pub gas_limit: Option<u64>,

    /// The block to execute the batch against: a number, a block hash, or a tag such as
    /// `latest`. Defaults to the latest block.
    #[clap(long, short)]
    pub block: Option<String>,

    /// The output format, either 'print' or 'json'.
    #[clap(long = "output", short = 'o', default_value = "print", hide_default_value = true)]
    pub output: String,
}

impl MulticallArgsBuilder {
    /// Creates a new MulticallArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            targets: Some(Vec::new()),
            method: Some(String::from("decimals")),
            args: Some(Vec::new()),
            abi: Some(None),
            rpc_url: Some(String::new()),
            multicall_address: Some(String::new()),
            gas_limit: Some(None),
            block: Some(None),
            output: Some(String::from("print")),
        }
    }
}
