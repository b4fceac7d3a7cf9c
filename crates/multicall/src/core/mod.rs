pub mod invoker;

use batchcall_common::{
    constants::DEFAULT_MULTICALL_ADDRESS,
    ether::{
        address::{checksum, contract_address},
        provider::MultiTransportProvider,
    },
};
use tracing::debug;

use crate::{
    core::invoker::BatchInvoker,
    error::Error,
    interfaces::{AggregatedRequest, AggregatedResponse, CallTarget, MulticallArgs},
    utils::{erc20_interface, load_abi, parse_block_id, parse_method_args, resolve_function},
};

/// Calls one method on every target in `args` through the multicall aggregator.
///
/// Targets and arguments are validated, and the request is built, before any connection to the
/// RPC provider is made. An empty target list fails with [`Error::EmptyBatch`] without touching
/// the network.
///
/// # Arguments
///
/// * `args` - The targets, method and connection options
///
/// # Returns
///
/// The decoded response, one [`crate::CallResult`] per target in the order given
pub async fn multicall(args: MulticallArgs) -> Result<AggregatedResponse, Error> {
    let targets =
        args.targets.iter().map(|target| checksum(target)).collect::<Result<Vec<_>, _>>()?;

    // load the shared interface
    let interface = match &args.abi {
        Some(path) => load_abi(path)?,
        None => erc20_interface()?,
    };
    let function = resolve_function(&interface, &args.method, args.args.len())?;
    let values = parse_method_args(function, &args.args)?;
    debug!("resolved method '{}' with {} argument(s)", function.signature(), values.len());

    let request = AggregatedRequest::new(
        targets
            .into_iter()
            .map(|target| CallTarget::new(target, function, &values))
            .collect::<Result<Vec<_>, _>>()?,
    )?;

    let aggregator = if args.multicall_address.is_empty() {
        DEFAULT_MULTICALL_ADDRESS
    } else {
        contract_address(&args.multicall_address)?
    };
    let block = args.block.as_deref().map(parse_block_id).transpose()?;
    if args.gas_limit == Some(0) {
        return Err(Error::ZeroGasLimit);
    }

    let provider = MultiTransportProvider::connect(&args.rpc_url)
        .await
        .map_err(|e| Error::RpcError(format!("failed to connect to provider: {e}")))?;

    let mut invoker = BatchInvoker::new(provider, aggregator);
    if let Some(gas_limit) = args.gas_limit {
        invoker = invoker.with_gas_limit(gas_limit);
    }
    if let Some(block) = block {
        invoker = invoker.at_block(block);
    }

    invoker.invoke_request(&request, function).await
}
