use std::time::Instant;

use alloy::{eips::BlockId, primitives::Address, sol_types::SolCall};
use alloy_dyn_abi::{DynSolValue, FunctionExt};
use alloy_json_abi::{Function, JsonAbi};
use batchcall_common::{constants::DEFAULT_STATIC_CALL_GAS_REQUIRED, ether::provider::EthCall};
use tracing::{debug, info, trace, warn};

use crate::{
    error::Error,
    interfaces::{
        AggregatedRequest, AggregatedResponse, CallResult, CallTarget, ReturnValue,
        UniswapInterfaceMulticall,
    },
    utils::resolve_function,
};

/// Invokes one method on many contracts through a deployed multicall aggregator.
///
/// Each invocation is a single `eth_call` to the aggregator. Every sub-call is given the same
/// gas allowance, and results come back in the order the targets were given.
#[derive(Debug, Clone)]
pub struct BatchInvoker<T> {
    transport: T,
    aggregator: Address,
    gas_limit: u64,
    block: Option<BlockId>,
}

impl<T: EthCall> BatchInvoker<T> {
    /// Create an invoker sending batches to the aggregator at `aggregator` over `transport`.
    pub fn new(transport: T, aggregator: Address) -> Self {
        Self { transport, aggregator, gas_limit: DEFAULT_STATIC_CALL_GAS_REQUIRED, block: None }
    }

    /// Set the gas allowance forwarded to every sub-call. A zero allowance is rejected when the
    /// batch is submitted.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Pin every batch to `block`. Two invocations pinned to the same block observe the same
    /// state.
    pub fn at_block(mut self, block: BlockId) -> Self {
        self.block = Some(block);
        self
    }

    /// The aggregator batches are sent to.
    pub fn aggregator(&self) -> Address {
        self.aggregator
    }

    /// The gas allowance of every sub-call.
    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Call the argument-less `method` of `interface` on every target.
    pub async fn invoke(
        &self,
        targets: &[Address],
        interface: &JsonAbi,
        method: &str,
    ) -> Result<AggregatedResponse, Error> {
        self.invoke_with_args(targets, interface, method, &[]).await
    }

    /// Call `method` of `interface` with the same `args` on every target.
    pub async fn invoke_with_args(
        &self,
        targets: &[Address],
        interface: &JsonAbi,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<AggregatedResponse, Error> {
        let function = resolve_function(interface, method, args.len())?;

        let calls = targets
            .iter()
            .map(|target| CallTarget::new(*target, function, args))
            .collect::<Result<Vec<_>, _>>()?;
        let request = AggregatedRequest::new(calls)?;

        self.invoke_request(&request, function).await
    }

    /// Submit a prepared request and decode each sub-call's return data against `function`'s
    /// outputs.
    pub async fn invoke_request(
        &self,
        request: &AggregatedRequest,
        function: &Function,
    ) -> Result<AggregatedResponse, Error> {
        if self.gas_limit == 0 {
            return Err(Error::ZeroGasLimit);
        }

        let start_time = Instant::now();
        debug!(
            "submitting {} call(s) of '{}' to aggregator {} with {} gas each",
            request.len(),
            function.signature(),
            self.aggregator,
            self.gas_limit
        );

        let input = request.encode(self.gas_limit);
        trace!("encoded aggregated request: {} bytes", input.len());

        let output = self
            .transport
            .eth_call(self.aggregator, input, self.block)
            .await
            .map_err(|e| Error::RpcError(e.to_string()))?;

        let decoded = UniswapInterfaceMulticall::multicallCall::abi_decode_returns(&output)
            .map_err(|e| Error::DecodeError(e.to_string()))?;

        if decoded.returnData.len() != request.len() {
            return Err(Error::LengthMismatch {
                expected: request.len(),
                found: decoded.returnData.len(),
            });
        }

        let results = request
            .targets()
            .iter()
            .zip(decoded.returnData)
            .map(|(call, result)| decode_result(call.target(), function, result))
            .collect::<Vec<_>>();

        let response = AggregatedResponse { block_number: decoded.blockNumber, results };
        info!(
            "{}/{} calls succeeded at block {}",
            response.succeeded(),
            response.len(),
            response.block_number
        );
        debug!("multicall completed in {:?}", start_time.elapsed());

        Ok(response)
    }

    /// Call a single target directly, bypassing the aggregator.
    pub async fn call_direct(
        &self,
        call: &CallTarget,
        function: &Function,
    ) -> Result<Vec<DynSolValue>, Error> {
        let output = self
            .transport
            .eth_call(call.target(), call.call_data().clone(), self.block)
            .await
            .map_err(|e| Error::RpcError(e.to_string()))?;

        function.abi_decode_output(&output).map_err(|e| Error::DecodeError(e.to_string()))
    }
}

fn decode_result(
    target: Address,
    function: &Function,
    result: UniswapInterfaceMulticall::Result,
) -> CallResult {
    let gas_used = result.gasUsed;

    if !result.success {
        warn!("call to {} reverted", target);
        return CallResult {
            target,
            success: false,
            gas_used,
            return_data: result.returnData,
            value: ReturnValue::Reverted,
        };
    }

    match function.abi_decode_output(&result.returnData) {
        Ok(values) => CallResult {
            target,
            success: true,
            gas_used,
            return_data: result.returnData,
            value: ReturnValue::Decoded(values),
        },
        Err(e) => {
            warn!("call to {} returned malformed data: {}", target, e);
            CallResult {
                target,
                success: false,
                gas_used,
                return_data: result.returnData,
                value: ReturnValue::Malformed(e.to_string()),
            }
        }
    }
}
