use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};
use alloy_dyn_abi::{DynSolValue, JsonAbiExt, Specifier};
use alloy_json_abi::Function;

use crate::{error::Error, interfaces::contract::UniswapInterfaceMulticall};

/// A single call in a batch: the contract to call and the ABI-encoded call data, selector
/// included. Arguments are checked against the method's declared inputs on construction, so a
/// `CallTarget` always carries well-formed call data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTarget {
    target: Address,
    call_data: Bytes,
}

impl CallTarget {
    /// Encode a call of `function` with `args` against `target`.
    ///
    /// Fails with [`Error::InvalidArguments`] if the number or types of `args` do not match the
    /// function's inputs.
    pub fn new(target: Address, function: &Function, args: &[DynSolValue]) -> Result<Self, Error> {
        validate_args(function, args)?;

        let call_data =
            function.abi_encode_input(args).map_err(|e| Error::EncodingError(e.to_string()))?;

        Ok(Self { target, call_data: call_data.into() })
    }

    /// The contract this call is sent to.
    pub fn target(&self) -> Address {
        self.target
    }

    /// The ABI-encoded call data.
    pub fn call_data(&self) -> &Bytes {
        &self.call_data
    }
}

fn validate_args(function: &Function, args: &[DynSolValue]) -> Result<(), Error> {
    let invalid = |reason: String| Error::InvalidArguments { method: function.name.clone(), reason };

    if args.len() != function.inputs.len() {
        return Err(invalid(format!(
            "expected {} argument(s), found {}",
            function.inputs.len(),
            args.len()
        )));
    }

    for (i, (param, arg)) in function.inputs.iter().zip(args).enumerate() {
        let ty = param.resolve().map_err(|e| invalid(format!("argument {i}: {e}")))?;
        if !ty.matches(arg) {
            let found = arg
                .as_type()
                .map(|found| found.to_string())
                .unwrap_or_else(|| "unknown type".to_string());
            return Err(invalid(format!("argument {i} expected {ty}, found {found}")));
        }
    }

    Ok(())
}

/// An ordered, non-empty batch of [`CallTarget`]s, submitted as one network operation. The
/// aggregator's results correspond positionally to `targets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedRequest {
    targets: Vec<CallTarget>,
}

impl AggregatedRequest {
    /// Build a request from `targets`, failing with [`Error::EmptyBatch`] if there are none.
    pub fn new(targets: Vec<CallTarget>) -> Result<Self, Error> {
        if targets.is_empty() {
            return Err(Error::EmptyBatch);
        }

        Ok(Self { targets })
    }

    /// The calls in submission order.
    pub fn targets(&self) -> &[CallTarget] {
        &self.targets
    }

    /// The number of calls in the batch. Never zero.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// ABI-encode the batch as a call to the aggregator's `multicall` entry point, giving every
    /// sub-call `gas_limit` gas.
    pub fn encode(&self, gas_limit: u64) -> Bytes {
        let gas_limit = U256::from(gas_limit);
        let calls = self
            .targets
            .iter()
            .map(|call| UniswapInterfaceMulticall::Call {
                target: call.target,
                gasLimit: gas_limit,
                callData: call.call_data.clone(),
            })
            .collect();

        UniswapInterfaceMulticall::multicallCall { calls }.abi_encode().into()
    }
}
