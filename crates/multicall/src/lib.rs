//! Batched view calls through an on-chain multicall aggregator.
//!
//! [`BatchInvoker`] encodes one method call per target contract, submits the whole batch as a
//! single `eth_call` to the aggregator, and decodes each sub-call's return data against the same
//! interface used to encode it. Failures of individual targets are reported in-band on their
//! [`CallResult`]; only a failure of the round trip itself fails the batch.

/// Error types for the multicall crate
pub mod error;

mod core;
mod interfaces;
mod utils;

// re-export the public interface
pub use crate::core::{invoker::BatchInvoker, multicall};
pub use error::Error;
pub use interfaces::{
    AggregatedRequest, AggregatedResponse, CallResult, CallTarget, MulticallArgs,
    MulticallArgsBuilder, ReturnValue, UniswapInterfaceMulticall,
};
pub use utils::{
    erc20_interface, format_value, load_abi, parse_block_id, parse_method_args, resolve_function,
};
