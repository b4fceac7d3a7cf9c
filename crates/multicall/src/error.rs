/// Error type for the multicall crate.
///
/// Every variant is a batch-level failure: nothing in the batch is returned. Failures of
/// individual sub-calls are reported in-band via [`crate::CallResult::success`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An aggregated request needs at least one target
    #[error("Encoding error: cannot build an aggregated request from an empty target list")]
    EmptyBatch,
    /// The shared interface does not declare the requested method
    #[error("Method '{0}' not found in interface")]
    UnknownMethod(String),
    /// The method exists, but not with the requested number of arguments
    #[error("Method '{method}' has no overload taking {arity} argument(s)")]
    NoMatchingOverload {
        /// The requested method
        method: String,
        /// The number of arguments supplied
        arity: usize,
    },
    /// The supplied arguments do not match the method's declared inputs
    #[error("Invalid arguments for '{method}': {reason}")]
    InvalidArguments {
        /// The method being encoded
        method: String,
        /// What was wrong with the arguments
        reason: String,
    },
    /// Every sub-call would run out of gas immediately
    #[error("Gas limit must be greater than zero")]
    ZeroGasLimit,
    /// ABI encoding of a call failed
    #[error("Encoding error: {0}")]
    EncodingError(String),
    /// The shared interface could not be loaded or parsed
    #[error("ABI error: {0}")]
    AbiError(String),
    /// The network call could not be completed, or the aggregator reverted
    #[error("RPC error: {0}")]
    RpcError(String),
    /// The aggregator's response could not be decoded
    #[error("Failed to decode aggregator response: {0}")]
    DecodeError(String),
    /// The aggregator answered with a different number of results than calls submitted
    #[error("Aggregator returned {found} results for {expected} calls")]
    LengthMismatch {
        /// The number of calls submitted
        expected: usize,
        /// The number of results received
        found: usize,
    },
    /// A target or aggregator address failed validation
    #[error("Address error: {0}")]
    AddressError(#[from] batchcall_common::Error),
    /// Internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
