mod args;
mod contract;
mod request;
mod result;

// re-export
pub use args::{MulticallArgs, MulticallArgsBuilder};
pub use contract::UniswapInterfaceMulticall;
pub use request::{AggregatedRequest, CallTarget};
pub use result::{AggregatedResponse, CallResult, ReturnValue};
