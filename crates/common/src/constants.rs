use alloy::primitives::{address, Address};
use fancy_regex::Regex;
use lazy_static::lazy_static;

/// Polygon Mainnet chain ID
pub const CHAIN_ID_POLYGON: u64 = 137;

/// Address of the `UniswapInterfaceMulticall` deployment. The contract is deployed with CREATE2 and
/// lives at the same address on Ethereum, Polygon, Optimism and Arbitrum.
pub const DEFAULT_MULTICALL_ADDRESS: Address =
    address!("1F98415757620B543A52E61c46B32eB19261F984");

/// Gas forwarded to each sub-call of a multicall batch.
///
/// The aggregator fails any sub-call that exceeds its provisioned gas, so the allowance is set far
/// above anything a view method needs. It is an upper bound, not an estimate.
pub const DEFAULT_STATIC_CALL_GAS_REQUIRED: u64 = 1_000_000_000_000;

lazy_static! {
    /// The following regex is used to validate Ethereum addresses
    pub static ref ADDRESS_REGEX: Regex = Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("failed to compile regex");

    /// The following regex is used to detect a mixed-case address, which must carry a valid
    /// EIP-55 checksum
    pub static ref MIXED_CASE_REGEX: Regex = Regex::new(r"[a-f].*[A-F]|[A-F].*[a-f]").expect("failed to compile regex");
}
