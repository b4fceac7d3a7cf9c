/// Address parsing and EIP-55 checksum validation.
pub mod address;

/// The `eth_call` transport and its RPC-backed implementation.
pub mod provider;
