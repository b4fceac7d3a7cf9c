//! Common utilities, constants, and resources used across the batchcall workspace.
//!
//! This crate provides the RPC provider wrapper and the [`ether::provider::EthCall`]
//! transport seam, address validation, and a handful of general utility functions.

/// Constants used throughout the batchcall codebase.
pub mod constants;

/// Error types for the common crate.
pub mod error;

/// Utilities for interacting with Ethereum, including address validation and
/// RPC functionality.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;

pub use error::Error;
