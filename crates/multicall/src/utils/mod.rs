mod abi;
mod format;

// re-export
pub use abi::{erc20_interface, load_abi, parse_block_id, parse_method_args, resolve_function};
pub use format::format_value;
pub(crate) use format::value_to_json;
