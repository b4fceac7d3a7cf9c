use std::str::FromStr;

use alloy::eips::BlockId;
use alloy_dyn_abi::{DynSolValue, Specifier};
use alloy_json_abi::{Function, JsonAbi};
use batchcall_common::utils::io::file::read_file;
use eyre::eyre;
use tracing::debug;

use crate::error::Error;

/// Human-readable signatures of the ERC-20 methods used as the default shared interface.
const ERC20_METADATA: [&str; 6] = [
    "function name() view returns (string)",
    "function symbol() view returns (string)",
    "function decimals() view returns (uint8)",
    "function totalSupply() view returns (uint256)",
    "function balanceOf(address owner) view returns (uint256)",
    "function allowance(address owner, address spender) view returns (uint256)",
];

/// The ERC-20 metadata interface (`name`, `symbol`, `decimals`, `totalSupply`, `balanceOf`,
/// `allowance`).
pub fn erc20_interface() -> Result<JsonAbi, Error> {
    JsonAbi::parse(ERC20_METADATA).map_err(|e| Error::AbiError(e.to_string()))
}

/// Load an interface from a JSON file. Accepts either a bare ABI array or a compiler artifact
/// carrying the ABI under an `abi` key.
pub fn load_abi(path: &str) -> Result<JsonAbi, Error> {
    let contents = read_file(path)
        .map_err(|e| Error::AbiError(format!("failed to read ABI file '{path}': {e}")))?;
    let mut value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| Error::AbiError(format!("failed to parse ABI file '{path}': {e}")))?;

    if let Some(abi) = value.get_mut("abi") {
        debug!("reading abi from artifact '{}'", path);
        value = abi.take();
    }

    serde_json::from_value(value)
        .map_err(|e| Error::AbiError(format!("invalid ABI in '{path}': {e}")))
}

/// Find the overload of `method` to call.
///
/// `method` is either a bare name, in which case the overload taking `arity` arguments is
/// selected, or a full signature such as `balanceOf(address)`, which selects that overload
/// exactly.
pub fn resolve_function<'a>(
    interface: &'a JsonAbi,
    method: &str,
    arity: usize,
) -> Result<&'a Function, Error> {
    let method = method.trim();

    if let Some((name, _)) = method.split_once('(') {
        let signature = method.replace(' ', "");
        return interface
            .function(name.trim())
            .and_then(|overloads| overloads.iter().find(|f| f.signature() == signature))
            .ok_or_else(|| Error::UnknownMethod(method.to_string()));
    }

    let overloads =
        interface.function(method).ok_or_else(|| Error::UnknownMethod(method.to_string()))?;

    overloads
        .iter()
        .find(|f| f.inputs.len() == arity)
        .ok_or_else(|| Error::NoMatchingOverload { method: method.to_string(), arity })
}

/// Parse string arguments into typed values according to `function`'s declared inputs.
pub fn parse_method_args(function: &Function, values: &[String]) -> Result<Vec<DynSolValue>, Error> {
    let invalid = |reason: String| Error::InvalidArguments { method: function.name.clone(), reason };

    if values.len() != function.inputs.len() {
        return Err(invalid(format!(
            "expected {} argument(s), found {}",
            function.inputs.len(),
            values.len()
        )));
    }

    function
        .inputs
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (param, value))| {
            let ty = param.resolve().map_err(|e| invalid(format!("argument {i}: {e}")))?;
            ty.coerce_str(value)
                .map_err(|e| invalid(format!("argument {i} is not a valid {ty}: {e}")))
        })
        .collect()
}

/// Parse a block identifier: a decimal or hex block number, a block hash, or a tag such as
/// `latest`, `safe` or `finalized`.
pub fn parse_block_id(value: &str) -> Result<BlockId, Error> {
    let value = value.trim();

    if let Ok(number) = value.parse::<u64>() {
        return Ok(BlockId::number(number));
    }

    BlockId::from_str(value).map_err(|e| Error::Eyre(eyre!("invalid block '{}': {}", value, e)))
}
