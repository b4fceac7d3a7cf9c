use alloy_dyn_abi::DynSolValue;
use batchcall_common::utils::strings::encode_hex;
use serde_json::json;

/// Formats a decoded value for display: integers in decimal, addresses checksummed, byte
/// strings as `0x`-prefixed hex, arrays in brackets and tuples in parentheses.
///
/// ```
/// use alloy::primitives::U256;
/// use alloy_dyn_abi::DynSolValue;
/// use batchcall_multicall::format_value;
///
/// assert_eq!(format_value(&DynSolValue::Uint(U256::from(18), 8)), "18");
/// ```
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Uint(v, _) => v.to_string(),
        DynSolValue::Int(v, _) => v.to_string(),
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Bytes(b) => format!("0x{}", encode_hex(b)),
        DynSolValue::FixedBytes(word, size) => format!("0x{}", encode_hex(&word[..*size])),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            format!("[{}]", values.iter().map(format_nested).collect::<Vec<_>>().join(", "))
        }
        DynSolValue::Tuple(values) => {
            format!("({})", values.iter().map(format_nested).collect::<Vec<_>>().join(", "))
        }
        other => format!("{other:?}"),
    }
}

// strings nested in a collection are quoted so separators stay unambiguous
fn format_nested(value: &DynSolValue) -> String {
    match value {
        DynSolValue::String(s) => format!("{s:?}"),
        other => format_value(other),
    }
}

/// Converts a decoded value to JSON. Integers that fit in 64 bits become JSON numbers, wider
/// ones become decimal strings.
pub(crate) fn value_to_json(value: &DynSolValue) -> serde_json::Value {
    match value {
        DynSolValue::Bool(b) => json!(b),
        DynSolValue::Uint(v, _) => {
            u64::try_from(*v).map(|n| json!(n)).unwrap_or_else(|_| json!(v.to_string()))
        }
        DynSolValue::Int(v, _) => {
            i64::try_from(*v).map(|n| json!(n)).unwrap_or_else(|_| json!(v.to_string()))
        }
        DynSolValue::String(s) => json!(s),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) | DynSolValue::Tuple(values) => {
            json!(values.iter().map(value_to_json).collect::<Vec<_>>())
        }
        other => json!(format_value(other)),
    }
}
