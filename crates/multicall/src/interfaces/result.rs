use alloy::primitives::{Address, Bytes, U256};
use alloy_dyn_abi::DynSolValue;
use batchcall_common::utils::strings::{encode_hex, shorten};
use serde_json::json;

use crate::{
    error::Error,
    utils::{format_value, value_to_json},
};

/// The decoded outcome of one sub-call.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnValue {
    /// The sub-call succeeded and its return data decoded against the method's outputs.
    Decoded(Vec<DynSolValue>),
    /// The aggregator reported the sub-call as failed: the target reverted or ran out of the
    /// provisioned gas.
    Reverted,
    /// The sub-call did not revert, but its return data does not decode against the method's
    /// outputs. Calls to addresses without code end up here, since they return no data.
    Malformed(String),
}

impl ReturnValue {
    /// A human readable rendering of the outcome.
    pub fn display(&self) -> String {
        match self {
            ReturnValue::Decoded(values) => {
                values.iter().map(format_value).collect::<Vec<_>>().join(", ")
            }
            ReturnValue::Reverted => "reverted".to_string(),
            ReturnValue::Malformed(reason) => format!("malformed return data ({reason})"),
        }
    }
}

/// The result of one sub-call, in the same position as its [`crate::CallTarget`].
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    /// The contract that was called
    pub target: Address,
    /// Whether the sub-call succeeded and its return data decoded. `false` means this target
    /// failed; its siblings are unaffected.
    pub success: bool,
    /// Gas used by the sub-call, as measured by the aggregator
    pub gas_used: U256,
    /// The raw return data
    pub return_data: Bytes,
    /// The decoded return data
    pub value: ReturnValue,
}

impl CallResult {
    /// The decoded values, if the sub-call succeeded.
    pub fn decoded(&self) -> Option<&[DynSolValue]> {
        match &self.value {
            ReturnValue::Decoded(values) => Some(values),
            _ => None,
        }
    }

    /// The first decoded value. Convenient for methods with a single return value, like
    /// `decimals()`.
    pub fn first(&self) -> Option<&DynSolValue> {
        self.decoded().and_then(|values| values.first())
    }
}

/// The decoded answer of the aggregator: the block the batch executed in, and one
/// [`CallResult`] per submitted call, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResponse {
    /// The block number the aggregator executed the batch in
    pub block_number: U256,
    /// One result per call, in submission order
    pub results: Vec<CallResult>,
}

impl AggregatedResponse {
    /// The number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether there are no results. A response to a valid request is never empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over the results in submission order.
    pub fn iter(&self) -> std::slice::Iter<'_, CallResult> {
        self.results.iter()
    }

    /// The number of sub-calls that succeeded.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|result| result.success).count()
    }

    /// Render a plain text report, one line per call followed by a summary line.
    ///
    /// `labels` name the targets positionally (e.g. token symbols); targets without a label are
    /// shown by their checksummed address.
    pub fn report(&self, method: &str, labels: &[String]) -> Vec<String> {
        let mut lines = self
            .results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let label = labels
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| result.target.to_checksum(None));

                format!("{label} {method}: {}", shorten(&result.value.display(), 120))
            })
            .collect::<Vec<_>>();

        lines.push(format!(
            "block {}: {}/{} calls succeeded",
            self.block_number,
            self.succeeded(),
            self.len()
        ));

        lines
    }

    /// Converts the response to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        let results = self
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| {
                json!({
                    "index": index,
                    "target": result.target.to_checksum(None),
                    "success": result.success,
                    "gas_used": result.gas_used.to_string(),
                    "return_data": format!("0x{}", encode_hex(&result.return_data)),
                    "decoded": match &result.value {
                        ReturnValue::Decoded(values) => {
                            json!(values.iter().map(value_to_json).collect::<Vec<_>>())
                        }
                        _ => serde_json::Value::Null,
                    },
                    "error": match &result.value {
                        ReturnValue::Decoded(_) => serde_json::Value::Null,
                        ReturnValue::Reverted => json!("reverted"),
                        ReturnValue::Malformed(reason) => json!(reason),
                    },
                })
            })
            .collect::<Vec<_>>();

        serde_json::to_string_pretty(&json!({
            "block_number": self.block_number.to_string(),
            "results": results,
        }))
        .map_err(|e| Error::Eyre(eyre::eyre!("Failed to serialize to JSON: {}", e)))
    }
}

impl<'a> IntoIterator for &'a AggregatedResponse {
    type Item = &'a CallResult;
    type IntoIter = std::slice::Iter<'a, CallResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
