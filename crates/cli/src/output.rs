use std::str::FromStr;

use batchcall_multicall::AggregatedResponse;
use colored::Colorize;

use crate::error::Error;

/// Where and how a response is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    /// One human readable line per call on stdout
    Print,
    /// Pretty-printed JSON on stdout
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "print" => Ok(OutputFormat::Print),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::Generic(format!(
                "invalid output format '{s}', expected 'print' or 'json'"
            ))),
        }
    }
}

/// Render `response` for stdout. Failed calls are highlighted in print mode.
pub(crate) fn render(
    response: &AggregatedResponse,
    method: &str,
    labels: &[String],
    format: OutputFormat,
) -> Result<String, Error> {
    match format {
        OutputFormat::Json => Ok(response.to_json()?),
        OutputFormat::Print => {
            let mut lines = response.report(method, labels);
            let summary = lines.pop().unwrap_or_default();

            let mut output = lines
                .into_iter()
                .zip(response.iter())
                .map(|(line, result)| {
                    if result.success {
                        line
                    } else {
                        line.red().to_string()
                    }
                })
                .collect::<Vec<_>>();
            output.push(summary.bold().to_string());

            Ok(output.join("\n"))
        }
    }
}
