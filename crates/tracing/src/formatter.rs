use crate::layers::BoxedLayer;
use clap::ValueEnum;
use std::{
    fmt::{self, Display},
    io::IsTerminal,
};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Represents the logging format.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub enum LogFormat {
    /// Structured JSON, one object per event.
    Json,

    /// Key-value pairs in logfmt.
    #[value(name = "logfmt")]
    LogFmt,

    /// Human readable output for terminals.
    Terminal,
}

impl LogFormat {
    /// Builds a layer of this format with the given filter, writing to `file_writer` if present
    /// and to stdout otherwise.
    pub fn apply(
        &self,
        filter: EnvFilter,
        color: Option<String>,
        file_writer: Option<NonBlocking>,
    ) -> BoxedLayer<Registry> {
        let ansi = if let Some(color) = color {
            std::env::var("RUST_LOG_STYLE")
                .map(|val| use_ansi(&val))
                .unwrap_or_else(|_| use_ansi(&color))
        } else {
            false
        };
        let target = std::env::var("RUST_LOG_TARGET").map(|val| val != "0").unwrap_or(true);

        match self {
            Self::Json => {
                let layer =
                    tracing_subscriber::fmt::layer().json().with_ansi(ansi).with_target(target);

                if let Some(writer) = file_writer {
                    layer.with_writer(writer).with_filter(filter).boxed()
                } else {
                    layer.with_filter(filter).boxed()
                }
            }
            Self::LogFmt => {
                if let Some(writer) = file_writer {
                    tracing_logfmt::builder().layer_with_writer(writer).with_filter(filter).boxed()
                } else {
                    tracing_logfmt::layer().with_filter(filter).boxed()
                }
            }
            Self::Terminal => {
                let layer = tracing_subscriber::fmt::layer().with_ansi(ansi).with_target(target);

                if let Some(writer) = file_writer {
                    layer.with_writer(writer).with_filter(filter).boxed()
                } else {
                    layer.with_filter(filter).boxed()
                }
            }
        }
    }
}

/// Whether a color mode (`always`, `auto` or `never`) enables ANSI escape codes. `auto` enables
/// them only when stdout is a terminal.
pub(crate) fn use_ansi(color: &str) -> bool {
    match color {
        "never" => false,
        "auto" => std::io::stdout().is_terminal(),
        _ => true,
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::LogFmt => write!(f, "logfmt"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}
