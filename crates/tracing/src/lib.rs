//! Tracing setup for the batchcall binary.
//!
//! Assembles `tracing-subscriber` layers for stdout (terminal, json or logfmt output), journald
//! and a size-rotated log file, and installs them as the global default subscriber.
// Mostly taken from [reth](https://github.com/paradigmxyz/reth)

mod formatter;
mod layers;

pub use formatter::LogFormat;
pub use layers::{FileInfo, FileWorkerGuard};

// Re-export tracing crates
pub use tracing;
pub use tracing_subscriber;

use layers::Layers;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Tracer for application logging.
///
/// Stdout logging is always enabled; journald and file logging are opt-in.
#[derive(Debug, Clone)]
pub struct BatchcallTracer {
    stdout: LayerInfo,
    journald: Option<String>,
    file: Option<(LayerInfo, FileInfo)>,
}

impl BatchcallTracer {
    /// Creates a new tracer with the default stdout layer, and journald and file logging
    /// disabled.
    pub fn new() -> Self {
        Self { stdout: LayerInfo::default(), journald: None, file: None }
    }

    /// Sets the configuration for the stdout layer.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }

    /// Enables journald logging with the given filter.
    pub fn with_journald(mut self, filter: String) -> Self {
        self.journald = Some(filter);
        self
    }

    /// Enables file logging.
    pub fn with_file(mut self, config: LayerInfo, file_info: FileInfo) -> Self {
        self.file = Some((config, file_info));
        self
    }
}

impl Default for BatchcallTracer {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration of a single logging layer.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Creates a new `LayerInfo`.
    ///
    /// * `default_directive` - the directive applied when `RUST_LOG` is unset, e.g. `warn`
    /// * `filters` - additional comma separated directives, e.g. `batchcall_multicall=trace`
    /// * `color` - the color mode, or `None` to disable ANSI escape codes
    pub fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::INFO.to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// A type that can install itself as the global tracing subscriber.
pub trait Tracer {
    /// Initialize the global subscriber. The returned guard, if any, must be held for the
    /// lifetime of the program so buffered file logs are flushed.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>>;
}

impl Tracer for BatchcallTracer {
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut layers = Layers::new();

        layers.stdout(
            self.stdout.format,
            self.stdout.default_directive.parse()?,
            &self.stdout.filters,
            self.stdout.color,
        )?;

        if let Some(config) = self.journald {
            layers.journald(&config)?;
        }

        let file_guard = if let Some((config, file_info)) = self.file {
            Some(layers.file(
                config.format,
                config.default_directive.parse()?,
                &config.filters,
                file_info,
            )?)
        } else {
            None
        };

        // a subscriber may already be installed, e.g. by a test harness
        if let Err(e) = tracing_subscriber::registry().with(layers.into_inner()).try_init() {
            tracing::debug!("global subscriber not installed: {}", e);
        }
        Ok(file_guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_info_default() {
        let info = LayerInfo::default();
        assert_eq!(info.format, LogFormat::Terminal);
        assert!(info.default_directive.eq_ignore_ascii_case("info"));
        assert!(info.filters.is_empty());
    }

    #[test]
    fn test_tracer_init_twice() {
        let first = BatchcallTracer::new().init();
        assert!(first.is_ok());

        // installing a second global subscriber is silently ignored
        let second = BatchcallTracer::new()
            .with_stdout(LayerInfo::new(
                LogFormat::Json,
                "debug".to_string(),
                "batchcall=trace".to_string(),
                None,
            ))
            .init();
        assert!(second.is_ok());
    }

    #[test]
    fn test_tracer_invalid_directive() {
        let result = BatchcallTracer::new()
            .with_stdout(LayerInfo::new(
                LogFormat::Terminal,
                "batchcall=notalevel".to_string(),
                String::new(),
                None,
            ))
            .init();
        assert!(result.is_err());
    }
}
