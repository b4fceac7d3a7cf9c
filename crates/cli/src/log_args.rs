//! clap [Args](clap::Args) for logging configuration.
// Mostly taken from [reth](https://github.com/paradigmxyz/reth)

use batchcall_tracing::{
    tracing_subscriber::filter::Directive, BatchcallTracer, FileInfo, FileWorkerGuard, LayerInfo,
    LogFormat, Tracer,
};
use clap::{ArgAction, Args, ValueEnum};
use std::{
    fmt::{self, Display},
    path::PathBuf,
};
use tracing::{level_filters::LevelFilter, Level};

const MB_TO_BYTES: u64 = 1024 * 1024;

/// The log configuration.
#[derive(Debug, Args)]
#[clap(next_help_heading = "LOGGING")]
pub(crate) struct LogArgs {
    /// The format to use for logs written to stdout.
    #[clap(long = "log.stdout.format", value_name = "FORMAT", global = true, default_value_t = LogFormat::Terminal)]
    pub log_stdout_format: LogFormat,

    /// The filter to use for logs written to stdout.
    #[clap(long = "log.stdout.filter", value_name = "FILTER", global = true, default_value = "")]
    pub log_stdout_filter: String,

    /// The directory to write log files to. File logging is disabled unless this is set.
    #[clap(long = "log.file.directory", value_name = "PATH", global = true)]
    pub log_file_directory: Option<PathBuf>,

    /// The format to use for logs written to the log file.
    #[clap(long = "log.file.format", value_name = "FORMAT", global = true, default_value_t = LogFormat::Terminal)]
    pub log_file_format: LogFormat,

    /// The filter to use for logs written to the log file.
    #[clap(long = "log.file.filter", value_name = "FILTER", global = true, default_value = "debug")]
    pub log_file_filter: String,

    /// The maximum size (in MB) of one log file.
    #[clap(long = "log.file.max-size", value_name = "SIZE", global = true, default_value_t = 200)]
    pub log_file_max_size: u64,

    /// The maximum amount of log files that will be stored.
    #[clap(long = "log.file.max-files", value_name = "COUNT", global = true, default_value_t = 5)]
    pub log_file_max_files: usize,

    /// Write logs to journald.
    #[clap(long = "log.journald", global = true)]
    pub journald: bool,

    /// The filter to use for logs written to journald.
    #[clap(
        long = "log.journald.filter",
        value_name = "FILTER",
        global = true,
        default_value = "error"
    )]
    pub journald_filter: String,

    /// Sets whether or not the formatter emits ANSI terminal escape codes for colors and other
    /// text formatting.
    #[clap(
        long,
        value_name = "COLOR",
        global = true,
        default_value_t = ColorMode::Always
    )]
    pub color: ColorMode,

    /// The verbosity settings for the tracer.
    #[clap(flatten)]
    pub verbosity: Verbosity,
}

impl LogArgs {
    /// Creates a [LayerInfo] instance.
    fn layer(&self, format: LogFormat, filter: String, use_color: bool) -> LayerInfo {
        LayerInfo::new(
            format,
            self.verbosity.directive().to_string(),
            filter,
            if use_color { Some(self.color.to_string()) } else { None },
        )
    }

    /// Initializes tracing with the configured options from cli args.
    ///
    /// The returned guard flushes the log file when dropped, so it must be held until exit.
    pub(crate) fn init_tracing(&self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut tracer = BatchcallTracer::new();

        let stdout = self.layer(self.log_stdout_format, self.log_stdout_filter.clone(), true);
        tracer = tracer.with_stdout(stdout);

        if self.journald {
            tracer = tracer.with_journald(self.journald_filter.clone());
        }

        if let Some(directory) = &self.log_file_directory {
            let file = self.layer(self.log_file_format, self.log_file_filter.clone(), false);
            let info = FileInfo::new(
                directory.clone(),
                self.log_file_max_size * MB_TO_BYTES,
                self.log_file_max_files,
            );
            tracer = tracer.with_file(file, info);
        }

        let guard = tracer.init()?;
        Ok(guard)
    }
}

/// The color mode for the cli.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub(crate) enum ColorMode {
    /// Colors on
    Always,
    /// Colors on if stdout is a terminal
    Auto,
    /// Colors off
    Never,
}

impl ColorMode {
    /// Force colored terminal output on or off. `Auto` leaves the decision to `colored`, which
    /// checks whether stdout is a terminal.
    pub(crate) fn apply(self) {
        match self {
            ColorMode::Always => colored::control::set_override(true),
            ColorMode::Never => colored::control::set_override(false),
            ColorMode::Auto => colored::control::unset_override(),
        }
    }
}

impl Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Always => write!(f, "always"),
            ColorMode::Auto => write!(f, "auto"),
            ColorMode::Never => write!(f, "never"),
        }
    }
}

/// The verbosity settings for the cli.
#[derive(Debug, Copy, Clone, Args)]
#[clap(next_help_heading = "DISPLAY")]
pub(crate) struct Verbosity {
    /// Set the minimum log level.
    ///
    /// -v     Warnings & Errors
    /// -vv    Info
    /// -vvv   Debug
    /// -vvvv  Traces (warning: very verbose!)
    #[clap(short, long, action = ArgAction::Count, global = true, default_value_t = 1, verbatim_doc_comment, help_heading = "DISPLAY")]
    verbosity: u8,

    /// Silence all log output.
    #[clap(long, alias = "silent", short = 'q', global = true, help_heading = "DISPLAY")]
    quiet: bool,
}

impl Verbosity {
    /// Get the corresponding [Directive] for the given verbosity, or none if the verbosity
    /// corresponds to silent.
    pub(crate) fn directive(&self) -> Directive {
        if self.quiet {
            LevelFilter::OFF.into()
        } else {
            let level = match self.verbosity.saturating_sub(1) {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            };

            level.into()
        }
    }
}
