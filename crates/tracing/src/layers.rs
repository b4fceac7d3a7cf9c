use std::path::PathBuf;

use rolling_file::{RollingConditionBasic, RollingFileAppender};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{filter::Directive, EnvFilter, Layer, Registry};

use crate::formatter::LogFormat;

/// A worker guard returned by the file layer. Dropping it flushes and stops the writer.
pub type FileWorkerGuard = tracing_appender::non_blocking::WorkerGuard;

/// A boxed tracing [Layer].
pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Noisy transport crates, silenced unless a directive re-enables them.
const DEFAULT_ENV_FILTER_DIRECTIVES: [&str; 3] =
    ["hyper::proto::h1=off", "alloy_transport_http=off", "reqwest=off"];

/// Manages the collection of layers for a tracing subscriber.
#[derive(Default)]
pub(crate) struct Layers {
    inner: Vec<BoxedLayer<Registry>>,
}

impl Layers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_inner(self) -> Vec<BoxedLayer<Registry>> {
        self.inner
    }

    pub(crate) fn journald(&mut self, filter: &str) -> eyre::Result<()> {
        let journald_filter = build_env_filter(None, filter)?;
        let layer = tracing_journald::layer()?.with_filter(journald_filter).boxed();
        self.inner.push(layer);
        Ok(())
    }

    pub(crate) fn stdout(
        &mut self,
        format: LogFormat,
        default_directive: Directive,
        filters: &str,
        color: Option<String>,
    ) -> eyre::Result<()> {
        let filter = build_env_filter(Some(default_directive), filters)?;
        let layer = format.apply(filter, color, None);
        self.inner.push(layer);
        Ok(())
    }

    pub(crate) fn file(
        &mut self,
        format: LogFormat,
        default_directive: Directive,
        filters: &str,
        file_info: FileInfo,
    ) -> eyre::Result<FileWorkerGuard> {
        let (writer, guard) = file_info.create_log_writer()?;
        let file_filter = build_env_filter(Some(default_directive), filters)?;
        let layer = format.apply(file_filter, None, Some(writer));
        self.inner.push(layer);
        Ok(guard)
    }
}

/// Where and how to write the rolling log file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    dir: PathBuf,
    file_name: String,
    max_size_bytes: u64,
    max_files: usize,
}

impl FileInfo {
    /// Creates a new `FileInfo` writing `batchcall.log` into `dir`, rotating once the file
    /// exceeds `max_size_bytes` and keeping at most `max_files` rotated files.
    pub fn new(dir: PathBuf, max_size_bytes: u64, max_files: usize) -> Self {
        Self { dir, file_name: "batchcall.log".to_string(), max_size_bytes, max_files }
    }

    fn create_log_writer(&self) -> eyre::Result<(NonBlocking, FileWorkerGuard)> {
        std::fs::create_dir_all(&self.dir)?;

        let appender = RollingFileAppender::new(
            self.dir.join(&self.file_name),
            RollingConditionBasic::new().max_size(self.max_size_bytes),
            self.max_files,
        )?;

        Ok(tracing_appender::non_blocking(appender))
    }
}

/// Builds an [EnvFilter] from `RUST_LOG`, the default directive and a comma separated list of
/// extra directives.
fn build_env_filter(
    default_directive: Option<Directive>,
    directives: &str,
) -> eyre::Result<EnvFilter> {
    let env_filter = if let Some(default_directive) = default_directive {
        EnvFilter::builder().with_default_directive(default_directive).from_env_lossy()
    } else {
        EnvFilter::builder().from_env_lossy()
    };

    DEFAULT_ENV_FILTER_DIRECTIVES
        .into_iter()
        .chain(directives.split(',').filter(|d| !d.is_empty()))
        .try_fold(env_filter, |env_filter, directive| {
            Ok(env_filter.add_directive(directive.parse()?))
        })
}
