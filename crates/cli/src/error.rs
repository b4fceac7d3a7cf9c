#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("Multicall error: {0}")]
    MulticallError(#[from] batchcall_multicall::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] batchcall_config::error::Error),
}
