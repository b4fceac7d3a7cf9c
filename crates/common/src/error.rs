/// Error type for the common crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The given string is not a valid (checksummable) address
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),
}
