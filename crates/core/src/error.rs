use thiserror::Error;

/// Errors raised while building filters. Fragment compilation itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A filter was configured with something it cannot use, e.g. a missing asset.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid tool version: {0}")]
    InvalidVersion(String),
}

impl FilterError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
