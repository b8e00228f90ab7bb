use tw_core::TwError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while building or driving a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A world operation failed.
    #[error(transparent)]
    World(#[from] TwError),

    /// A rule configuration value is out of range.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// A system reported a failure during a tick.
    #[error("system error: {0}")]
    SystemError(String),
}
