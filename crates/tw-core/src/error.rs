use crate::seed::SeedId;

/// Alias for `Result<T, TwError>`.
pub type TwResult<T> = Result<T, TwError>;

/// Errors that can occur when manipulating a world.
#[derive(Debug, thiserror::Error)]
pub enum TwError {
    /// The requested seed ID does not exist in the world.
    #[error("seed not found: {0}")]
    SeedNotFound(SeedId),

    /// A seed with the same ID is already part of the world.
    #[error("seed already exists: {0}")]
    DuplicateSeed(SeedId),
}
