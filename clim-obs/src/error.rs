/// Error types for station activity resolution
use thiserror::Error;

/// Errors raised by the station activity resolver.
///
/// Both are terminal for the request that triggered them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverError {
    /// No observations to rank stations by
    #[error("cannot rank station activity: no observations present")]
    EmptyInput,

    /// No observation date to anchor a trailing window on
    #[error("cannot anchor a date window: no observations present")]
    NoObservations,
}

/// Type alias for Results using ResolverError
pub type Result<T> = std::result::Result<T, ResolverError>;
