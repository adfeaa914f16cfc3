use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Two centers coincide, so there is no line of centers to work along.
    #[error("invalid geometry: particle centers coincide")]
    InvalidGeometry,

    /// Rejected setup parameter (radius, ranges, surface size, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
