use thiserror::Error;

/// Rejected entity or world configuration.
///
/// Raised synchronously at construction; a rejected entity is simply never
/// created and nothing already in a world is affected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be non-negative, got {value}")]
    NegativeSize { field: &'static str, value: f32 },
    #[error("bounciness must be non-negative, got {0}")]
    NegativeBounciness(f32),
    #[error("{0} must be finite")]
    NonFinite(&'static str),
    #[error("invalid world configuration: {0}")]
    InvalidWorld(&'static str),
    #[error("malformed configuration json: {0}")]
    Json(#[from] serde_json::Error),
}
