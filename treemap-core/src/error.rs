use thiserror::Error;

/// Errors raised while turning a dataset into a weighted hierarchy.
///
/// Everything is rejected at build time so that layout never sees a NaN or a
/// negative weight.
#[derive(Error, Debug)]
pub enum TreemapError {
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("leaf '{name}' has no value")]
    MissingValue { name: String },

    #[error("leaf '{name}' has no category")]
    MissingCategory { name: String },

    #[error("leaf '{name}' has a non-numeric value: {raw}")]
    NonNumericValue { name: String, raw: String },

    #[error("leaf '{name}' has a non-finite value")]
    NonFiniteValue { name: String },

    #[error("leaf '{name}' has a negative value: {value}")]
    NegativeValue { name: String, value: f64 },

    #[error("values under '{name}' sum past the largest representable number")]
    AggregateOverflow { name: String },

    #[error("invalid chart configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TreemapError>;
