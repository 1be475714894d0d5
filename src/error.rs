use derive_more::{Display, From};

use crate::types::Value;

pub type Result<T> = core::result::Result<T, OutlineError>;

#[derive(Debug, Display, From)]
#[display("{self:?}")]
pub enum OutlineError {
    /// `gapBetweenPoints` was zero, negative or not finite.
    InvalidGap(Value),
    /// `verticalGap` was zero, negative or not finite.
    InvalidVerticalGap(Value),
    /// A point ceiling of zero was requested.
    InvalidMaxPoints,
    /// The configuration document could not be parsed.
    #[from]
    Config(serde_json::Error),
}

impl std::error::Error for OutlineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutlineError::Config(err) => Some(err),
            _ => None,
        }
    }
}
