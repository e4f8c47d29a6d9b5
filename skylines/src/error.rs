//! Error types for catalog loading and line-figure parsing.

use thiserror::Error;

/// Errors produced while generating the constellation data.
///
/// Every variant is fatal for a generation run; there is no recoverable
/// class. The generator binary maps [`Error::StarNotFound`] to its own
/// exit status so operators can tell bad drawing data from bad inputs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A coordinate field in the catalog was not a decimal number.
    #[error("invalid coordinate value {text:?}")]
    InvalidCoordinate {
        text: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A catalog row had fewer comma-separated fields than the fixed
    /// column layout requires.
    #[error("catalog row {line} has {found} fields, expected at least {expected}")]
    ShortRow {
        line: usize,
        found: usize,
        expected: usize,
    },

    /// A move/draw record carried no star identifier token.
    #[error("record line {text:?} has no star identifier")]
    MalformedRecord { text: String },

    /// A line figure referenced an identifier absent from the catalog,
    /// patch set included.
    #[error("star HD {0} not found in catalog")]
    StarNotFound(String),

    #[error("failed to download {url}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
