//! Error types for the inference core.
//!
//! Every core operation returns `Result<T, Error>`. Errors abort the current
//! run: there is no partial output and nothing is retried.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // ------------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------------
    /// A composite value reached the atom classifier.
    #[error("this is not a simple value: expected string, number, boolean or null, found {kind}")]
    InvalidLeaf { kind: &'static str },

    /// A host value has no JSON representation.
    #[error("unsupported value: {reason}")]
    UnsupportedValue { reason: String },

    // ------------------------------------------------------------------------
    // Deduplication
    // ------------------------------------------------------------------------
    /// An array declaration references a declaration that was merged away.
    #[error(
        "cannot rewrite reference `{reference}` inside array declaration `{declaration}`: \
         array reference rewriting is not implemented"
    )]
    UnimplementedRewrite { declaration: String, reference: String },

    #[error("failed to serialize declaration content: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
