//! Error types for hyperschema.

use thiserror::Error;

/// Top-level result type for hyperschema operations.
pub type Result<T> = std::result::Result<T, HyperschemaError>;

/// Top-level error type for hyperschema.
///
/// Comparison and hashing are total and never surface an error; the only
/// fallible operation in this crate is schema graph assembly.
#[derive(Debug, Error)]
pub enum HyperschemaError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Errors related to schema graph assembly.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("schema node edges are already connected")]
    EdgesAlreadyConnected,
}
