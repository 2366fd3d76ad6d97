//! CLI-boundary error type.
//!
//! The pure core (`detector`, `calculator`, `rational`) never returns an
//! `Err` — its three failure modes (empty heir list, non-unity
//! distribution, unsupported configuration) are reported as [`Outcome`]
//! variants in the result envelope, not exceptions. This type exists only
//! for the thin CLI shell, which has genuine fallible I/O (reading stdin,
//! writing JSON) that the core does not.

use thiserror::Error;

/// Errors surfaced by the `mawarith` binary.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("no input text provided")]
    EmptyInput,
}
