//! Cross-cutting building blocks: the error taxonomy and the jitter generator.

/// Error and result types.
pub mod error;
pub(crate) mod rng;
