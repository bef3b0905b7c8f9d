use std::fmt;

/// Convenience result type used across blocksweep.
pub type SweepResult<T> = Result<T, SweepError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    /// Block-size range rejected before any work was scheduled.
    #[error("invalid block size range: {0}")]
    InvalidRange(String),

    /// An aggregation window covered zero pixels.
    #[error("degenerate region: {0}")]
    DegenerateRegion(String),

    /// A worker finished a task without producing an image.
    #[error("no image produced for block size {block_size}")]
    NilTransformResult {
        /// Block size of the task that produced nothing.
        block_size: i64,
    },

    /// Any other per-task transform failure.
    #[error("transform error: {0}")]
    Transform(String),

    /// Task skipped because the sweep was cancelled.
    #[error("cancelled before block size {block_size} ran")]
    Cancelled {
        /// Block size of the skipped task.
        block_size: i64,
    },

    /// Aggregate of every per-task failure in one sweep.
    #[error(transparent)]
    SweepFailed(#[from] SweepFailure),

    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Input image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Output image or animation could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SweepError {
    /// Build a [`SweepError::InvalidRange`] value.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Build a [`SweepError::DegenerateRegion`] value.
    pub fn degenerate_region(msg: impl Into<String>) -> Self {
        Self::DegenerateRegion(msg.into())
    }

    /// Build a [`SweepError::Transform`] value.
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform(msg.into())
    }

    /// Build a [`SweepError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SweepError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SweepError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SweepError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// One task that did not produce a frame.
#[derive(Debug)]
pub struct FailureRecord {
    /// Block size of the failed task.
    pub block_size: i64,
    /// Why it failed.
    pub cause: SweepError,
}

impl FailureRecord {
    /// Pair a block size with its failure cause.
    pub fn new(block_size: i64, cause: SweepError) -> Self {
        Self { block_size, cause }
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blockSize={}: {}", self.block_size, self.cause)
    }
}

/// Compound error carrying every failure of a sweep, ordered by block size.
///
/// Never empty when produced by the collector.
#[derive(Debug)]
pub struct SweepFailure {
    records: Vec<FailureRecord>,
}

impl SweepFailure {
    /// Build from collected records; sorts them by block size.
    pub fn new(mut records: Vec<FailureRecord>) -> Self {
        records.sort_by_key(|r| r.block_size);
        Self { records }
    }

    /// All failure records, ascending by block size.
    pub fn records(&self) -> &[FailureRecord] {
        &self.records
    }

    /// Block sizes that failed, ascending.
    pub fn block_sizes(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.block_size).collect()
    }

    /// Number of failed tasks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume into the underlying records.
    pub fn into_records(self) -> Vec<FailureRecord> {
        self.records
    }
}

impl fmt::Display for SweepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sweep failed for {} block size(s)", self.records.len())?;
        for r in &self.records {
            write!(f, "\n  {r}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SweepFailure {}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
