use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::foundation::error::{SweepError, SweepResult};

/// Largest number of block sizes one range may hold.
pub const MAX_SWEEP_LEN: usize = 65_536;

/// Closed block-size series `start, start + step, ... <= end`.
///
/// Construction enforces `start < end`, `step > 0` and at most [`MAX_SWEEP_LEN`] members; an
/// instance is always non-empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct BlockSizeRange {
    start: i64,
    end: i64,
    step: i64,
    len: usize,
}

#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
struct RawRange {
    start: i64,
    end: i64,
    step: i64,
}

impl TryFrom<RawRange> for BlockSizeRange {
    type Error = SweepError;

    fn try_from(raw: RawRange) -> SweepResult<Self> {
        Self::new(raw.start, raw.end, raw.step)
    }
}

impl From<BlockSizeRange> for RawRange {
    fn from(r: BlockSizeRange) -> Self {
        Self {
            start: r.start,
            end: r.end,
            step: r.step,
        }
    }
}

impl BlockSizeRange {
    /// Validate and build a range.
    pub fn new(start: i64, end: i64, step: i64) -> SweepResult<Self> {
        let mut r = Self {
            start,
            end,
            step,
            len: 0,
        };
        if start >= end {
            return Err(SweepError::invalid_range(format!(
                "start must be < end: {r}"
            )));
        }
        if step <= 0 {
            return Err(SweepError::invalid_range(format!("step must be > 0: {r}")));
        }
        // Both operands are positive here and the span always fits in i128.
        let count = (i128::from(end) - i128::from(start)) / i128::from(step) + 1;
        r.len = match usize::try_from(count) {
            Ok(n) if n <= MAX_SWEEP_LEN => n,
            _ => {
                return Err(SweepError::invalid_range(format!(
                    "{count} block sizes exceeds the limit of {MAX_SWEEP_LEN}: {r}"
                )));
            }
        };
        Ok(r)
    }

    /// First block size.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Inclusive upper bound.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Distance between consecutive block sizes.
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Number of block sizes in the series: `(end - start) / step + 1`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The full series in ascending order. Pure; calling it again yields the same values.
    pub fn block_sizes(&self) -> Vec<i64> {
        let (step, end) = (self.step, self.end);
        std::iter::successors(Some(self.start), |b| {
            b.checked_add(step).filter(|next| *next <= end)
        })
        .take(self.len)
        .collect()
    }
}

impl Default for BlockSizeRange {
    fn default() -> Self {
        Self {
            start: 1,
            end: 150,
            step: 1,
            len: 150,
        }
    }
}

impl fmt::Display for BlockSizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "blockSizeRange{{start={} end={} step={}}}",
            self.start, self.end, self.step
        )
    }
}

/// Generate the ordered block-size series for `range`.
pub fn generate(range: &BlockSizeRange) -> Vec<i64> {
    range.block_sizes()
}

/// A single unit of sweep work: one block size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Task {
    /// Block size this task renders.
    pub block_size: i64,
}

/// Shared multi-consumer queue over a fixed task list.
///
/// Each task is handed out exactly once; `pop` never blocks and returns `None` once drained.
#[derive(Debug)]
pub struct TaskQueue {
    tasks: Vec<Task>,
    cursor: AtomicUsize,
}

impl TaskQueue {
    /// Queue every block size of `range`, ascending.
    pub fn new(range: &BlockSizeRange) -> Self {
        Self::from_block_sizes(range.block_sizes())
    }

    /// Queue an explicit list of block sizes, in the given order.
    pub fn from_block_sizes(block_sizes: impl IntoIterator<Item = i64>) -> Self {
        Self {
            tasks: block_sizes
                .into_iter()
                .map(|block_size| Task { block_size })
                .collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Take the next task, if any remain.
    pub fn pop(&self) -> Option<Task> {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.tasks.get(idx).copied()
    }

    /// Total number of tasks issued by this queue.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the queue was created without tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sweep/schedule.rs"]
mod tests;
