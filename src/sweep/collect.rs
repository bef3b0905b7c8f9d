use std::sync::Mutex;

use image::RgbaImage;

use crate::foundation::error::{FailureRecord, SweepError, SweepFailure, SweepResult};

/// One rendered frame and the block size it was rendered at.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameResult {
    /// The quantized image.
    pub image: RgbaImage,
    /// Block size used to produce `image`.
    pub block_size: i64,
}

/// Order of frames in a finished sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameOrder {
    /// Smallest block size first.
    #[default]
    Ascending,
    /// Largest block size first.
    Descending,
}

impl FrameOrder {
    /// `Descending` when `reverse`, otherwise `Ascending`.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

/// Terminal state of a sweep: every frame, or every failure.
#[derive(Debug)]
pub enum SweepOutcome {
    /// All tasks succeeded; frames are sorted by block size.
    AllFrames(Vec<FrameResult>),
    /// At least one task failed; computed frames were discarded.
    Failure(SweepFailure),
}

impl SweepOutcome {
    /// Convert into a result, mapping `Failure` to [`SweepError::SweepFailed`].
    pub fn into_result(self) -> SweepResult<Vec<FrameResult>> {
        match self {
            Self::AllFrames(frames) => Ok(frames),
            Self::Failure(failure) => Err(SweepError::SweepFailed(failure)),
        }
    }

    /// Whether this outcome carries frames.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::AllFrames(_))
    }
}

/// Fan-in point for worker output.
///
/// Safe to share across workers; each publish lands in exactly one list exactly once.
#[derive(Debug, Default)]
pub struct ResultCollector {
    frames: Mutex<Vec<FrameResult>>,
    failures: Mutex<Vec<FailureRecord>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one task outcome.
    pub fn publish(&self, outcome: Result<FrameResult, FailureRecord>) {
        match outcome {
            Ok(frame) => lock(&self.frames).push(frame),
            Err(failure) => lock(&self.failures).push(failure),
        }
    }

    /// Number of outcomes published so far.
    pub fn published(&self) -> usize {
        lock(&self.frames).len() + lock(&self.failures).len()
    }

    /// Finalize: fail closed if anything failed, otherwise sort frames per `order`.
    pub fn finish(self, order: FrameOrder) -> SweepOutcome {
        let failures = into_inner(self.failures);
        if !failures.is_empty() {
            return SweepOutcome::Failure(SweepFailure::new(failures));
        }

        let mut frames = into_inner(self.frames);
        sort_frames(&mut frames, order);
        SweepOutcome::AllFrames(frames)
    }
}

/// Sort frames by block size in the requested direction.
pub fn sort_frames(frames: &mut [FrameResult], order: FrameOrder) {
    match order {
        FrameOrder::Ascending => frames.sort_unstable_by_key(|f| f.block_size),
        FrameOrder::Descending => frames.sort_unstable_by(|a, b| b.block_size.cmp(&a.block_size)),
    }
}

// A poisoned list still holds every completed push; a panicking worker cannot leave a
// half-written `Vec::push` behind.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

fn into_inner<T>(m: Mutex<T>) -> T {
    m.into_inner().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/sweep/collect.rs"]
mod tests;
