use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::{
    aggregate::color::Aggregator,
    encode::gif::{DEFAULT_FRAME_DELAY, DEFAULT_GIF_SPEED, check_speed},
    foundation::error::{SweepError, SweepResult},
    sweep::{collect::FrameOrder, pool::DEFAULT_WORKERS, schedule::BlockSizeRange},
    transform::block::{BlockTransform, Jitter},
};

/// Everything one sweep needs besides the input image.
///
/// Every field has a default, so a JSON config only needs to name what it changes:
///
/// ```json
/// { "range": { "start": 1, "end": 40, "step": 3 }, "workers": 8, "reverse": true }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Block sizes to render.
    pub range: BlockSizeRange,
    /// Number of parallel workers (>= 1).
    pub workers: usize,
    /// Order frames from largest to smallest block size.
    pub reverse: bool,
    /// Window color aggregation.
    pub aggregator: Aggregator,
    /// Perturb painted colors per channel.
    pub jitter: bool,
    /// Base seed for jitter.
    pub seed: u64,
    /// Animation frame delay, in hundredths of a second.
    pub frame_delay: u16,
    /// GIF palette quantization speed, `1..=30`.
    pub gif_speed: i32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            range: BlockSizeRange::default(),
            workers: DEFAULT_WORKERS,
            reverse: false,
            aggregator: Aggregator::Median,
            jitter: false,
            seed: 0,
            frame_delay: DEFAULT_FRAME_DELAY,
            gif_speed: DEFAULT_GIF_SPEED,
        }
    }
}

impl SweepConfig {
    /// Default config over `range`.
    pub fn with_range(range: BlockSizeRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> SweepResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| SweepError::serde(format!("parse sweep config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_reader(r: impl Read) -> SweepResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| SweepError::serde(format!("parse sweep config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SweepResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SweepError::validation(format!("open sweep config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check invariants not already enforced by field types.
    pub fn validate(&self) -> SweepResult<()> {
        if self.workers == 0 {
            return Err(SweepError::validation("sweep workers must be >= 1"));
        }
        check_speed(self.gif_speed)
    }

    pub fn order(&self) -> FrameOrder {
        FrameOrder::from_reverse(self.reverse)
    }

    pub fn transform(&self) -> BlockTransform {
        BlockTransform::new(self.aggregator, Jitter::from_flag(self.jitter, self.seed))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sweep/config.rs"]
mod tests;
