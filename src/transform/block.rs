use image::{Rgba, RgbaImage};

use crate::{
    aggregate::color::{Aggregator, Region},
    foundation::{
        error::{SweepError, SweepResult},
        rng::Rng64,
    },
};

/// Largest per-channel offset applied by [`Jitter::Seeded`].
pub const JITTER_BOUND: u32 = 30;

/// Per-channel color perturbation applied while painting windows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Jitter {
    /// Paint the aggregate color unchanged.
    #[default]
    Off,
    /// Offset every channel of every painted pixel by a value in `[-30, 30]`, saturating to
    /// `0..=255`. The stream is derived from the seed, the block size and the window origin.
    Seeded(u64),
}

impl Jitter {
    /// `Seeded(seed)` when `enabled`, otherwise `Off`.
    pub fn from_flag(enabled: bool, seed: u64) -> Self {
        if enabled {
            Self::Seeded(seed)
        } else {
            Self::Off
        }
    }
}

/// Overlapping block quantization at a fixed aggregator and jitter mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockTransform {
    pub aggregator: Aggregator,
    pub jitter: Jitter,
}

impl BlockTransform {
    pub fn new(aggregator: Aggregator, jitter: Jitter) -> Self {
        Self { aggregator, jitter }
    }

    /// Quantize `image` at `block_size`.
    ///
    /// Windows of half-width `block_size` are centered on a grid stepped by `block_size` and
    /// clamped to the image bounds. Each window is filled with its aggregate color; windows are
    /// visited row-major, so later windows overwrite the overlap of earlier ones.
    pub fn apply(&self, image: &RgbaImage, block_size: i64) -> SweepResult<RgbaImage> {
        if block_size <= 0 {
            return Err(SweepError::degenerate_region(format!(
                "block size {block_size} yields empty windows"
            )));
        }
        let inc = u32::try_from(block_size).unwrap_or(u32::MAX);
        let (w, h) = image.dimensions();
        let mut out = RgbaImage::new(w, h);

        for y in (0..h).step_by(inc as usize) {
            for x in (0..w).step_by(inc as usize) {
                let window = Region::new(
                    x.saturating_sub(inc),
                    y.saturating_sub(inc),
                    x.saturating_add(inc).min(w),
                    y.saturating_add(inc).min(h),
                );
                let color = self.aggregator.aggregate(image, window)?;
                match self.jitter {
                    Jitter::Off => fill(&mut out, window, color),
                    Jitter::Seeded(seed) => {
                        let mut rng = Rng64::from_keys(&[
                            seed,
                            block_size as u64,
                            u64::from(x),
                            u64::from(y),
                        ]);
                        fill_jittered(&mut out, window, color, &mut rng);
                    }
                }
            }
        }

        Ok(out)
    }
}

/// Free-function form of [`BlockTransform::apply`].
pub fn block_transform(
    image: &RgbaImage,
    block_size: i64,
    aggregator: Aggregator,
    jitter: Jitter,
) -> SweepResult<RgbaImage> {
    BlockTransform::new(aggregator, jitter).apply(image, block_size)
}

pub(crate) fn fill(out: &mut RgbaImage, window: Region, color: Rgba<u8>) {
    for y in window.y0..window.y1 {
        for x in window.x0..window.x1 {
            out.put_pixel(x, y, color);
        }
    }
}

fn fill_jittered(out: &mut RgbaImage, window: Region, color: Rgba<u8>, rng: &mut Rng64) {
    for y in window.y0..window.y1 {
        for x in window.x0..window.x1 {
            let px = color
                .0
                .map(|c| (i32::from(c) + rng.next_offset(JITTER_BOUND)).clamp(0, 255) as u8);
            out.put_pixel(x, y, Rgba(px));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/block.rs"]
mod tests;
