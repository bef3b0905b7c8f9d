use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::foundation::error::{SweepError, SweepResult};

/// Default per-frame delay, in hundredths of a second.
pub const DEFAULT_FRAME_DELAY: u16 = 10;

/// Default palette quantization speed; `1` is slowest and best, `30` fastest.
pub const DEFAULT_GIF_SPEED: i32 = 10;

/// Ordered, equally-sized frames ready to encode.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    frames: Vec<RgbaImage>,
    delay_units: u16,
    speed: i32,
}

impl Animation {
    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    /// Frame delay in hundredths of a second.
    pub fn delay_units(&self) -> u16 {
        self.delay_units
    }

    /// Shared frame dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        self.frames.first().map_or((0, 0), |f| f.dimensions())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Palette quantization speed used when encoding.
    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Set the quantization speed; must lie in `1..=30`.
    pub fn with_speed(mut self, speed: i32) -> SweepResult<Self> {
        check_speed(speed)?;
        self.speed = speed;
        Ok(self)
    }

    /// Apply `f` to every frame. The results must still share one size.
    pub fn map_frames(self, f: impl FnMut(RgbaImage) -> RgbaImage) -> SweepResult<Self> {
        let speed = self.speed;
        let frames = self.frames.into_iter().map(f).collect();
        assemble(frames, self.delay_units)?.with_speed(speed)
    }
}

pub(crate) fn check_speed(speed: i32) -> SweepResult<()> {
    if !(1..=30).contains(&speed) {
        return Err(SweepError::validation(format!(
            "gif speed must be in 1..=30, got {speed}"
        )));
    }
    Ok(())
}

/// Build an [`Animation`] from frames already in display order.
///
/// Rejects an empty sequence and frames whose dimensions differ from the first frame.
pub fn assemble(frames: Vec<RgbaImage>, delay_units: u16) -> SweepResult<Animation> {
    let Some(first) = frames.first() else {
        return Err(SweepError::validation("animation needs at least one frame"));
    };
    let dims = first.dimensions();
    if let Some((idx, f)) = frames
        .iter()
        .enumerate()
        .find(|(_, f)| f.dimensions() != dims)
    {
        return Err(SweepError::validation(format!(
            "frame {idx} is {}x{}, expected {}x{}",
            f.width(),
            f.height(),
            dims.0,
            dims.1
        )));
    }
    Ok(Animation {
        frames,
        delay_units,
        speed: DEFAULT_GIF_SPEED,
    })
}

/// Encode `anim` as an infinitely looping GIF into `w`.
pub fn write_gif<W: Write>(anim: &Animation, w: W) -> SweepResult<()> {
    let delay = Delay::from_numer_denom_ms(u32::from(anim.delay_units) * 10, 1);
    let mut enc = GifEncoder::new_with_speed(w, anim.speed);
    enc.set_repeat(Repeat::Infinite)
        .map_err(|e| SweepError::encode(format!("gif repeat: {e}")))?;
    for (idx, img) in anim.frames.iter().enumerate() {
        enc.encode_frame(Frame::from_parts(img.clone(), 0, 0, delay))
            .map_err(|e| SweepError::encode(format!("gif frame {idx}: {e}")))?;
    }
    Ok(())
}

/// Write `anim` to `path` as an animated GIF, creating parent directories.
pub fn export(anim: &Animation, path: impl AsRef<Path>) -> SweepResult<()> {
    let path = path.as_ref();
    crate::codec::image_io::ensure_parent_dir(path)?;
    let f = File::create(path)
        .map_err(|e| SweepError::encode(format!("create '{}': {e}", path.display())))?;
    let mut w = BufWriter::new(f);
    write_gif(anim, &mut w)?;
    w.flush()
        .map_err(|e| SweepError::encode(format!("flush '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), frames = anim.len(), "wrote animation");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
