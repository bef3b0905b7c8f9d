use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::{
    aggregate::{
        color::{Aggregator, Region},
        palette::quantize_websafe,
    },
    foundation::error::{SweepError, SweepResult},
    transform::block::fill,
};

/// Side of the square canvas mosaics are computed on.
pub const PIXELATE_CANVAS: u32 = 1280;

/// Default mosaic tile size, in canvas pixels.
pub const DEFAULT_PIXELATE_BLOCK_SIZE: u32 = 16;

/// Non-overlapping mosaic: `block_size` tiles from the top-left corner, each filled with its
/// mean color. Edge tiles are clipped to the image.
pub fn pixelate(image: &RgbaImage, block_size: u32) -> SweepResult<RgbaImage> {
    if block_size == 0 {
        return Err(SweepError::degenerate_region("pixelate block size must be > 0"));
    }
    let (w, h) = image.dimensions();
    let mut out = RgbaImage::new(w, h);
    for y in (0..h).step_by(block_size as usize) {
        for x in (0..w).step_by(block_size as usize) {
            let tile = Region::new(
                x,
                y,
                x.saturating_add(block_size).min(w),
                y.saturating_add(block_size).min(h),
            );
            let color = Aggregator::Mean.aggregate(image, tile)?;
            fill(&mut out, tile, color);
        }
    }
    Ok(out)
}

/// Mosaic `image` on a [`PIXELATE_CANVAS`]-square canvas and scale it back to the source size.
///
/// The canvas is a Lanczos3 resample, so tile size is relative to the image rather than to
/// its pixel count. With `websafe`, tiles are snapped to the web-safe palette before scaling
/// back. Scaling back uses nearest-neighbor so tile edges stay hard.
pub fn pixelate_on_canvas(
    image: &RgbaImage,
    block_size: u32,
    websafe: bool,
) -> SweepResult<RgbaImage> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Err(SweepError::degenerate_region(format!(
            "cannot pixelate a {w}x{h} image"
        )));
    }
    let canvas = imageops::resize(image, PIXELATE_CANVAS, PIXELATE_CANVAS, FilterType::Lanczos3);
    let mut mosaic = pixelate(&canvas, block_size)?;
    if websafe {
        quantize_websafe(&mut mosaic);
    }
    Ok(imageops::resize(&mosaic, w, h, FilterType::Nearest))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/pixelate.rs"]
mod tests;
