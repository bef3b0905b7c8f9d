use std::path::Path;

use image::RgbaImage;

use crate::{
    aggregate::color::Aggregator,
    convert::{
        options::ConvertOptions,
        registry::{ConvertOutput, Converter},
    },
    foundation::error::SweepResult,
    sweep::engine::SweepEngine,
    transform::{
        block::{BlockTransform, Jitter},
        pixelate::pixelate_on_canvas,
    },
};

/// Single-image block quantization at [`ConvertOptions::block_size`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockConverter {
    name: &'static str,
    aggregator: Aggregator,
    jitter: bool,
}

impl BlockConverter {
    pub fn block_mean() -> Self {
        Self {
            name: "block_mean",
            aggregator: Aggregator::Mean,
            jitter: false,
        }
    }

    pub fn block_median() -> Self {
        Self {
            name: "block_median",
            aggregator: Aggregator::Median,
            jitter: false,
        }
    }

    /// Mean blocks with jittered texture.
    pub fn overlap_mean() -> Self {
        Self {
            name: "overlap_mean",
            aggregator: Aggregator::Mean,
            jitter: true,
        }
    }

    /// Median blocks with jittered texture.
    pub fn overlap_median() -> Self {
        Self {
            name: "overlap_median",
            aggregator: Aggregator::Median,
            jitter: true,
        }
    }
}

impl Converter for BlockConverter {
    fn name(&self) -> &str {
        self.name
    }

    fn convert(&self, image: &RgbaImage, opts: &ConvertOptions) -> SweepResult<ConvertOutput> {
        let transform = BlockTransform::new(
            self.aggregator,
            Jitter::from_flag(self.jitter, opts.sweep.seed),
        );
        transform
            .apply(image, opts.effective_block_size())
            .map(ConvertOutput::Image)
    }

    fn output_file_name(&self, input: &Path, opts: &ConvertOptions) -> String {
        let (stem, ext) = stem_and_ext(input);
        format!(
            "{stem}-{}-{:04}{ext}",
            self.name,
            opts.effective_block_size()
        )
    }
}

/// Canvas mosaic at [`ConvertOptions::pixelate_block_size`], optionally snapped to the
/// web-safe palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelateConverter {
    name: &'static str,
    websafe: bool,
}

impl PixelateConverter {
    pub fn pixelated() -> Self {
        Self {
            name: "pixelated",
            websafe: false,
        }
    }

    pub fn websafe_pixelated() -> Self {
        Self {
            name: "websafe_pixelated",
            websafe: true,
        }
    }
}

impl Converter for PixelateConverter {
    fn name(&self) -> &str {
        self.name
    }

    fn convert(&self, image: &RgbaImage, opts: &ConvertOptions) -> SweepResult<ConvertOutput> {
        pixelate_on_canvas(image, opts.effective_pixelate_block_size(), self.websafe)
            .map(ConvertOutput::Image)
    }

    fn output_file_name(&self, input: &Path, _opts: &ConvertOptions) -> String {
        let (stem, ext) = stem_and_ext(input);
        format!("{stem}-{}{ext}", self.name)
    }
}

/// Sweeps the configured block-size range and emits an animated GIF.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimateConverter;

impl Converter for AnimateConverter {
    fn name(&self) -> &str {
        "animate_block"
    }

    fn convert(&self, image: &RgbaImage, opts: &ConvertOptions) -> SweepResult<ConvertOutput> {
        let engine = SweepEngine::new(opts.sweep.clone())?;
        engine.animate(image).map(ConvertOutput::Animation)
    }

    fn output_file_name(&self, input: &Path, opts: &ConvertOptions) -> String {
        let (stem, _) = stem_and_ext(input);
        let r = &opts.sweep.range;
        format!(
            "{stem}-{}-from_{}-to_{}-by_{}.gif",
            self.name(),
            r.start(),
            r.end(),
            r.step()
        )
    }
}

/// File stem and extension (with its leading dot, or empty).
fn stem_and_ext(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}

#[cfg(test)]
#[path = "../../tests/unit/convert/converters.rs"]
mod tests;
