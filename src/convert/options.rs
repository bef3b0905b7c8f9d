use std::path::PathBuf;

use crate::{
    foundation::error::{SweepError, SweepResult},
    sweep::config::SweepConfig,
    transform::pixelate::DEFAULT_PIXELATE_BLOCK_SIZE,
};

/// Block size used by single-image converters when none is given.
pub const DEFAULT_BLOCK_SIZE: i64 = 10;

/// Options for one [`convert`](crate::convert()) call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Converter names to run; `["all"]` selects every registered converter.
    pub converters: Vec<String>,
    /// Names removed from the selection (mainly useful with `"all"`).
    pub except: Vec<String>,
    /// Block size for single-image converters; `0` means [`DEFAULT_BLOCK_SIZE`].
    pub block_size: i64,
    /// Mosaic tile size for the pixelate converters; `0` means the default of 16.
    pub pixelate_block_size: u32,
    /// Resample every output to `(width, height)` with Lanczos3.
    pub resize: Option<(u32, u32)>,
    /// Directory for generated outputs; defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
    /// Exact output path; only valid with a single converter.
    pub output_file: Option<PathBuf>,
    /// Overwrite existing outputs.
    pub force: bool,
    /// Settings for the `animate_block` converter.
    pub sweep: SweepConfig,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            converters: vec!["block_median".to_string()],
            except: Vec::new(),
            block_size: DEFAULT_BLOCK_SIZE,
            pixelate_block_size: DEFAULT_PIXELATE_BLOCK_SIZE,
            resize: None,
            output_dir: None,
            output_file: None,
            force: false,
            sweep: SweepConfig::default(),
        }
    }
}

impl ConvertOptions {
    /// Block size single-image converters should use.
    pub fn effective_block_size(&self) -> i64 {
        if self.block_size == 0 {
            DEFAULT_BLOCK_SIZE
        } else {
            self.block_size
        }
    }

    /// Tile size the pixelate converters should use.
    pub fn effective_pixelate_block_size(&self) -> u32 {
        if self.pixelate_block_size == 0 {
            DEFAULT_PIXELATE_BLOCK_SIZE
        } else {
            self.pixelate_block_size
        }
    }

    pub fn validate(&self) -> SweepResult<()> {
        if self.block_size < 0 {
            return Err(SweepError::validation(format!(
                "block size must be >= 0, got {}",
                self.block_size
            )));
        }
        if let Some((w, h)) = self.resize
            && (w == 0 || h == 0)
        {
            return Err(SweepError::validation(format!(
                "resize dimensions must be > 0, got {w}x{h}"
            )));
        }
        self.sweep.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/options.rs"]
mod tests;
