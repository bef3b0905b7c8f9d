use std::path::Path;

use anyhow::Context as _;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::foundation::error::{SweepError, SweepResult};

/// Still-image formats accepted for input and single-frame output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StillFormat {
    Png,
    Jpeg,
}

impl StillFormat {
    /// Format implied by the file extension (case-insensitive), if supported.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Decode a PNG or JPEG file into straight-alpha RGBA8.
pub fn decode(path: impl AsRef<Path>) -> SweepResult<RgbaImage> {
    let path = path.as_ref();
    let format = StillFormat::from_path(path).ok_or_else(|| {
        SweepError::decode(format!("invalid input image type: {}", path.display()))
    })?;
    let bytes = std::fs::read(path)
        .map_err(|e| SweepError::decode(format!("opening {}: {e}", path.display())))?;
    let img = image::load_from_memory_with_format(&bytes, format.image_format())
        .map_err(|e| SweepError::decode(format!("decoding {}: {e}", path.display())))?;
    Ok(img.to_rgba8())
}

/// Encode `img` to `path`, picking PNG or JPEG from the extension.
///
/// JPEG has no alpha channel; alpha is dropped.
pub fn encode(path: impl AsRef<Path>, img: &RgbaImage) -> SweepResult<()> {
    let path = path.as_ref();
    let format = StillFormat::from_path(path).ok_or_else(|| {
        SweepError::encode(format!("unknown output image format for {}", path.display()))
    })?;
    ensure_parent_dir(path)?;
    let result = match format {
        StillFormat::Png => img.save_with_format(path, ImageFormat::Png),
        StillFormat::Jpeg => DynamicImage::ImageRgba8(img.clone())
            .to_rgb8()
            .save_with_format(path, ImageFormat::Jpeg),
    };
    result.map_err(|e| SweepError::encode(format!("encoding {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "wrote image");
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> SweepResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/image_io.rs"]
mod tests;
