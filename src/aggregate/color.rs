use image::{Rgba, RgbaImage};

use crate::foundation::error::{SweepError, SweepResult};

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Region {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// The whole image.
    pub fn full(image: &RgbaImage) -> Self {
        Self::new(0, 0, image.width(), image.height())
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    fn check(&self, image: &RgbaImage) -> SweepResult<()> {
        if self.pixel_count() == 0 {
            return Err(SweepError::degenerate_region(format!(
                "empty window x=[{},{}) y=[{},{})",
                self.x0, self.x1, self.y0, self.y1
            )));
        }
        if self.x1 > image.width() || self.y1 > image.height() {
            return Err(SweepError::degenerate_region(format!(
                "window x=[{},{}) y=[{},{}) exceeds {}x{} image",
                self.x0,
                self.x1,
                self.y0,
                self.y1,
                image.width(),
                image.height()
            )));
        }
        Ok(())
    }

    fn pixels<'a>(&self, image: &'a RgbaImage) -> impl Iterator<Item = &'a Rgba<u8>> + 'a {
        let Region { x0, y0, x1, y1 } = *self;
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| image.get_pixel(x, y)))
    }
}

/// How a window's pixels collapse into one representative color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregator {
    /// Per-channel arithmetic mean.
    Mean,
    /// Per-channel median (see [`median_of_sorted`] for the even-count rule).
    #[default]
    Median,
}

impl Aggregator {
    /// Representative color of `region` in `image`.
    ///
    /// Fails with [`SweepError::DegenerateRegion`] when the region holds no pixels or lies
    /// outside the image.
    pub fn aggregate(self, image: &RgbaImage, region: Region) -> SweepResult<Rgba<u8>> {
        region.check(image)?;
        Ok(match self {
            Self::Mean => mean_color(image, region),
            Self::Median => median_color(image, region),
        })
    }

    /// Lowercase name, as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
        }
    }
}

fn mean_color(image: &RgbaImage, region: Region) -> Rgba<u8> {
    let mut sum = [0u64; 4];
    for px in region.pixels(image) {
        for (s, c) in sum.iter_mut().zip(px.0) {
            *s += u64::from(c);
        }
    }
    let n = region.pixel_count();
    Rgba(sum.map(|s| (s / n) as u8))
}

fn median_color(image: &RgbaImage, region: Region) -> Rgba<u8> {
    let n = region.pixel_count() as usize;
    let mut channels: [Vec<u8>; 4] = std::array::from_fn(|_| Vec::with_capacity(n));
    for px in region.pixels(image) {
        for (ch, c) in channels.iter_mut().zip(px.0) {
            ch.push(c);
        }
    }
    Rgba(channels.map(|mut v| {
        v.sort_unstable();
        median_of_sorted(&v)
    }))
}

/// Median of an ascending, non-empty slice.
///
/// Odd counts take the middle element. Even counts with `m = len / 2` take `v[m]` when `m` is
/// even and the truncated average of `v[m - 1]` and `v[m]` when `m` is odd.
pub fn median_of_sorted(v: &[u8]) -> u8 {
    let m = v.len() / 2;
    if v.len() % 2 == 1 || m % 2 == 0 {
        v[m]
    } else {
        ((u16::from(v[m - 1]) + u16::from(v[m])) / 2) as u8
    }
}

#[cfg(test)]
#[path = "../../tests/unit/aggregate/color.rs"]
mod tests;
