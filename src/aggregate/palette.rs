use image::{Rgba, RgbaImage};

/// The sixteen named VGA colors.
const NAMED: [[u8; 3]; 16] = [
    [0xFF, 0xFF, 0xFF],
    [0xC0, 0xC0, 0xC0],
    [0x80, 0x80, 0x80],
    [0x00, 0x00, 0x00],
    [0xFF, 0x00, 0x00],
    [0x80, 0x00, 0x00],
    [0xFF, 0xFF, 0x00],
    [0x80, 0x80, 0x00],
    [0x00, 0xFF, 0x00],
    [0x00, 0x80, 0x00],
    [0x00, 0xFF, 0xFF],
    [0x00, 0x80, 0x80],
    [0x00, 0x00, 0xFF],
    [0x00, 0x00, 0x80],
    [0xFF, 0x00, 0xFF],
    [0x80, 0x00, 0x80],
];

/// Per-channel levels of the 3x3x3 cube appended after the named colors.
const CUBE_LEVELS: [u8; 3] = [0x20, 0x60, 0xA0];

/// Number of entries in [`websafe_palette`].
pub const WEBSAFE_LEN: usize = NAMED.len() + CUBE_LEVELS.len().pow(3);

/// Palette entries in lookup order: named colors, then the cube in r, g, b nesting.
pub fn websafe_palette() -> impl Iterator<Item = [u8; 3]> {
    let cube = CUBE_LEVELS.into_iter().flat_map(|r| {
        CUBE_LEVELS
            .into_iter()
            .flat_map(move |g| CUBE_LEVELS.into_iter().map(move |b| [r, g, b]))
    });
    NAMED.into_iter().chain(cube)
}

/// Closest palette entry by squared RGB distance; ties go to the earlier entry.
/// The result is opaque.
pub fn nearest_websafe(c: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, _] = c.0;
    let dist = |p: &[u8; 3]| {
        [(r, p[0]), (g, p[1]), (b, p[2])]
            .into_iter()
            .map(|(x, y)| (i32::from(x) - i32::from(y)).pow(2))
            .sum::<i32>()
    };
    let best = websafe_palette().min_by_key(dist).unwrap_or([0, 0, 0]);
    Rgba([best[0], best[1], best[2], 255])
}

/// Snap every pixel of `image` to [`nearest_websafe`].
pub fn quantize_websafe(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        *px = nearest_websafe(*px);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/aggregate/palette.rs"]
mod tests;
