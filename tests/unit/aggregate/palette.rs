use super::*;

#[test]
fn palette_has_named_colors_then_cube() {
    let all: Vec<[u8; 3]> = websafe_palette().collect();
    assert_eq!(all.len(), WEBSAFE_LEN);
    assert_eq!(all.len(), 43);
    assert_eq!(all[0], [0xFF, 0xFF, 0xFF]);
    assert_eq!(all[16], [0x20, 0x20, 0x20]);
    assert_eq!(all[17], [0x20, 0x20, 0x60]);
    assert_eq!(all[42], [0xA0, 0xA0, 0xA0]);
}

#[test]
fn palette_colors_map_to_themselves() {
    for c in websafe_palette() {
        assert_eq!(nearest_websafe(Rgba([c[0], c[1], c[2], 255])).0, [c[0], c[1], c[2], 255]);
    }
}

#[test]
fn off_palette_colors_snap_to_closest_and_become_opaque() {
    assert_eq!(nearest_websafe(Rgba([250, 5, 3, 40])), Rgba([0xFF, 0, 0, 255]));
    assert_eq!(nearest_websafe(Rgba([0x22, 0x5E, 0x9F, 255])), Rgba([0x20, 0x60, 0xA0, 255]));
    assert_eq!(nearest_websafe(Rgba([10, 10, 10, 255])), Rgba([0, 0, 0, 255]));
}

#[test]
fn quantize_rewrites_every_pixel() {
    let mut img = RgbaImage::from_fn(5, 3, |x, y| Rgba([(x * 50) as u8, (y * 90) as u8, 17, 200]));
    quantize_websafe(&mut img);
    let palette: Vec<[u8; 3]> = websafe_palette().collect();
    assert!(
        img.pixels()
            .all(|p| p.0[3] == 255 && palette.contains(&[p.0[0], p.0[1], p.0[2]]))
    );
}
