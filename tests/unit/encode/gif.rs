use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Rgba};

use super::*;

fn solid(w: u32, h: u32, v: u8) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([v, v, v, 255]))
}

#[test]
fn assemble_rejects_empty_and_mismatched_frames() {
    assert!(matches!(assemble(vec![], 10), Err(SweepError::Validation(_))));

    let err = assemble(vec![solid(4, 4, 0), solid(4, 5, 0)], 10).unwrap_err();
    assert!(err.to_string().contains("frame 1 is 4x5, expected 4x4"));
}

#[test]
fn assemble_keeps_order_and_delay() {
    let anim = assemble(vec![solid(2, 2, 1), solid(2, 2, 2)], 10).unwrap();
    assert_eq!(anim.len(), 2);
    assert_eq!(anim.delay_units(), 10);
    assert_eq!(anim.dimensions(), (2, 2));
    assert_eq!(anim.frames()[1].get_pixel(0, 0).0[0], 2);
}

#[test]
fn gif_bytes_decode_back_to_same_frame_count() {
    let anim = assemble(vec![solid(3, 2, 0), solid(3, 2, 128), solid(3, 2, 255)], 10).unwrap();
    let mut buf = Vec::new();
    write_gif(&anim, &mut buf).unwrap();
    assert!(buf.starts_with(b"GIF89a"));

    let frames = GifDecoder::new(Cursor::new(buf))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 3);
    for f in &frames {
        assert_eq!(f.buffer().dimensions(), (3, 2));
        let (num, den) = f.delay().numer_denom_ms();
        assert_eq!(num / den, 100);
    }
}

#[test]
fn speed_defaults_to_ten_and_is_range_checked() {
    let anim = assemble(vec![solid(2, 2, 0)], 10).unwrap();
    assert_eq!(anim.speed(), DEFAULT_GIF_SPEED);
    assert_eq!(anim.speed(), 10);

    for bad in [0, 31, -1] {
        assert!(matches!(
            anim.clone().with_speed(bad),
            Err(SweepError::Validation(_))
        ));
    }
    for ok in [1, 30] {
        let anim = anim.clone().with_speed(ok).unwrap();
        let mut buf = Vec::new();
        write_gif(&anim, &mut buf).unwrap();
        assert!(buf.starts_with(b"GIF89a"));
    }
}

#[test]
fn map_frames_keeps_delay_and_speed() {
    let anim = assemble(vec![solid(4, 4, 0), solid(4, 4, 9)], 7)
        .unwrap()
        .with_speed(20)
        .unwrap();
    let mapped = anim
        .map_frames(|f| image::imageops::crop_imm(&f, 0, 0, 2, 3).to_image())
        .unwrap();
    assert_eq!(mapped.dimensions(), (2, 3));
    assert_eq!(mapped.delay_units(), 7);
    assert_eq!(mapped.speed(), 20);
    assert_eq!(mapped.frames()[1].get_pixel(0, 0).0[0], 9);
}
