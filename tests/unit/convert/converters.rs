use image::Rgba;

use super::*;
use crate::sweep::schedule::BlockSizeRange;

fn opts_with_block_size(block_size: i64) -> ConvertOptions {
    ConvertOptions {
        block_size,
        ..ConvertOptions::default()
    }
}

#[test]
fn block_output_names_pad_block_size_and_keep_extension() {
    let conv = BlockConverter::block_median();
    let opts = opts_with_block_size(7);
    assert_eq!(
        conv.output_file_name(Path::new("foo.png"), &opts),
        "foo-block_median-0007.png"
    );
    assert_eq!(
        conv.output_file_name(Path::new("path/to/bar.JPG"), &opts),
        "bar-block_median-0007.JPG"
    );
}

#[test]
fn zero_block_size_falls_back_to_default() {
    let conv = BlockConverter::overlap_mean();
    assert_eq!(
        conv.output_file_name(Path::new("x.png"), &opts_with_block_size(0)),
        "x-overlap_mean-0010.png"
    );
}

#[test]
fn animate_output_name_encodes_range() {
    let opts = ConvertOptions {
        sweep: crate::sweep::config::SweepConfig::with_range(
            BlockSizeRange::new(1, 150, 1).unwrap(),
        ),
        ..ConvertOptions::default()
    };
    assert_eq!(
        AnimateConverter.output_file_name(Path::new("dir/cat.jpeg"), &opts),
        "cat-animate_block-from_1-to_150-by_1.gif"
    );
}

#[test]
fn block_converters_keep_dimensions() {
    let img = RgbaImage::from_fn(9, 5, |x, y| Rgba([x as u8 * 20, y as u8 * 40, 0, 255]));
    let opts = opts_with_block_size(2);
    for conv in [
        BlockConverter::block_mean(),
        BlockConverter::block_median(),
        BlockConverter::overlap_mean(),
        BlockConverter::overlap_median(),
    ] {
        match conv.convert(&img, &opts).unwrap() {
            ConvertOutput::Image(out) => assert_eq!(out.dimensions(), (9, 5), "{}", conv.name()),
            ConvertOutput::Animation(_) => panic!("unexpected animation"),
        }
    }
}

#[test]
fn animate_converter_produces_one_frame_per_block_size() {
    let img = RgbaImage::from_pixel(6, 6, Rgba([1, 2, 3, 255]));
    let opts = ConvertOptions {
        sweep: crate::sweep::config::SweepConfig {
            workers: 2,
            ..crate::sweep::config::SweepConfig::with_range(
                BlockSizeRange::new(1, 4, 1).unwrap(),
            )
        },
        ..ConvertOptions::default()
    };
    match AnimateConverter.convert(&img, &opts).unwrap() {
        ConvertOutput::Animation(anim) => assert_eq!(anim.len(), 4),
        ConvertOutput::Image(_) => panic!("expected animation"),
    }
}

#[test]
fn pixelate_output_names_carry_no_block_size() {
    let opts = ConvertOptions::default();
    assert_eq!(
        PixelateConverter::pixelated().output_file_name(Path::new("a/b/cat.png"), &opts),
        "cat-pixelated.png"
    );
    assert_eq!(
        PixelateConverter::websafe_pixelated().output_file_name(Path::new("dog.jpg"), &opts),
        "dog-websafe_pixelated.jpg"
    );
}

#[test]
fn pixelate_converters_keep_source_dimensions() {
    let img = RgbaImage::from_fn(30, 12, |x, y| Rgba([x as u8 * 8, y as u8 * 20, 60, 255]));
    let opts = ConvertOptions {
        pixelate_block_size: 128,
        ..ConvertOptions::default()
    };
    for conv in [
        PixelateConverter::pixelated(),
        PixelateConverter::websafe_pixelated(),
    ] {
        match conv.convert(&img, &opts).unwrap() {
            ConvertOutput::Image(out) => assert_eq!(out.dimensions(), (30, 12), "{}", conv.name()),
            ConvertOutput::Animation(_) => panic!("unexpected animation"),
        }
    }
}
