use super::*;
use crate::convert::converters::BlockConverter;

fn opts(converters: &[&str]) -> ConvertOptions {
    ConvertOptions {
        converters: converters.iter().map(|s| s.to_string()).collect(),
        ..ConvertOptions::default()
    }
}

#[test]
fn make_output_places_file_next_to_input() {
    let conv = BlockConverter::block_mean();
    for (input, want) in [
        ("foo.png", "foo-block_mean-0010.png"),
        ("path/foo.png", "path/foo-block_mean-0010.png"),
        ("path/to/the/foo.png", "path/to/the/foo-block_mean-0010.png"),
    ] {
        let got = make_output(&conv, Path::new(input), &ConvertOptions::default());
        assert_eq!(got, PathBuf::from(want), "{input}");
    }
}

#[test]
fn make_output_honors_output_dir() {
    let conv = BlockConverter::block_mean();
    let o = ConvertOptions {
        output_dir: Some(PathBuf::from("out")),
        ..ConvertOptions::default()
    };
    assert_eq!(
        make_output(&conv, Path::new("path/foo.png"), &o),
        PathBuf::from("out/foo-block_mean-0010.png")
    );
}

#[test]
fn all_expands_to_registry_minus_except() {
    let reg = ConverterRegistry::with_builtins();
    let o = ConvertOptions {
        except: vec!["animate_block".to_string(), "overlap_mean".to_string()],
        ..opts(&["all"])
    };
    assert_eq!(
        resolve_converters(&o, &reg).unwrap(),
        vec![
            "block_mean",
            "block_median",
            "overlap_median",
            "pixelated",
            "websafe_pixelated"
        ]
    );
}

#[test]
fn selection_errors_are_reported() {
    let reg = ConverterRegistry::with_builtins();

    let empty = ConvertOptions {
        except: vec!["block_mean".to_string()],
        ..opts(&["block_mean"])
    };
    assert!(
        resolve_converters(&empty, &reg)
            .unwrap_err()
            .to_string()
            .contains("at least one converter")
    );

    let two_with_file = ConvertOptions {
        output_file: Some(PathBuf::from("x.png")),
        ..opts(&["block_mean", "block_median"])
    };
    assert!(resolve_converters(&two_with_file, &reg).is_err());

    let unknown = opts(&["eightbit"]);
    assert!(
        resolve_converters(&unknown, &reg)
            .unwrap_err()
            .to_string()
            .contains("invalid converter string: eightbit")
    );
}

#[test]
fn convert_rejects_unsupported_input_extension() {
    let reg = ConverterRegistry::with_builtins();
    let err = convert("input.bmp", &ConvertOptions::default(), &reg).unwrap_err();
    assert!(err.to_string().contains("invalid input image type"));
}

#[test]
fn animations_require_gif_output() {
    let anim = crate::encode::gif::assemble(vec![RgbaImage::new(1, 1)], 10).unwrap();
    let err = write_output(Path::new("out.png"), &ConvertOutput::Animation(anim)).unwrap_err();
    assert!(matches!(err, SweepError::Encode(_)));
}

#[test]
fn resize_applies_to_images_and_every_animation_frame() {
    let still = resize_output(ConvertOutput::Image(RgbaImage::new(8, 4)), 3, 5).unwrap();
    match still {
        ConvertOutput::Image(img) => assert_eq!(img.dimensions(), (3, 5)),
        ConvertOutput::Animation(_) => panic!("expected image"),
    }

    let anim = crate::encode::gif::assemble(vec![RgbaImage::new(8, 4), RgbaImage::new(8, 4)], 10)
        .unwrap();
    match resize_output(ConvertOutput::Animation(anim), 6, 2).unwrap() {
        ConvertOutput::Animation(a) => {
            assert_eq!(a.len(), 2);
            assert!(a.frames().iter().all(|f| f.dimensions() == (6, 2)));
        }
        ConvertOutput::Image(_) => panic!("expected animation"),
    }
}

#[test]
fn zero_resize_is_rejected_before_decoding() {
    let reg = ConverterRegistry::with_builtins();
    let o = ConvertOptions {
        resize: Some((0, 10)),
        ..ConvertOptions::default()
    };
    let err = convert("input.png", &o, &reg).unwrap_err();
    assert!(err.to_string().contains("resize dimensions"));
}
