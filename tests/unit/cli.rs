use super::*;

fn parse(args: &[&str]) -> ConvertArgs {
    let cli = Cli::try_parse_from(
        ["blocksweep", "convert", "--input", "in.png"]
            .iter()
            .chain(args),
    )
    .unwrap();
    match cli.cmd {
        Command::Convert(args) => args,
        Command::List => panic!("expected convert"),
    }
}

fn temp_config(name: &str, json: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("blocksweep_cli_{name}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sweep.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn reverse_flag_forms() {
    assert_eq!(parse(&[]).animate_reverse, None);
    assert_eq!(parse(&["--animate-reverse"]).animate_reverse, Some(true));
    assert_eq!(parse(&["--animate-reverse=false"]).animate_reverse, Some(false));
}

#[test]
fn reverse_false_overrides_config_file() {
    let path = temp_config("reverse", r#"{ "reverse": true, "workers": 3 }"#);
    let cfg_arg = path.to_string_lossy().to_string();

    let from_file = sweep_config(&parse(&["--config", cfg_arg.as_str()])).unwrap();
    assert!(from_file.reverse);
    assert_eq!(from_file.workers, 3);

    let overridden = sweep_config(&parse(&[
        "--config",
        cfg_arg.as_str(),
        "--animate-reverse=false",
    ]))
    .unwrap();
    assert!(!overridden.reverse);
    assert_eq!(overridden.workers, 3);
}

#[test]
fn animate_flags_override_range_and_speed() {
    let cfg = sweep_config(&parse(&[
        "--animate-block-size-start",
        "2",
        "--animate-block-size-end",
        "9",
        "--animate-block-size-step",
        "3",
        "--animate-threads",
        "4",
        "--gif-speed",
        "25",
    ]))
    .unwrap();
    assert_eq!(cfg.range.block_sizes(), vec![2, 5, 8]);
    assert_eq!(cfg.workers, 4);
    assert_eq!(cfg.gif_speed, 25);
}

#[test]
fn resize_needs_both_dimensions() {
    let opts = convert_options(parse(&["--resize-width", "64", "--resize-height", "32"])).unwrap();
    assert_eq!(opts.resize, Some((64, 32)));
    assert_eq!(opts.pixelate_block_size, 16);

    assert!(convert_options(parse(&["--resize-width", "64"])).is_err());
    assert!(convert_options(parse(&[])).unwrap().resize.is_none());
}
