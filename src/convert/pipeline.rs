use std::path::{Path, PathBuf};
use std::time::Instant;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::{
    codec::image_io::{StillFormat, decode, encode},
    convert::{
        options::ConvertOptions,
        registry::{ConvertOutput, Converter, ConverterRegistry},
    },
    encode::gif::export,
    foundation::error::{SweepError, SweepResult},
};

/// Decode `input`, run every selected converter, and write each result.
///
/// Returns the written paths in converter-selection order. Nothing is written for a converter
/// whose output already exists unless `opts.force` is set.
#[tracing::instrument(skip_all, fields(input = %input.as_ref().display()))]
pub fn convert(
    input: impl AsRef<Path>,
    opts: &ConvertOptions,
    registry: &ConverterRegistry,
) -> SweepResult<Vec<PathBuf>> {
    let input = input.as_ref();
    opts.validate()?;
    if StillFormat::from_path(input).is_none() {
        return Err(SweepError::validation(format!(
            "invalid input image type: {}",
            input.display()
        )));
    }

    let names = resolve_converters(opts, registry)?;
    let image = decode(input)?;

    let mut outputs = Vec::with_capacity(names.len());
    for name in names {
        let conv = registry
            .get(&name)
            .ok_or_else(|| SweepError::validation(format!("invalid converter string: {name}")))?;
        let output = opts
            .output_file
            .clone()
            .unwrap_or_else(|| make_output(conv, input, opts));
        convert_one(&image, input, &output, conv, opts)?;
        outputs.push(output);
    }
    Ok(outputs)
}

/// Expand `"all"`, drop `except`, and check the selection against the registry and options.
pub fn resolve_converters(
    opts: &ConvertOptions,
    registry: &ConverterRegistry,
) -> SweepResult<Vec<String>> {
    let selected: Vec<String> = if opts.converters.len() == 1 && opts.converters[0] == "all" {
        registry.names().into_iter().map(str::to_string).collect()
    } else {
        opts.converters.clone()
    };
    let names: Vec<String> = selected
        .into_iter()
        .filter(|n| !opts.except.contains(n))
        .collect();

    if names.is_empty() {
        return Err(SweepError::validation(
            "you must specify at least one converter",
        ));
    }
    if names.len() > 1 && opts.output_file.is_some() {
        return Err(SweepError::validation(
            "you cannot specify an output file with more than one converter",
        ));
    }
    if let Some(unknown) = names.iter().find(|n| registry.get(n).is_none()) {
        return Err(SweepError::validation(format!(
            "invalid converter string: {unknown}"
        )));
    }
    Ok(names)
}

/// Output path for `conv` applied to `input`: the converter's file name, placed in
/// `opts.output_dir` or next to the input.
pub fn make_output(conv: &dyn Converter, input: &Path, opts: &ConvertOptions) -> PathBuf {
    let dir = opts
        .output_dir
        .clone()
        .unwrap_or_else(|| input.parent().map(Path::to_path_buf).unwrap_or_default());
    dir.join(conv.output_file_name(input, opts))
}

fn convert_one(
    image: &RgbaImage,
    input: &Path,
    output: &Path,
    conv: &dyn Converter,
    opts: &ConvertOptions,
) -> SweepResult<()> {
    if !opts.force && output.exists() {
        return Err(SweepError::validation(format!(
            "{} exists. pass --force to write anyway",
            output.display()
        )));
    }

    let start = Instant::now();
    let mut result = conv.convert(image, opts)?;
    if let Some((w, h)) = opts.resize {
        result = resize_output(result, w, h)?;
    }
    write_output(output, &result)?;

    tracing::info!(
        "converted {} to {} in {:?}",
        input.display(),
        output.display(),
        start.elapsed()
    );
    Ok(())
}

/// Lanczos3-resample a converter result; animations are resized frame by frame.
fn resize_output(result: ConvertOutput, width: u32, height: u32) -> SweepResult<ConvertOutput> {
    let resize = |img: RgbaImage| imageops::resize(&img, width, height, FilterType::Lanczos3);
    Ok(match result {
        ConvertOutput::Image(img) => ConvertOutput::Image(resize(img)),
        ConvertOutput::Animation(anim) => ConvertOutput::Animation(anim.map_frames(resize)?),
    })
}

fn write_output(output: &Path, result: &ConvertOutput) -> SweepResult<()> {
    match result {
        ConvertOutput::Image(img) => encode(output, img),
        ConvertOutput::Animation(anim) => {
            let is_gif = output
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("gif"));
            if !is_gif {
                return Err(SweepError::encode(format!(
                    "animations must be written to a .gif file, got {}",
                    output.display()
                )));
            }
            export(anim, output)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/pipeline.rs"]
mod tests;
