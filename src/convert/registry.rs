use std::collections::BTreeMap;
use std::path::Path;

use image::RgbaImage;

use crate::{
    convert::{
        converters::{AnimateConverter, BlockConverter, PixelateConverter},
        options::ConvertOptions,
    },
    encode::gif::Animation,
    foundation::error::{SweepError, SweepResult},
};

/// What a converter produced.
#[derive(Clone, Debug, PartialEq)]
pub enum ConvertOutput {
    /// A single still image.
    Image(RgbaImage),
    /// An ordered animation.
    Animation(Animation),
}

/// A named image conversion.
pub trait Converter: Send + Sync {
    /// Registry key, e.g. `block_median`.
    fn name(&self) -> &str;

    /// Run the conversion on a decoded input image.
    fn convert(&self, image: &RgbaImage, opts: &ConvertOptions) -> SweepResult<ConvertOutput>;

    /// File name (no directory) for the output generated from `input`.
    fn output_file_name(&self, input: &Path, opts: &ConvertOptions) -> String;
}

/// Name-to-converter map, built once and passed to the convert pipeline.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: BTreeMap<String, Box<dyn Converter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in converter.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        let builtins: Vec<Box<dyn Converter>> = vec![
            Box::new(BlockConverter::block_mean()),
            Box::new(BlockConverter::block_median()),
            Box::new(BlockConverter::overlap_mean()),
            Box::new(BlockConverter::overlap_median()),
            Box::new(PixelateConverter::pixelated()),
            Box::new(PixelateConverter::websafe_pixelated()),
            Box::new(AnimateConverter),
        ];
        for c in builtins {
            let name = c.name().to_string();
            reg.converters.insert(name, c);
        }
        reg
    }

    /// Add a converter. Names must be unique.
    pub fn register(&mut self, converter: Box<dyn Converter>) -> SweepResult<()> {
        let name = converter.name().to_string();
        if self.converters.contains_key(&name) {
            return Err(SweepError::validation(format!(
                "converter '{name}' is already registered"
            )));
        }
        self.converters.insert(name, converter);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Converter> {
        self.converters.get(name).map(|c| c.as_ref())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.converters.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("converters", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/registry.rs"]
mod tests;
