//! Named converters and the file-to-file convert pipeline.

pub mod converters;
pub mod options;
pub mod pipeline;
pub mod registry;
