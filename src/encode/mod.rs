//! Animation assembly and GIF output.

pub mod gif;
