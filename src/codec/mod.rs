//! Still-image decoding and encoding (PNG, JPEG).

pub mod image_io;
