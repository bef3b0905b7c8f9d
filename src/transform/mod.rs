//! Whole-image transforms built on [`crate::aggregate`].

pub mod block;
pub mod pixelate;
