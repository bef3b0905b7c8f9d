//! Window color aggregation (mean / median) and palette snapping.

pub mod color;
pub mod palette;
