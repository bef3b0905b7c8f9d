//! blocksweep turns a still image into an animation of progressively coarser block-quantized
//! frames.
//!
//! # Pipeline overview
//!
//! 1. **Schedule**: `BlockSizeRange -> TaskQueue` (one task per block size)
//! 2. **Transform** (parallel): each worker applies [`BlockTransform`] at its block size
//! 3. **Collect**: outcomes fan in to a [`ResultCollector`]; any failure fails the sweep
//! 4. **Order**: frames are sorted by block size (ascending, or descending when reversed)
//! 5. **Assemble**: ordered frames become an [`Animation`], exported as a looping GIF
//!
//! [`convert()`] wraps the engine in a file-to-file pipeline driven by a [`ConverterRegistry`].
#![forbid(unsafe_code)]

mod aggregate;
mod codec;
mod convert;
mod encode;
mod foundation;
mod sweep;
mod transform;

pub use aggregate::color::{Aggregator, Region, median_of_sorted};
pub use aggregate::palette::{WEBSAFE_LEN, nearest_websafe, quantize_websafe, websafe_palette};
pub use codec::image_io::{StillFormat, decode, encode, ensure_parent_dir};
pub use convert::converters::{AnimateConverter, BlockConverter, PixelateConverter};
pub use convert::options::{ConvertOptions, DEFAULT_BLOCK_SIZE};
pub use convert::pipeline::{convert, make_output, resolve_converters};
pub use convert::registry::{ConvertOutput, Converter, ConverterRegistry};
pub use encode::gif::{
    Animation, DEFAULT_FRAME_DELAY, DEFAULT_GIF_SPEED, assemble, export, write_gif,
};
pub use foundation::error::{FailureRecord, SweepError, SweepFailure, SweepResult};
pub use sweep::collect::{FrameOrder, FrameResult, ResultCollector, SweepOutcome, sort_frames};
pub use sweep::config::SweepConfig;
pub use sweep::engine::{BlockRenderer, FrameRenderer, SweepEngine, run_sweep};
pub use sweep::pool::{CancelToken, DEFAULT_WORKERS, WorkerPool};
pub use sweep::schedule::{BlockSizeRange, MAX_SWEEP_LEN, Task, TaskQueue, generate};
pub use transform::block::{BlockTransform, JITTER_BOUND, Jitter, block_transform};
pub use transform::pixelate::{
    DEFAULT_PIXELATE_BLOCK_SIZE, PIXELATE_CANVAS, pixelate, pixelate_on_canvas,
};
