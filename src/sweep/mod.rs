//! Block-size sweep engine.
//!
//! A sweep renders one frame per block size of a [`BlockSizeRange`](schedule::BlockSizeRange):
//! the schedule becomes a shared [`TaskQueue`](schedule::TaskQueue), a fixed-size
//! [`WorkerPool`](pool::WorkerPool) drains it, every outcome lands in a
//! [`ResultCollector`](collect::ResultCollector), and the collector either returns all frames
//! sorted by block size or the aggregate of every failure.

pub mod collect;
pub mod config;
pub mod engine;
pub mod pool;
pub mod schedule;
