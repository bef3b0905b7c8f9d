use image::RgbaImage;

use crate::{
    encode::gif::{Animation, assemble},
    foundation::error::{FailureRecord, SweepError, SweepResult},
    sweep::{
        collect::{FrameResult, ResultCollector, SweepOutcome},
        config::SweepConfig,
        pool::{CancelToken, WorkerPool},
        schedule::{Task, TaskQueue},
    },
    transform::block::BlockTransform,
};

/// Produces one frame per block size. Shared read-only by every worker.
pub trait FrameRenderer: Sync {
    /// Render the frame for `block_size`. `Ok(None)` means no image was produced and is
    /// recorded as [`SweepError::NilTransformResult`].
    fn render(&self, block_size: i64) -> SweepResult<Option<RgbaImage>>;
}

/// [`FrameRenderer`] applying a [`BlockTransform`] to a borrowed source image.
pub struct BlockRenderer<'a> {
    image: &'a RgbaImage,
    transform: BlockTransform,
}

impl<'a> BlockRenderer<'a> {
    pub fn new(image: &'a RgbaImage, transform: BlockTransform) -> Self {
        Self { image, transform }
    }
}

impl FrameRenderer for BlockRenderer<'_> {
    fn render(&self, block_size: i64) -> SweepResult<Option<RgbaImage>> {
        self.transform.apply(self.image, block_size).map(Some)
    }
}

/// One configured sweep: schedule, fan out, collect, order.
///
/// The worker pool is built per run and dropped when the run returns.
#[derive(Debug)]
pub struct SweepEngine {
    config: SweepConfig,
    cancel: CancelToken,
}

impl SweepEngine {
    /// Validate `config` and build an engine. Range errors surface here, before any work.
    pub fn new(config: SweepConfig) -> SweepResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: CancelToken::new(),
        })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Handle that cancels in-flight and future runs of this engine.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Sweep `image` with the configured block transform.
    pub fn run(&self, image: &RgbaImage) -> SweepResult<SweepOutcome> {
        self.run_with(&BlockRenderer::new(image, self.config.transform()))
    }

    /// Sweep with a caller-supplied renderer.
    ///
    /// `Err` is reserved for setup failures (bad worker count); per-task failures come back as
    /// [`SweepOutcome::Failure`].
    #[tracing::instrument(skip(self, renderer), fields(range = %self.config.range, workers = self.config.workers))]
    pub fn run_with<R: FrameRenderer + ?Sized>(&self, renderer: &R) -> SweepResult<SweepOutcome> {
        let range = &self.config.range;
        tracing::info!(
            "animate from {} to {} by {}",
            range.start(),
            range.end(),
            range.step()
        );

        let queue = TaskQueue::new(range);
        let collector = ResultCollector::new();
        let pool = WorkerPool::new(self.config.workers)?;
        pool.run_with_cancel(
            &queue,
            |task| render_task(renderer, task),
            &collector,
            &self.cancel,
        );

        let outcome = collector.finish(self.config.order());
        match &outcome {
            SweepOutcome::AllFrames(frames) => {
                tracing::info!(frames = frames.len(), "sweep finished")
            }
            SweepOutcome::Failure(f) => {
                tracing::warn!(failed = f.len(), "sweep failed")
            }
        }
        Ok(outcome)
    }

    /// Ordered frames, or the aggregate failure as an error.
    pub fn frames(&self, image: &RgbaImage) -> SweepResult<Vec<FrameResult>> {
        self.run(image)?.into_result()
    }

    /// Sweep `image` and assemble the ordered frames into an [`Animation`].
    pub fn animate(&self, image: &RgbaImage) -> SweepResult<Animation> {
        let frames = self.frames(image)?;
        tracing::info!("creating gif from {} images", frames.len());
        assemble(
            frames.into_iter().map(|f| f.image).collect(),
            self.config.frame_delay,
        )?
        .with_speed(self.config.gif_speed)
    }
}

fn render_task<R: FrameRenderer + ?Sized>(
    renderer: &R,
    task: Task,
) -> Result<FrameResult, FailureRecord> {
    let block_size = task.block_size;
    match renderer.render(block_size) {
        Ok(Some(image)) => Ok(FrameResult { image, block_size }),
        Ok(None) => Err(FailureRecord::new(
            block_size,
            SweepError::NilTransformResult { block_size },
        )),
        Err(cause) => Err(FailureRecord::new(block_size, cause)),
    }
}

/// Run a full sweep of `image` under `config`.
pub fn run_sweep(image: &RgbaImage, config: &SweepConfig) -> SweepResult<Vec<FrameResult>> {
    SweepEngine::new(config.clone())?.frames(image)
}

#[cfg(test)]
#[path = "../../tests/unit/sweep/engine.rs"]
mod tests;
