//! The landing page as a plain state machine, independent of the renderer.
//!
//! A [`Stage`] owns the readiness flag, the particle field, the reveal gate and
//! the timeline that samples them. The view layer feeds it animation-frame
//! timestamps and paints whatever [`StageFrame`] comes back.

use crate::{
    motion::Pose,
    particles::{ParticleField, ParticleFrame, Viewport, ViewportError},
    reveal::{Block, RevealPhase, RevealSequence, STEPS},
};

/// Write-once "page has mounted" flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
    loaded: bool,
}

impl Readiness {
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Flips the flag. Returns `true` only for the call that flipped it.
    pub fn mark_loaded(&mut self) -> bool {
        if self.loaded {
            return false;
        }
        self.loaded = true;
        true
    }
}

/// Converts animation-frame timestamps (milliseconds, arbitrary origin) into
/// seconds since the first frame. Once cancelled it ignores every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timeline {
    origin_ms: Option<f64>,
    elapsed: f64,
    cancelled: bool,
}

impl Timeline {
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Advances to `timestamp_ms`. Returns the new elapsed time in seconds, or
    /// `None` if the timeline has been cancelled.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<f64> {
        if self.cancelled {
            return None;
        }
        let origin = *self.origin_ms.get_or_insert(timestamp_ms);
        // frame timestamps never run backwards, but clamp anyway
        self.elapsed = ((timestamp_ms - origin) / 1000.0).max(self.elapsed);
        Some(self.elapsed)
    }

    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("timeline cancelled at {:.3}s", self.elapsed);
            self.cancelled = true;
        }
    }
}

/// Everything the view needs to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StageFrame {
    pub elapsed: f64,
    pub phase: RevealPhase,
    pub particles: Vec<ParticleFrame>,
    poses: Vec<(Block, Pose)>,
}

impl StageFrame {
    pub fn pose(&self, block: Block) -> Pose {
        self.poses
            .iter()
            .find(|(b, _)| *b == block)
            .map(|(_, p)| *p)
            .unwrap_or(block.step().hidden)
    }
}

impl Default for StageFrame {
    /// The frame rendered before anything has mounted: no particles, every
    /// block hidden.
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            phase: RevealPhase::Hidden,
            particles: Vec::new(),
            poses: STEPS.iter().map(|s| (s.block, s.hidden)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Stage {
    readiness: Readiness,
    field: ParticleField,
    reveal: RevealSequence,
    timeline: Timeline,
}

impl Stage {
    pub fn new(viewport: Result<Viewport, ViewportError>, seed: u64) -> Self {
        Self {
            field: ParticleField::from_measurement(viewport, seed),
            ..Self::default()
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    pub fn is_unmounted(&self) -> bool {
        self.timeline.is_cancelled()
    }

    /// The one-shot mount step. Opens the reveal gate the first time; every
    /// later call, and any call after unmount, is a no-op.
    pub fn mount(&mut self) {
        if self.is_unmounted() {
            return;
        }
        if self.readiness.mark_loaded() {
            log::debug!("page ready");
            self.reveal.set_ready(true, self.timeline.elapsed());
        }
    }

    /// Closes the reveal gate without touching readiness. Blocks snap hidden
    /// and replay from the start if [`Stage::reopen`] is called.
    pub fn close(&mut self) {
        self.reveal.set_ready(false, self.timeline.elapsed());
    }

    pub fn reopen(&mut self) {
        if self.readiness.is_loaded() && !self.is_unmounted() {
            self.reveal.set_ready(true, self.timeline.elapsed());
        }
    }

    /// Cancels the timeline. No later tick produces a frame or changes state.
    pub fn unmount(&mut self) {
        self.timeline.cancel();
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> Option<StageFrame> {
        let now = self.timeline.tick(timestamp_ms)?;
        Some(StageFrame {
            elapsed: now,
            phase: self.reveal.phase(now),
            particles: self.field.frames(now),
            poses: self.reveal.poses(now),
        })
    }
}
