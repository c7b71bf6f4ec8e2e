//! Staggered entrance of the page content.
//!
//! All blocks share one gate. Once it opens each block runs its own timer,
//! so the stagger is a set of independent delays rather than a chain. Poses
//! are computed from the time since the gate opened and nothing else, which
//! keeps a close-then-reopen cycle from accumulating drift.

use crate::motion::{Easing, Pose, Transition};

/// How far below its resting place a sliding block starts, in pixels.
pub const SLIDE_OFFSET: f64 = 20.0;
pub const BLOCK_SECONDS: f64 = 0.8;
pub const CONTAINER_SECONDS: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    /// Wrapper around every other block; a plain fade with no delay.
    Container,
    Avatar,
    /// Name, greeting and bio.
    Heading,
    Skills,
    /// Social links and the resume download.
    Links,
}

impl Block {
    /// The content blocks in stagger order.
    pub const STAGGERED: [Block; 4] = [Block::Avatar, Block::Heading, Block::Skills, Block::Links];

    pub fn step(self) -> &'static RevealStep {
        match self {
            Block::Container => &STEPS[0],
            Block::Avatar => &STEPS[1],
            Block::Heading => &STEPS[2],
            Block::Skills => &STEPS[3],
            Block::Links => &STEPS[4],
        }
    }
}

/// Entrance choreography of one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStep {
    pub block: Block,
    pub transition: Transition,
    pub hidden: Pose,
}

impl RevealStep {
    pub fn visible(&self) -> Pose {
        Pose::REST
    }

    /// Pose at `elapsed` seconds after the gate opened.
    pub fn pose_at(&self, elapsed: f64) -> Pose {
        match self.transition.progress(elapsed) {
            None => self.hidden,
            Some(_) if self.transition.is_settled(elapsed) => self.visible(),
            Some(t) => Pose::lerp(self.hidden, self.visible(), t),
        }
    }
}

pub static STEPS: [RevealStep; 5] = [
    RevealStep {
        block: Block::Container,
        transition: Transition::new(0.0, CONTAINER_SECONDS, Easing::EaseInOut),
        hidden: Pose::faded(),
    },
    RevealStep {
        block: Block::Avatar,
        transition: Transition::new(0.2, BLOCK_SECONDS, Easing::Spring),
        hidden: Pose::collapsed(),
    },
    RevealStep {
        block: Block::Heading,
        transition: Transition::new(0.4, BLOCK_SECONDS, Easing::EaseInOut),
        hidden: Pose::lowered(SLIDE_OFFSET),
    },
    RevealStep {
        block: Block::Skills,
        transition: Transition::new(0.6, BLOCK_SECONDS, Easing::EaseInOut),
        hidden: Pose::lowered(SLIDE_OFFSET),
    },
    RevealStep {
        block: Block::Links,
        transition: Transition::new(0.8, BLOCK_SECONDS, Easing::EaseInOut),
        hidden: Pose::lowered(SLIDE_OFFSET),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Hidden,
    Revealing,
    Revealed,
}

/// The gate plus the instant it opened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevealSequence {
    opened_at: Option<f64>,
}

impl RevealSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.opened_at.is_some()
    }

    /// Opens or closes the gate at `now`.
    ///
    /// Re-opening an already open gate keeps the running timers. Closing it
    /// drops them and every block snaps to its hidden pose, whatever it was
    /// doing.
    pub fn set_ready(&mut self, ready: bool, now: f64) {
        match (ready, self.opened_at) {
            (true, None) => {
                log::debug!("reveal gate opened at {now:.3}s");
                self.opened_at = Some(now);
            }
            (false, Some(_)) => {
                log::debug!("reveal gate closed at {now:.3}s");
                self.opened_at = None;
            }
            _ => {}
        }
    }

    /// When `block` starts moving, if the gate is open.
    pub fn starts_at(&self, block: Block) -> Option<f64> {
        self.opened_at
            .map(|t0| t0 + block.step().transition.starts_at())
    }

    /// When every block has settled, if the gate is open.
    pub fn settles_at(&self) -> Option<f64> {
        let last = STEPS
            .iter()
            .map(|s| s.transition.ends_at())
            .fold(0.0, f64::max);
        self.opened_at.map(|t0| t0 + last)
    }

    pub fn phase(&self, now: f64) -> RevealPhase {
        match self.opened_at {
            None => RevealPhase::Hidden,
            Some(t0) => {
                let elapsed = now - t0;
                if STEPS.iter().all(|s| s.transition.is_settled(elapsed)) {
                    RevealPhase::Revealed
                } else {
                    RevealPhase::Revealing
                }
            }
        }
    }

    pub fn pose(&self, block: Block, now: f64) -> Pose {
        let step = block.step();
        match self.opened_at {
            None => step.hidden,
            Some(t0) => step.pose_at(now - t0),
        }
    }

    pub fn is_revealed(&self, block: Block, now: f64) -> bool {
        self.pose(block, now) == Pose::REST
            && self
                .opened_at
                .is_some_and(|t0| block.step().transition.is_settled(now - t0))
    }

    pub fn poses(&self, now: f64) -> Vec<(Block, Pose)> {
        STEPS
            .iter()
            .map(|s| (s.block, self.pose(s.block, now)))
            .collect()
    }
}
