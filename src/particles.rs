//! Decorative background particles.
//!
//! The field is sampled once from the viewport measured at mount. Each particle
//! then loops forever on its own clock: drift to a fresh vertical target while
//! fading out, pick a new target and duration, repeat. Every random draw comes
//! from a seeded [`fastrand::Rng`] so a seed fully determines the motion.

use std::ops::{Range, RangeInclusive};

use fastrand::Rng;
use thiserror::Error;

use crate::motion::Easing;

pub const PARTICLE_COUNT: usize = 20;
pub const INITIAL_OPACITY: RangeInclusive<f64> = 0.3..=0.8;
pub const CYCLE_SECONDS: Range<f64> = 5.0..15.0;
/// Every cycle fades the particle out completely.
pub const TARGET_OPACITY: f64 = 0.0;
const CYCLE_EASING: Easing = Easing::EaseInOut;
/// Spreads cycle indices across the seed space before they are mixed into a
/// particle's seed.
const CYCLE_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewportError {
    #[error("viewport dimensions are unavailable")]
    Unavailable,
    #[error("viewport has no drawable area ({width}x{height})")]
    Empty { width: f64, height: f64 },
}

/// Pixel dimensions of the visible area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self, ViewportError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(width) && usable(height) {
            Ok(Self { width, height })
        } else {
            Err(ViewportError::Empty { width, height })
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Uniform sample from the half-open `range`.
fn uniform(rng: &mut Rng, range: Range<f64>) -> f64 {
    let v = range.start + rng.f64() * (range.end - range.start);
    // rounding can land on the excluded upper bound
    if v < range.end {
        v
    } else {
        range.start
    }
}

fn uniform_inclusive(rng: &mut Rng, range: RangeInclusive<f64>) -> f64 {
    let (lo, hi) = range.into_inner();
    (lo + rng.f64() * (hi - lo)).clamp(lo, hi)
}

/// Position and opacity of one particle at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

impl ParticleFrame {
    pub fn css(&self) -> String {
        format!(
            "opacity: {:.4}; transform: translate({:.2}px, {:.2}px);",
            self.opacity, self.x, self.y
        )
    }
}

/// One leg of a particle's infinite loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleCycle {
    pub index: u64,
    /// Seconds since the field was created.
    pub start: f64,
    pub duration: f64,
    pub from_y: f64,
    pub target_y: f64,
}

impl ParticleCycle {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn target_opacity(&self) -> f64 {
        TARGET_OPACITY
    }
}

/// Immutable description of one particle slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    seed: u64,
}

impl Particle {
    fn sample(id: usize, viewport: &Viewport, rng: &mut Rng) -> Self {
        Self {
            id,
            x: uniform(rng, 0.0..viewport.width),
            y: uniform(rng, 0.0..viewport.height),
            opacity: uniform_inclusive(rng, INITIAL_OPACITY),
            seed: rng.u64(..),
        }
    }

    /// Samples cycle `index`, starting at `start` from vertical position
    /// `from_y`. A given particle always draws the same target and duration
    /// for the same index.
    fn cycle(&self, index: u64, start: f64, from_y: f64, height: f64) -> ParticleCycle {
        let mut rng = Rng::with_seed(self.seed ^ index.wrapping_mul(CYCLE_SALT));
        let target_y = uniform(&mut rng, 0.0..height);
        let duration = uniform(&mut rng, CYCLE_SECONDS);
        ParticleCycle {
            index,
            start,
            duration,
            from_y,
            target_y,
        }
    }

    pub fn first_cycle(&self, height: f64) -> ParticleCycle {
        self.cycle(0, 0.0, self.y, height)
    }

    /// The cycle that follows `prev`. It begins where `prev` left the particle.
    pub fn next_cycle(&self, prev: &ParticleCycle, height: f64) -> ParticleCycle {
        self.cycle(prev.index + 1, prev.end(), prev.target_y, height)
    }

    fn frame_in(&self, cycle: &ParticleCycle, elapsed: f64) -> ParticleFrame {
        let t = CYCLE_EASING.apply((elapsed - cycle.start) / cycle.duration);
        ParticleFrame {
            id: self.id,
            x: self.x,
            y: cycle.from_y + (cycle.target_y - cycle.from_y) * t,
            opacity: self.opacity + (cycle.target_opacity() - self.opacity) * t,
        }
    }
}

/// A particle together with the cycle it is currently in.
///
/// Frames are requested with monotonically increasing time in practice, so the
/// track keeps its place and only walks forward. Asking for an earlier instant
/// replays from the first cycle.
#[derive(Debug, Clone)]
pub struct ParticleTrack {
    particle: Particle,
    height: f64,
    current: ParticleCycle,
}

impl ParticleTrack {
    pub fn new(particle: Particle, height: f64) -> Self {
        let current = particle.first_cycle(height);
        Self {
            particle,
            height,
            current,
        }
    }

    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn current(&self) -> &ParticleCycle {
        &self.current
    }

    pub fn frame(&mut self, elapsed: f64) -> ParticleFrame {
        let elapsed = elapsed.max(0.0);
        if elapsed < self.current.start {
            self.current = self.particle.first_cycle(self.height);
        }
        while elapsed >= self.current.end() {
            self.current = self.particle.next_cycle(&self.current, self.height);
        }
        self.particle.frame_in(&self.current, elapsed)
    }
}

/// The full set of background particles.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    viewport: Option<Viewport>,
    tracks: Vec<ParticleTrack>,
}

impl ParticleField {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let mut rng = Rng::with_seed(seed);
        let tracks = (0..PARTICLE_COUNT)
            .map(|id| ParticleTrack::new(Particle::sample(id, &viewport, &mut rng), viewport.height))
            .collect();
        log::debug!(
            "seeded {PARTICLE_COUNT} particles over {}x{}",
            viewport.width,
            viewport.height
        );
        Self {
            viewport: Some(viewport),
            tracks,
        }
    }

    /// Builds the field from a viewport measurement that may have failed.
    /// Without a usable viewport the field is empty.
    pub fn from_measurement(viewport: Result<Viewport, ViewportError>, seed: u64) -> Self {
        match viewport {
            Ok(viewport) => Self::new(viewport, seed),
            Err(e) => {
                log::warn!("rendering no particles: {e}");
                Self::default()
            }
        }
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.tracks.iter().map(ParticleTrack::particle)
    }

    pub fn frames(&mut self, elapsed: f64) -> Vec<ParticleFrame> {
        self.tracks.iter_mut().map(|t| t.frame(elapsed)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(seed: u64) -> ParticleField {
        ParticleField::new(Viewport::new(1280.0, 720.0).unwrap(), seed)
    }

    #[test]
    fn test_field_has_fixed_count() {
        for seed in 0..16 {
            assert_eq!(field(seed).len(), PARTICLE_COUNT);
        }
    }

    #[test]
    fn test_initial_state_in_bounds() {
        for seed in 0..64 {
            let field = field(seed);
            for p in field.particles() {
                assert!((0.0..1280.0).contains(&p.x), "x out of bounds: {}", p.x);
                assert!((0.0..720.0).contains(&p.y), "y out of bounds: {}", p.y);
                assert!(INITIAL_OPACITY.contains(&p.opacity), "opacity: {}", p.opacity);
            }
        }
    }

    #[test]
    fn test_cycles_in_bounds() {
        let field = field(7);
        for p in field.particles() {
            let mut cycle = p.first_cycle(720.0);
            for _ in 0..200 {
                assert!(CYCLE_SECONDS.contains(&cycle.duration), "{}", cycle.duration);
                assert!((0.0..720.0).contains(&cycle.target_y));
                assert_eq!(cycle.target_opacity(), 0.0);
                let next = p.next_cycle(&cycle, 720.0);
                assert_eq!(next.start, cycle.end());
                assert_eq!(next.from_y, cycle.target_y);
                cycle = next;
            }
        }
    }

    #[test]
    fn test_cycles_are_resampled() {
        let field = field(3);
        let p = field.particles().next().unwrap();
        let first = p.first_cycle(720.0);
        let second = p.next_cycle(&first, 720.0);
        assert_ne!(first.duration, second.duration);
        assert_ne!(first.target_y, second.target_y);
    }

    #[test]
    fn test_clocks_are_independent() {
        let field = field(11);
        let durations: Vec<f64> = field
            .particles()
            .map(|p| p.first_cycle(720.0).duration)
            .collect();
        let first = durations[0];
        assert!(durations.iter().any(|d| *d != first));
    }

    #[test]
    fn test_same_seed_same_motion() {
        let mut a = field(42);
        let mut b = field(42);
        for t in [0.0, 1.5, 9.0, 31.25, 400.0] {
            assert_eq!(a.frames(t), b.frames(t));
        }
        let mut c = field(43);
        assert_ne!(a.frames(2.0), c.frames(2.0));
    }

    #[test]
    fn test_frame_starts_at_initial_state_and_fades() {
        let mut field = field(5);
        let initial: Vec<Particle> = field.particles().copied().collect();
        let frames = field.frames(0.0);
        for (p, f) in initial.iter().zip(&frames) {
            assert_eq!(f.x, p.x);
            assert_eq!(f.y, p.y);
            assert_eq!(f.opacity, p.opacity);
        }

        let track = &field.tracks[0];
        let end = track.current().end();
        let mut track = track.clone();
        let just_before = track.frame(end - 1e-6);
        assert!(just_before.opacity < 1e-3);
        assert!(just_before.opacity >= 0.0);
    }

    #[test]
    fn test_loop_restarts_opacity() {
        let mut field = field(9);
        let track = &mut field.tracks[0];
        let end = track.current().end();
        let restarted = track.frame(end);
        assert_eq!(track.current().index, 1);
        assert_eq!(restarted.opacity, track.particle().opacity);
    }

    #[test]
    fn test_track_replays_when_time_goes_back() {
        let mut field = field(21);
        let late = field.frames(120.0);
        let early = field.frames(0.5);
        let mut fresh = self::field(21);
        assert_eq!(early, fresh.frames(0.5));
        assert_eq!(late, fresh.frames(120.0));
    }

    #[test]
    fn test_empty_viewport_fails_closed() {
        assert_eq!(
            Viewport::new(0.0, 0.0),
            Err(ViewportError::Empty {
                width: 0.0,
                height: 0.0
            })
        );
        assert!(Viewport::new(f64::NAN, 100.0).is_err());
        assert!(Viewport::new(100.0, -1.0).is_err());

        let mut field = ParticleField::from_measurement(Viewport::new(0.0, 0.0), 1);
        assert!(field.is_empty());
        assert!(field.frames(3.0).is_empty());

        let field = ParticleField::from_measurement(Err(ViewportError::Unavailable), 1);
        assert!(field.is_empty());
        assert_eq!(field.viewport(), None);
    }

    #[test]
    fn test_tiny_viewport_stays_in_bounds() {
        let mut field = ParticleField::new(Viewport::new(1.0, 1.0).unwrap(), 99);
        assert_eq!(field.len(), PARTICLE_COUNT);
        for f in field.frames(1000.0) {
            assert!((0.0..1.0).contains(&f.x));
            assert!((0.0..1.0).contains(&f.y));
        }
    }
}
