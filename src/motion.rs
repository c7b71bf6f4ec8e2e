//! Time-driven transitions.
//!
//! Every animated value on the page is a pure function of the seconds elapsed
//! since its gating event. A [`Transition`] maps elapsed time to eased progress,
//! and a [`Pose`] is the visual state that progress interpolates between.

/// Damping ratio of the spring curve.
const SPRING_DAMPING: f64 = 0.5;
/// Natural frequency of the spring curve, in radians per unit of progress.
const SPRING_FREQUENCY: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseInOut,
    /// Under-damped spring. Overshoots past 1 mid-flight, lands exactly on 1.
    Spring,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress.
    ///
    /// Inputs outside the unit interval are clamped, and the curve is pinned so
    /// that `apply(0.0) == 0.0` and `apply(1.0) == 1.0` for every variant.
    pub fn apply(self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        if p <= 0.0 {
            return 0.0;
        }
        if p >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => p,
            Easing::EaseInOut => {
                if p < 0.5 {
                    4.0 * p * p * p
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
                }
            }
            Easing::Spring => {
                let raw = spring_response(p);
                // pull the tail onto 1.0 so the settled value has no residue
                raw + p * (1.0 - spring_response(1.0))
            }
        }
    }
}

fn spring_response(p: f64) -> f64 {
    let damped = SPRING_FREQUENCY * (1.0 - SPRING_DAMPING * SPRING_DAMPING).sqrt();
    1.0 - (-SPRING_DAMPING * SPRING_FREQUENCY * p).exp() * (damped * p).cos()
}

/// A delayed, fixed-length transition measured in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub delay: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl Transition {
    pub const fn new(delay: f64, duration: f64, easing: Easing) -> Self {
        Self {
            delay,
            duration,
            easing,
        }
    }

    /// Offset from the gating event at which the transition starts moving.
    pub fn starts_at(&self) -> f64 {
        self.delay
    }

    /// Offset from the gating event at which the transition has settled.
    pub fn ends_at(&self) -> f64 {
        self.delay + self.duration
    }

    /// Eased progress at `elapsed` seconds after the gating event, or `None`
    /// while the delay has not run out yet.
    pub fn progress(&self, elapsed: f64) -> Option<f64> {
        if elapsed < self.delay {
            return None;
        }
        if self.duration <= 0.0 || self.is_settled(elapsed) {
            return Some(1.0);
        }
        let linear = (elapsed - self.delay) / self.duration;
        Some(self.easing.apply(linear))
    }

    pub fn is_settled(&self, elapsed: f64) -> bool {
        elapsed >= self.ends_at()
    }
}

/// Visual state of a revealable element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Vertical offset from the resting position, in pixels.
    pub offset_y: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl Pose {
    pub const REST: Pose = Pose {
        offset_y: 0.0,
        opacity: 1.0,
        scale: 1.0,
    };

    pub const fn faded() -> Self {
        Self {
            offset_y: 0.0,
            opacity: 0.0,
            scale: 1.0,
        }
    }

    pub const fn lowered(offset_y: f64) -> Self {
        Self {
            offset_y,
            opacity: 0.0,
            scale: 1.0,
        }
    }

    pub const fn collapsed() -> Self {
        Self {
            offset_y: 0.0,
            opacity: 1.0,
            scale: 0.0,
        }
    }

    /// Interpolates between two poses. `t` is not clamped so spring overshoot
    /// carries through; opacity alone is kept inside `[0, 1]`.
    pub fn lerp(from: Pose, to: Pose, t: f64) -> Pose {
        Pose {
            offset_y: from.offset_y + (to.offset_y - from.offset_y) * t,
            opacity: (from.opacity + (to.opacity - from.opacity) * t).clamp(0.0, 1.0),
            scale: from.scale + (to.scale - from.scale) * t,
        }
    }

    /// Inline CSS for this pose.
    pub fn css(&self) -> String {
        format!(
            "opacity: {:.4}; transform: translateY({:.2}px) scale({:.4});",
            self.opacity, self.offset_y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASINGS: [Easing; 3] = [Easing::Linear, Easing::EaseInOut, Easing::Spring];

    #[test]
    fn test_easing_endpoints_are_exact() {
        for easing in EASINGS {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
            assert_eq!(easing.apply(-3.0), 0.0, "{easing:?} below range");
            assert_eq!(easing.apply(7.5), 1.0, "{easing:?} above range");
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric_and_monotonic() {
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
        let mut last = 0.0;
        for i in 1..=100 {
            let v = Easing::EaseInOut.apply(i as f64 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_spring_overshoots_then_lands() {
        let peak = (1..100)
            .map(|i| Easing::Spring.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "spring should overshoot, peak was {peak}");
        assert_eq!(Easing::Spring.apply(1.0), 1.0);
    }

    #[test]
    fn test_transition_waits_for_delay() {
        let t = Transition::new(0.5, 1.0, Easing::Linear);
        assert_eq!(t.progress(0.0), None);
        assert_eq!(t.progress(0.49), None);
        assert_eq!(t.progress(0.5), Some(0.0));
        assert_eq!(t.progress(1.0), Some(0.5));
        assert_eq!(t.progress(1.5), Some(1.0));
        assert_eq!(t.progress(50.0), Some(1.0));
        assert!(!t.is_settled(1.49));
        assert!(t.is_settled(1.5));
    }

    #[test]
    fn test_transition_settles_on_float_boundaries() {
        let t = Transition::new(0.4, 0.8, Easing::EaseInOut);
        assert_eq!(t.progress(t.ends_at()), Some(1.0));
    }

    #[test]
    fn test_zero_duration_snaps() {
        let t = Transition::new(0.0, 0.0, Easing::EaseInOut);
        assert_eq!(t.progress(0.0), Some(1.0));
    }

    #[test]
    fn test_pose_lerp() {
        let from = Pose::lowered(20.0);
        assert_eq!(Pose::lerp(from, Pose::REST, 0.0), from);
        assert_eq!(Pose::lerp(from, Pose::REST, 1.0), Pose::REST);

        let half = Pose::lerp(from, Pose::REST, 0.5);
        assert_eq!(half.offset_y, 10.0);
        assert_eq!(half.opacity, 0.5);

        let overshoot = Pose::lerp(Pose::collapsed(), Pose::REST, 1.2);
        assert!(overshoot.scale > 1.0);
        assert_eq!(overshoot.opacity, 1.0);
    }

    #[test]
    fn test_pose_css() {
        assert_eq!(
            Pose::REST.css(),
            "opacity: 1.0000; transform: translateY(0.00px) scale(1.0000);"
        );
    }
}
