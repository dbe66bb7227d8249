//! Exponential smoothing toward a target with a convergence cutoff.
//!
//! Each frame the current value moves a fixed fraction of the remaining
//! distance toward the target.  Once it is within [`EPSILON`] the engine
//! reports [`Phase::Converged`] and the caller stops requesting frames.

use super::sampler::clamp01;

/// Distance below which the value counts as settled.
pub const EPSILON: f64 = 0.001;
/// Lower bound applied to the smoothing factor.
pub const MIN_SMOOTHING: f64 = 0.01;
/// Upper bound applied to the smoothing factor.
pub const MAX_SMOOTHING: f64 = 0.35;

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp a smoothing factor into the supported range.  NaN maps to the minimum.
pub fn clamp_smoothing(smoothing: f64) -> f64 {
    if smoothing.is_nan() {
        return MIN_SMOOTHING;
    }
    smoothing.clamp(MIN_SMOOTHING, MAX_SMOOTHING)
}

/// One smoothing step: `current + (target - current) * clamp(smoothing)`.
pub fn step(current: f64, target: f64, smoothing: f64) -> f64 {
    lerp(current, target, clamp_smoothing(smoothing))
}

/// Whether the engine still needs frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Converging,
    Converged,
}

/// Owned convergence state for one animated value.
#[derive(Debug, Clone)]
pub struct ConvergenceState {
    current: f64,
    target: f64,
    smoothing: f64,
}

impl ConvergenceState {
    /// Start settled at `current = target = 0`.
    pub fn new(smoothing: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            smoothing: clamp_smoothing(smoothing),
        }
    }

    /// Assign a new target in `[0, 1]`.  Returns the resulting phase.
    pub fn set_target(&mut self, target: f64) -> Phase {
        self.target = clamp01(target);
        self.phase()
    }

    pub fn set_smoothing(&mut self, smoothing: f64) {
        self.smoothing = clamp_smoothing(smoothing);
    }

    /// Advance one frame.
    pub fn advance(&mut self) -> Phase {
        self.current = step(self.current, self.target, self.smoothing);
        self.phase()
    }

    /// Jump straight to the target (reduced motion).
    pub fn snap(&mut self) {
        self.current = self.target;
    }

    pub fn phase(&self) -> Phase {
        if (self.current - self.target).abs() <= EPSILON {
            Phase::Converged
        } else {
            Phase::Converging
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamps_smoothing() {
        // 0.9 is clamped to 0.35.
        assert!((step(0.0, 1.0, 0.9) - 0.35).abs() < 1e-12);
        // 0.0 is clamped to 0.01.
        assert!((step(0.0, 1.0, 0.0) - 0.01).abs() < 1e-12);
        assert!((step(0.0, 1.0, f64::NAN) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_initially_converged_at_zero() {
        let c = ConvergenceState::new(0.1);
        assert_eq!(c.current(), 0.0);
        assert_eq!(c.target(), 0.0);
        assert_eq!(c.phase(), Phase::Converged);
    }

    #[test]
    fn test_monotonic_convergence_without_overshoot() {
        for &s in &[0.01, 0.1, 0.2, 0.35] {
            for &target in &[0.0005, 0.25, 0.5, 1.0] {
                let mut c = ConvergenceState::new(s);
                c.set_target(target);
                let mut prev = (c.current() - c.target()).abs();
                let mut frames = 0;
                while c.advance() == Phase::Converging {
                    let gap = (c.current() - c.target()).abs();
                    assert!(gap < prev, "s={s} target={target} gap={gap} prev={prev}");
                    assert!(c.current() <= target, "overshoot at s={s}");
                    prev = gap;
                    frames += 1;
                    assert!(frames < 10_000);
                }
                assert!((c.current() - target).abs() <= EPSILON);
            }
        }
    }

    #[test]
    fn test_new_target_resumes_converging() {
        let mut c = ConvergenceState::new(0.35);
        c.set_target(0.2);
        while c.advance() == Phase::Converging {}
        assert_eq!(c.set_target(0.8), Phase::Converging);
    }

    #[test]
    fn test_snap_reaches_target_exactly() {
        let mut c = ConvergenceState::new(0.1);
        c.set_target(0.73);
        c.snap();
        assert_eq!(c.current(), 0.73);
        assert_eq!(c.phase(), Phase::Converged);
    }

    #[test]
    fn test_target_is_clamped() {
        let mut c = ConvergenceState::new(0.1);
        c.set_target(3.0);
        assert_eq!(c.target(), 1.0);
        c.set_target(-1.0);
        assert_eq!(c.target(), 0.0);
    }
}
