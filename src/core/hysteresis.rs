//! Scroll-direction visibility with a dead zone.
//!
//! Near the top of the page the target is always shown.  Further down, the
//! state only flips once the offset has moved more than `delta` pixels since
//! the last resolution, which keeps small jitter from toggling it.

use crate::error::MotionError;

/// Binary visibility resolved by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Shown,
    Hidden,
}

impl Visibility {
    pub fn is_hidden(self) -> bool {
        self == Visibility::Hidden
    }
}

/// Dead-zone constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HysteresisThreshold {
    /// At or above the page top by this many pixels the target is always shown.
    pub top_reveal_px: f64,
    /// Minimum movement since the last resolution before the state may flip.
    pub delta: f64,
}

impl HysteresisThreshold {
    pub fn new(top_reveal_px: f64, delta: f64) -> Result<Self, MotionError> {
        if !(delta > 0.0) || !delta.is_finite() || !top_reveal_px.is_finite() {
            return Err(MotionError::InvalidThreshold { top_reveal_px, delta });
        }
        Ok(Self { top_reveal_px, delta })
    }
}

/// Owned hysteresis state for one target.
#[derive(Debug, Clone)]
pub struct HysteresisTracker {
    threshold: HysteresisThreshold,
    last_y: f64,
    state: Visibility,
}

impl HysteresisTracker {
    /// Start in [`Visibility::Shown`] with `last_y` at the current offset.
    pub fn new(threshold: HysteresisThreshold, initial_y: f64) -> Self {
        Self {
            threshold,
            last_y: initial_y,
            state: Visibility::Shown,
        }
    }

    /// Feed the live scroll offset.
    ///
    /// Returns the resolved visibility, or `None` inside the dead zone (in
    /// which case `last_y` is left untouched).
    pub fn sample(&mut self, y: f64) -> Option<Visibility> {
        if y <= self.threshold.top_reveal_px {
            self.last_y = y;
            self.state = Visibility::Shown;
            return Some(Visibility::Shown);
        }

        let diff = y - self.last_y;
        let resolved = if diff > self.threshold.delta {
            Visibility::Hidden
        } else if diff < -self.threshold.delta {
            Visibility::Shown
        } else {
            return None;
        };

        self.last_y = y;
        self.state = resolved;
        Some(resolved)
    }

    /// Reset the reference offset (used after a viewport resize).
    pub fn rebase(&mut self, y: f64) {
        self.last_y = y;
    }

    /// Force the shown state without moving the reference offset.
    pub fn reveal(&mut self) {
        self.state = Visibility::Shown;
    }

    pub fn state(&self) -> Visibility {
        self.state
    }

    pub fn last_y(&self) -> f64 {
        self.last_y
    }

    pub fn threshold(&self) -> HysteresisThreshold {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(top: f64, delta: f64, y0: f64) -> HysteresisTracker {
        HysteresisTracker::new(HysteresisThreshold::new(top, delta).unwrap(), y0)
    }

    #[test]
    fn test_threshold_rejects_non_positive_delta() {
        assert!(HysteresisThreshold::new(40.0, 0.0).is_err());
        assert!(HysteresisThreshold::new(40.0, -3.0).is_err());
        assert!(HysteresisThreshold::new(40.0, f64::NAN).is_err());
        assert!(HysteresisThreshold::new(40.0, 8.0).is_ok());
    }

    #[test]
    fn test_top_of_page_always_shows() {
        let mut t = tracker(40.0, 8.0, 500.0);
        assert_eq!(t.sample(600.0), Some(Visibility::Hidden));
        for y in [40.0, 12.0, 0.0] {
            assert_eq!(t.sample(y), Some(Visibility::Shown));
            assert_eq!(t.last_y(), y);
        }
    }

    #[test]
    fn test_sub_delta_movement_never_flips() {
        let mut t = tracker(40.0, 8.0, 100.0);
        assert_eq!(t.sample(108.0), None);
        assert_eq!(t.state(), Visibility::Shown);
        assert_eq!(t.last_y(), 100.0);
    }

    #[test]
    fn test_dead_zone_accumulates_from_last_resolution() {
        let mut t = tracker(40.0, 8.0, 100.0);
        assert_eq!(t.sample(105.0), None);
        assert_eq!(t.sample(107.0), None);
        // 9px from the last resolution at 100.
        assert_eq!(t.sample(109.0), Some(Visibility::Hidden));
    }

    #[test]
    fn test_upward_movement_reveals() {
        let mut t = tracker(40.0, 8.0, 100.0);
        t.sample(200.0);
        assert_eq!(t.state(), Visibility::Hidden);
        assert_eq!(t.sample(195.0), None);
        assert_eq!(t.sample(191.0), Some(Visibility::Shown));
    }

    #[test]
    fn test_reference_trace() {
        let mut t = tracker(40.0, 8.0, 0.0);
        let states: Vec<Visibility> = [0.0, 20.0, 55.0, 70.0, 58.0]
            .into_iter()
            .map(|y| {
                t.sample(y);
                t.state()
            })
            .collect();
        assert_eq!(
            states,
            vec![
                Visibility::Shown,
                Visibility::Shown,
                Visibility::Hidden,
                Visibility::Hidden,
                Visibility::Shown,
            ]
        );
    }

    #[test]
    fn test_reveal_keeps_reference_offset() {
        let mut t = tracker(40.0, 6.0, 100.0);
        t.sample(300.0);
        t.reveal();
        assert_eq!(t.state(), Visibility::Shown);
        assert_eq!(t.last_y(), 300.0);
    }
}
