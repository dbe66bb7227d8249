//! Edge-triggered viewport intersection.
//!
//! Reports only when an element's intersecting state changes (and once on the
//! first observation), mirroring how intersection observers deliver entries.

use crate::dom::element::Rect;

/// Tracks whether an element crosses a visibility threshold.
#[derive(Debug, Clone)]
pub struct IntersectionWatch {
    /// Fraction of the element's height that must be visible, in `[0, 1]`.
    /// Zero means "any overlap".
    threshold: f64,
    /// Extra pixels added below the viewport bottom.
    bottom_margin: f64,
    last: Option<bool>,
}

impl IntersectionWatch {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            bottom_margin,
            last: None,
        }
    }

    /// Evaluate the element's viewport-relative rect.
    pub fn is_intersecting(&self, rect: &Rect, viewport_h: f64) -> bool {
        let root_top = 0.0;
        let root_bottom = viewport_h + self.bottom_margin;
        let visible = (rect.bottom().min(root_bottom) - rect.top.max(root_top)).max(0.0);
        if self.threshold <= 0.0 {
            return rect.top < root_bottom && rect.bottom() > root_top;
        }
        if rect.height <= 0.0 {
            return false;
        }
        visible / rect.height >= self.threshold
    }

    /// Returns `Some(state)` on the first call and whenever the state flips.
    pub fn observe(&mut self, rect: &Rect, viewport_h: f64) -> Option<bool> {
        let now = self.is_intersecting(rect, viewport_h);
        if self.last == Some(now) {
            return None;
        }
        self.last = Some(now);
        Some(now)
    }

    pub fn last(&self) -> Option<bool> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(top: f64, height: f64) -> Rect {
        Rect { top, left: 0.0, width: 100.0, height }
    }

    #[test]
    fn test_bottom_margin_extends_viewport() {
        let w = IntersectionWatch::new(0.0, 200.0);
        // Element starts 150px below an 800px viewport.
        assert!(w.is_intersecting(&rect(950.0, 300.0), 800.0));
        assert!(!w.is_intersecting(&rect(1001.0, 300.0), 800.0));
    }

    #[test]
    fn test_threshold_fraction() {
        let w = IntersectionWatch::new(0.3, 0.0);
        // 20% visible.
        assert!(!w.is_intersecting(&rect(720.0, 400.0), 800.0));
        // 50% visible.
        assert!(w.is_intersecting(&rect(600.0, 400.0), 800.0));
    }

    #[test]
    fn test_reports_only_changes() {
        let mut w = IntersectionWatch::new(0.0, 0.0);
        assert_eq!(w.observe(&rect(900.0, 100.0), 800.0), Some(false));
        assert_eq!(w.observe(&rect(850.0, 100.0), 800.0), None);
        assert_eq!(w.observe(&rect(700.0, 100.0), 800.0), Some(true));
        assert_eq!(w.observe(&rect(600.0, 100.0), 800.0), None);
    }
}
