//! Half-image circle shrink.
//!
//! The circle starts as wide as its section and eases toward a smaller end
//! size as the section's bottom edge rises through the viewport.  The target
//! comes from the live geometry; the displayed value converges toward it one
//! frame at a time and stops requesting frames once settled.
//!
//! On narrow viewports [`HalfImageStatic`] marks the section `data-no-anim`
//! and pins the circle, which makes [`HalfImageShrink`] inert.

use crate::config::MotionConfig;
use crate::core::convergence::{lerp, ConvergenceState, Phase};
use crate::core::effect::{PropertyWriter, ScalarFormat};
use crate::core::sampler::progress;
use crate::core::scheduler::FrameScheduler;
use crate::dom::element::ElementId;
use crate::dom::env::{Host, MediaQuery};
use crate::dom::signal::{Signal, SignalKind};

use super::Behavior;

pub const SECTION_SELECTOR: &str = "[data-half-image]";
pub const ROOT_SELECTOR: &str = ".half-image";
pub const CIRCLE_SELECTOR: &str = ".half-image__circle";
pub const IMAGE_SELECTOR: &str = ".half-image__img";

const NO_ANIM_ATTR: &str = "data-no-anim";

pub const DEFAULT_END_MAX: f64 = 560.0;
pub const DEFAULT_END_VW: f64 = 55.0;
pub const DEFAULT_SHRINK_DIST: f64 = 0.6;
pub const DEFAULT_SMOOTH: f64 = 0.1;

/// Style-derived sizing, re-read every time it is needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub height: f64,
    pub start_size: f64,
    pub end_size: f64,
    pub shrink_dist: f64,
    pub smooth: f64,
}

impl Metrics {
    pub fn measure(host: &dyn Host, section: ElementId) -> Self {
        let rect = host.measure(section);
        let (sw, sh) = (rect.width, rect.height);

        let end_max = host.read_style_number(section, "--end-max", DEFAULT_END_MAX);
        let end_vw = host.read_style_number(section, "--end-vw", DEFAULT_END_VW) / 100.0;

        Self {
            height: sh,
            start_size: sw,
            end_size: sh.min((sw * end_vw).min(end_max)),
            shrink_dist: host.read_style_number(section, "--shrink-dist", DEFAULT_SHRINK_DIST),
            smooth: host.read_style_number(section, "--smooth", DEFAULT_SMOOTH),
        }
    }

    /// Circle size and vertical offset at progress `t`.
    pub fn at(&self, t: f64) -> (f64, f64) {
        let size = lerp(self.start_size, self.end_size, t);
        let ty = lerp(0.0, ((self.height - size) / 2.0).max(0.0), t);
        (size, ty)
    }
}

pub struct HalfImageShrink {
    section: ElementId,
    size: PropertyWriter,
    ty: PropertyWriter,
    engine: ConvergenceState,
    frames: FrameScheduler,
}

impl HalfImageShrink {
    pub fn setup(host: &mut dyn Host) -> Option<Self> {
        let section = host.query(SECTION_SELECTOR)?;
        let circle = host.query_within(section, CIRCLE_SELECTOR)?;

        let mut this = Self {
            section,
            size: PropertyWriter::new(circle, "--half-size", ScalarFormat::Pixels),
            ty: PropertyWriter::new(circle, "--half-ty", ScalarFormat::Pixels),
            engine: ConvergenceState::new(DEFAULT_SMOOTH),
            frames: FrameScheduler::new(),
        };
        this.on_update(host);
        Some(this)
    }

    fn is_disabled(&self, host: &dyn Host) -> bool {
        host.attribute(self.section, NO_ANIM_ATTR).as_deref() == Some("1")
    }

    /// Target progress from the section's live geometry.
    pub fn compute_target(&self, host: &dyn Host) -> f64 {
        let rect = host.measure(self.section);
        let vh = host.viewport().height;
        let metrics = Metrics::measure(host, self.section);

        let dist_px = (vh * metrics.shrink_dist).max(1.0);
        let travelled = (vh - rect.bottom()).max(0.0);
        progress(travelled, dist_px)
    }

    fn apply(&self, host: &mut dyn Host, t: f64) {
        let metrics = Metrics::measure(host, self.section);
        let (size, ty) = metrics.at(t);
        self.size.apply(host, size);
        self.ty.apply(host, ty);
    }

    fn on_update(&mut self, host: &mut dyn Host) {
        if self.is_disabled(host) {
            self.frames.cancel();
            return;
        }

        let target = self.compute_target(host);
        self.engine.set_target(target);

        if host.prefers_reduced_motion() {
            self.frames.cancel();
            self.engine.snap();
            self.apply(host, self.engine.current());
            return;
        }

        self.frames.request();
    }

    pub fn current(&self) -> f64 {
        self.engine.current()
    }

    pub fn target(&self) -> f64 {
        self.engine.target()
    }
}

impl Behavior for HalfImageShrink {
    fn name(&self) -> &'static str {
        "half-image"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::Scroll, SignalKind::Resize, SignalKind::ReducedMotionChange]
    }

    fn on_signal(&mut self, _signal: &Signal, host: &mut dyn Host) {
        self.on_update(host);
    }

    fn frame_requested(&self) -> bool {
        self.frames.is_pending()
    }

    fn on_frame(&mut self, host: &mut dyn Host) {
        if !self.frames.begin_frame() {
            return;
        }
        if self.is_disabled(host) {
            return;
        }

        let smooth = Metrics::measure(host, self.section).smooth;
        self.engine.set_smoothing(smooth);
        let phase = self.engine.advance();
        self.apply(host, self.engine.current());

        if phase == Phase::Converging {
            self.frames.request();
        }
    }

    fn describe(&self) -> String {
        format!("t {:.3} -> {:.3}", self.engine.current(), self.engine.target())
    }
}

/// Narrow-viewport fallback: freezes every half-image section.
pub struct HalfImageStatic {
    max_width: f64,
}

impl HalfImageStatic {
    pub fn setup(host: &mut dyn Host, motion: &MotionConfig) -> Option<Self> {
        let this = Self {
            max_width: motion.mobile_max_width,
        };
        this.apply(host);
        Some(this)
    }

    fn apply(&self, host: &mut dyn Host) {
        if !host.matches_media(MediaQuery::MaxWidth(self.max_width)) {
            return;
        }

        for root in host.query_all(ROOT_SELECTOR) {
            if host.attribute(root, NO_ANIM_ATTR).as_deref() == Some("1") {
                continue;
            }
            host.set_attribute(root, NO_ANIM_ATTR, "1");

            for circle in host.query_all_within(root, CIRCLE_SELECTOR) {
                host.set_property(circle, "--half-ty", "0px");
                host.set_property(circle, "transition", "none");
                host.set_property(circle, "animation", "none");
                host.set_property(circle, "will-change", "auto");
            }
            for img in host.query_all_within(root, IMAGE_SELECTOR) {
                host.set_property(img, "transition", "none");
                host.set_property(img, "animation", "none");
                host.set_property(img, "object-position", "50% 100%");
            }
            tracing::debug!(root, "half-image frozen for narrow viewport");
        }
    }
}

impl Behavior for HalfImageStatic {
    fn name(&self) -> &'static str {
        "half-image-static"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::MediaChange, SignalKind::Resize]
    }

    fn on_signal(&mut self, _signal: &Signal, host: &mut dyn Host) {
        self.apply(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::convergence::EPSILON;
    use crate::dom::element::ElementSpec;
    use crate::dom::env::{Effects, Environment};
    use crate::dom::page::Page;

    /// 1000px wide, 800px tall section whose top sits at 1000 in an 800px viewport.
    fn page(shrink_dist: &str) -> (Page, ElementId, ElementId) {
        let mut page = Page::new(1000.0, 800.0);
        let section = page.append(
            page.root(),
            ElementSpec::new(SECTION_SELECTOR)
                .also(ROOT_SELECTOR)
                .at(1000.0, 800.0)
                .style("--shrink-dist", shrink_dist),
        );
        let circle = page.append(section, ElementSpec::new(CIRCLE_SELECTOR).at(1000.0, 800.0));
        page.append(section, ElementSpec::new(IMAGE_SELECTOR).at(1000.0, 800.0));
        page.append(page.root(), ElementSpec::new("footer").at(1800.0, 2000.0));
        (page, section, circle)
    }

    fn settle(h: &mut HalfImageShrink, page: &mut Page) -> usize {
        let mut frames = 0;
        while h.frame_requested() {
            h.on_frame(page);
            frames += 1;
            assert!(frames < 10_000);
        }
        frames
    }

    #[test]
    fn test_missing_circle_disables_behavior() {
        let mut page = Page::new(1000.0, 800.0);
        page.append(page.root(), ElementSpec::new(SECTION_SELECTOR).at(0.0, 500.0));
        assert!(HalfImageShrink::setup(&mut page).is_none());
    }

    #[test]
    fn test_metrics_defaults_and_overrides() {
        let (mut page, section, _) = page("0.75");
        let m = Metrics::measure(&page, section);
        // min(800, min(1000 * 0.55, 560))
        assert_eq!(m.end_size, 550.0);
        assert_eq!(m.shrink_dist, 0.75);
        assert_eq!(m.smooth, DEFAULT_SMOOTH);

        page.set_property(section, "--end-max", "480px");
        page.set_property(section, "--smooth", "garbage");
        let m = Metrics::measure(&page, section);
        assert_eq!(m.end_size, 480.0);
        assert_eq!(m.smooth, DEFAULT_SMOOTH);
    }

    #[test]
    fn test_converges_to_half_way_target() {
        // Travel distance 800 * 0.75 = 600px.
        let (mut page, _, circle) = page("0.75");
        let mut h = HalfImageShrink::setup(&mut page).unwrap();
        settle(&mut h, &mut page);

        // Bottom edge at 500 in the viewport: travelled = 300.
        page.set_scroll(1300.0);
        h.on_signal(&Signal::Scroll, &mut page);
        assert_eq!(h.target(), 0.5);

        let frames = settle(&mut h, &mut page);
        assert!(frames > 1);
        assert!((h.current() - 0.5).abs() <= EPSILON);
        assert!(!h.frame_requested());

        let size = page.property(circle, "--half-size").unwrap();
        assert!(size.ends_with("px"));
    }

    #[test]
    fn test_reduced_motion_snaps_without_frames() {
        let (mut page, _, circle) = page("0.75");
        page.set_reduced_motion(true);
        let mut h = HalfImageShrink::setup(&mut page).unwrap();
        page.set_scroll(1300.0);
        h.on_signal(&Signal::Scroll, &mut page);

        assert_eq!(h.current(), 0.5);
        assert!(!h.frame_requested());
        // lerp(1000, 550, 0.5) = 775; ty = lerp(0, max(0, (800 - 775) / 2), 0.5)
        assert_eq!(page.property(circle, "--half-size"), Some("775px"));
        assert_eq!(page.property(circle, "--half-ty"), Some("6.25px"));
    }

    #[test]
    fn test_narrow_viewport_freezes_section() {
        let (mut page, section, circle) = page("0.75");
        let mut h = HalfImageShrink::setup(&mut page).unwrap();
        page.resize(390.0, 800.0);
        HalfImageStatic::setup(&mut page, &MotionConfig::default()).unwrap();

        assert_eq!(page.attribute(section, NO_ANIM_ATTR).as_deref(), Some("1"));
        assert_eq!(page.property(circle, "--half-ty"), Some("0px"));

        page.set_scroll(1300.0);
        h.on_signal(&Signal::Scroll, &mut page);
        assert!(!h.frame_requested());
    }
}
