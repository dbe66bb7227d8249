//! Hero bubble shrink: scroll progress through the top of the page, written
//! straight to `--shrink` once per frame.

use crate::config::MotionConfig;
use crate::core::effect::{PropertyWriter, ScalarFormat};
use crate::core::sampler::progress;
use crate::core::scheduler::FrameScheduler;
use crate::dom::element::ElementId;
use crate::dom::env::Host;
use crate::dom::signal::{Signal, SignalKind};

use super::Behavior;

pub const HERO_SELECTOR: &str = ".hero.hero-bubble";

pub struct HeroShrink {
    hero: ElementId,
    shrink: PropertyWriter,
    end_ratio: f64,
    frames: FrameScheduler,
    last: f64,
}

impl HeroShrink {
    pub fn setup(host: &mut dyn Host, motion: &MotionConfig) -> Option<Self> {
        let hero = host.query(HERO_SELECTOR)?;
        let mut this = Self {
            hero,
            shrink: PropertyWriter::new(hero, "--shrink", ScalarFormat::Fixed(4)),
            end_ratio: motion.hero_end_ratio,
            frames: FrameScheduler::new(),
            last: 0.0,
        };
        if !host.prefers_reduced_motion() {
            this.update(host);
        }
        Some(this)
    }

    /// Progress in `[0, 1]` for the hero's current position.
    pub fn sample(&self, host: &dyn Host) -> f64 {
        let rect = host.measure(self.hero);
        let end = host.viewport().height * self.end_ratio;
        progress(-rect.top, end)
    }

    fn update(&mut self, host: &mut dyn Host) {
        let t = self.sample(host);
        self.shrink.apply(host, t);
        self.last = t;
    }
}

impl Behavior for HeroShrink {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::Scroll, SignalKind::Resize, SignalKind::ReducedMotionChange]
    }

    fn on_signal(&mut self, _signal: &Signal, host: &mut dyn Host) {
        if host.prefers_reduced_motion() {
            self.frames.cancel();
            return;
        }
        self.frames.request();
    }

    fn frame_requested(&self) -> bool {
        self.frames.is_pending()
    }

    fn on_frame(&mut self, host: &mut dyn Host) {
        if self.frames.begin_frame() {
            self.update(host);
        }
    }

    fn describe(&self) -> String {
        format!("--shrink {:.4}", self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::element::ElementSpec;
    use crate::dom::page::Page;

    fn page() -> (Page, ElementId) {
        let mut page = Page::new(1280.0, 1000.0);
        let hero = page.append(page.root(), ElementSpec::new(HERO_SELECTOR).at(0.0, 900.0));
        page.append(page.root(), ElementSpec::new("main").at(900.0, 4000.0));
        (page, hero)
    }

    #[test]
    fn test_initial_value_written_at_setup() {
        let (mut page, hero) = page();
        HeroShrink::setup(&mut page, &MotionConfig::default()).unwrap();
        assert_eq!(page.property(hero, "--shrink"), Some("0.0000"));
    }

    #[test]
    fn test_progress_tracks_scroll() {
        let (mut page, hero) = page();
        let mut h = HeroShrink::setup(&mut page, &MotionConfig::default()).unwrap();
        // End distance is 60% of a 1000px viewport.
        page.set_scroll(300.0);
        h.on_signal(&Signal::Scroll, &mut page);
        h.on_frame(&mut page);
        assert_eq!(page.property(hero, "--shrink"), Some("0.5000"));

        page.set_scroll(2000.0);
        h.on_signal(&Signal::Scroll, &mut page);
        h.on_frame(&mut page);
        assert_eq!(page.property(hero, "--shrink"), Some("1.0000"));
    }

    #[test]
    fn test_reduced_motion_leaves_hero_alone() {
        let (mut page, hero) = page();
        page.set_reduced_motion(true);
        let mut h = HeroShrink::setup(&mut page, &MotionConfig::default()).unwrap();
        assert_eq!(page.property(hero, "--shrink"), None);
        page.set_scroll(300.0);
        h.on_signal(&Signal::Scroll, &mut page);
        assert!(!h.frame_requested());
    }
}
