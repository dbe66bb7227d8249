//! Process-section wobble: restart the `wobble` animation class every time a
//! section becomes sufficiently visible.

use crate::config::MotionConfig;
use crate::core::intersection::IntersectionWatch;
use crate::dom::element::ElementId;
use crate::dom::env::Host;
use crate::dom::signal::{Signal, SignalKind};

use super::Behavior;

pub const SECTION_SELECTOR: &str = ".process--oval";
pub const WOBBLE_CLASS: &str = "wobble";

pub struct Wobble {
    sections: Vec<(ElementId, IntersectionWatch)>,
    restarts: u64,
}

impl Wobble {
    pub fn setup(host: &mut dyn Host, motion: &MotionConfig) -> Option<Self> {
        let sections: Vec<_> = host
            .query_all(SECTION_SELECTOR)
            .into_iter()
            .map(|el| (el, IntersectionWatch::new(motion.wobble_threshold, 0.0)))
            .collect();
        if sections.is_empty() {
            return None;
        }
        let mut this = Self {
            sections,
            restarts: 0,
        };
        this.observe(host);
        Some(this)
    }

    fn observe(&mut self, host: &mut dyn Host) {
        let vh = host.viewport().height;
        for (el, watch) in &mut self.sections {
            let rect = host.measure(*el);
            if watch.observe(&rect, vh) == Some(true) {
                // Dropping the class first lets the animation run again.
                host.set_class(*el, WOBBLE_CLASS, false);
                host.set_class(*el, WOBBLE_CLASS, true);
                self.restarts += 1;
                tracing::trace!(section = *el, "wobble restarted");
            }
        }
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }
}

impl Behavior for Wobble {
    fn name(&self) -> &'static str {
        "wobble"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::Scroll, SignalKind::Resize]
    }

    fn on_signal(&mut self, _signal: &Signal, host: &mut dyn Host) {
        self.observe(host);
    }

    fn describe(&self) -> String {
        format!("{} section(s), {} restart(s)", self.sections.len(), self.restarts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::element::ElementSpec;
    use crate::dom::env::Environment;
    use crate::dom::page::Page;

    fn scroll(w: &mut Wobble, page: &mut Page, y: f64) {
        page.set_scroll(y);
        w.on_signal(&Signal::Scroll, page);
    }

    #[test]
    fn test_restarts_on_each_entry() {
        let mut page = Page::new(1280.0, 800.0);
        let section = page.append(page.root(), ElementSpec::new(SECTION_SELECTOR).at(1000.0, 400.0));
        page.append(page.root(), ElementSpec::new("footer").at(1400.0, 2000.0));

        let mut w = Wobble::setup(&mut page, &MotionConfig::default()).unwrap();
        assert_eq!(w.restarts(), 0);
        assert!(!page.has_class(section, WOBBLE_CLASS));

        // 100 of 400px visible: below 30 %.
        scroll(&mut w, &mut page, 300.0);
        assert_eq!(w.restarts(), 0);

        scroll(&mut w, &mut page, 400.0);
        assert_eq!(w.restarts(), 1);
        assert!(page.has_class(section, WOBBLE_CLASS));

        // Staying visible does not restart.
        scroll(&mut w, &mut page, 600.0);
        assert_eq!(w.restarts(), 1);

        scroll(&mut w, &mut page, 0.0);
        scroll(&mut w, &mut page, 500.0);
        assert_eq!(w.restarts(), 2);
    }
}
