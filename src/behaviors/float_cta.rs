//! Floating call-to-action visibility.
//!
//! Three inputs decide whether the CTAs are visible:
//! scrolling (hidden until scrolling has been idle for a moment), the open
//! drawer (hidden while the root carries `is-drawer-open`), and footer
//! proximity (`display: none` once the footer is within a margin of the
//! viewport bottom).  Both class inputs feed one `is-hidden` toggle so they
//! cannot undo each other.

use std::time::Duration;

use crate::config::MotionConfig;
use crate::core::effect::ClassToggle;
use crate::core::intersection::IntersectionWatch;
use crate::core::timer::DeferredTimer;
use crate::dom::element::ElementId;
use crate::dom::env::Host;
use crate::dom::signal::{Signal, SignalKind};

use super::drawer::DRAWER_OPEN_CLASS;
use super::Behavior;

pub const CTA_SELECTOR: &str = "[data-float-cta]";
pub const HIDE_CLASS: &str = "is-hidden";

pub struct FloatingCta {
    ctas: Vec<ClassToggle>,
    footer: Option<(ElementId, IntersectionWatch)>,
    idle_delay: Duration,
    idle: DeferredTimer,
    scrolling: bool,
    drawer_open: bool,
    near_footer: bool,
}

impl FloatingCta {
    pub fn setup(host: &mut dyn Host, motion: &MotionConfig) -> Option<Self> {
        let ctas: Vec<ClassToggle> = host
            .query_all(CTA_SELECTOR)
            .into_iter()
            .map(|el| ClassToggle::new(el, HIDE_CLASS))
            .collect();
        if ctas.is_empty() {
            return None;
        }

        let footer = host
            .query("footer")
            .or_else(|| host.query(".footer"))
            .map(|el| (el, IntersectionWatch::new(0.0, motion.cta_footer_margin_px)));

        let root = host.root();
        let mut this = Self {
            ctas,
            footer,
            idle_delay: Duration::from_millis(motion.cta_idle_ms),
            idle: DeferredTimer::new(),
            scrolling: false,
            drawer_open: host.has_class(root, DRAWER_OPEN_CLASS),
            near_footer: false,
        };
        this.observe_footer(host);
        this.render(host);
        Some(this)
    }

    pub fn is_hidden(&self) -> bool {
        self.scrolling || self.drawer_open
    }

    fn observe_footer(&mut self, host: &mut dyn Host) {
        let Some((footer, watch)) = self.footer.as_mut() else {
            return;
        };
        let rect = host.measure(*footer);
        let vh = host.viewport().height;
        if let Some(near) = watch.observe(&rect, vh) {
            self.near_footer = near;
            let display = if near { "none" } else { "" };
            for cta in &self.ctas {
                host.set_property(cta.element, "display", display);
            }
        }
    }

    fn render(&self, host: &mut dyn Host) {
        let hidden = self.is_hidden();
        for cta in &self.ctas {
            cta.apply(host, hidden);
        }
    }
}

impl Behavior for FloatingCta {
    fn name(&self) -> &'static str {
        "float-cta"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::Scroll, SignalKind::Resize, SignalKind::ClassMutation]
    }

    fn on_signal(&mut self, signal: &Signal, host: &mut dyn Host) {
        match signal {
            Signal::Scroll | Signal::Resize => {
                self.scrolling = true;
                let delay = if host.prefers_reduced_motion() {
                    Duration::ZERO
                } else {
                    self.idle_delay
                };
                self.idle.schedule(host.now(), delay);
                self.observe_footer(host);
                self.render(host);
            }
            Signal::ClassMutation { target } if *target == host.root() => {
                let open = host.has_class(*target, DRAWER_OPEN_CLASS);
                if open != self.drawer_open {
                    self.drawer_open = open;
                    self.render(host);
                }
            }
            _ => {}
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.idle.deadline()
    }

    fn on_deadline(&mut self, host: &mut dyn Host) {
        if self.idle.fire_if_due(host.now()) {
            self.scrolling = false;
            self.render(host);
        }
    }

    fn describe(&self) -> String {
        format!(
            "{} scrolling={} drawer={} footer={}",
            if self.is_hidden() { "hidden" } else { "shown" },
            self.scrolling,
            self.drawer_open,
            self.near_footer
        )
    }
}
