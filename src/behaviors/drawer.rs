//! Slide-in drawer menu with an accordion section.
//!
//! Opening unhides the drawer and adds `is-drawer-open` to the root on the
//! next frame so the slide transition has a starting point.  Closing removes
//! the class and completes (hide, restore aria, return focus) either when the
//! drawer reports its transition ended or when a fallback timer fires,
//! whichever comes first, and only once.

use std::time::Duration;

use crate::config::MotionConfig;
use crate::core::sampler::transition_seconds;
use crate::core::scheduler::FrameScheduler;
use crate::core::timer::DeferredTimer;
use crate::dom::element::ElementId;
use crate::dom::env::Host;
use crate::dom::signal::{Signal, SignalKind};

use super::Behavior;

pub const DRAWER_OPEN_CLASS: &str = "is-drawer-open";
pub const TOGGLE_SELECTOR: &str = "[data-drawer-toggle]";
pub const DRAWER_SELECTOR: &str = "[data-drawer]";
pub const OVERLAY_SELECTOR: &str = "[data-drawer-overlay]";
pub const CLOSE_SELECTOR: &str = "[data-drawer-close]";

struct Accordion {
    trigger: ElementId,
    panel: ElementId,
    icon: ElementId,
}

impl Accordion {
    fn find(host: &dyn Host, drawer: ElementId) -> Option<Self> {
        let acc = host.query_within(drawer, "[data-acc]")?;
        Some(Self {
            trigger: host.query_within(acc, "[data-acc-trigger]")?,
            panel: host.query_within(acc, "[data-acc-panel]")?,
            icon: host.query_within(acc, ".drawer-acc-icon")?,
        })
    }

    fn toggle(&self, host: &mut dyn Host) {
        let expanded = host.attribute(self.trigger, "aria-expanded").as_deref() == Some("true");
        host.set_attribute(self.trigger, "aria-expanded", if expanded { "false" } else { "true" });
        host.set_hidden(self.panel, expanded);
        host.set_text(self.icon, if expanded { "+" } else { "\u{2212}" });
    }
}

pub struct Drawer {
    toggle: ElementId,
    drawer: ElementId,
    overlay: Option<ElementId>,
    close_button: Option<ElementId>,
    accordion: Option<Accordion>,
    last_active: Option<ElementId>,
    open_frame: FrameScheduler,
    close_timer: DeferredTimer,
    awaiting_transition: bool,
    grace: Duration,
    completed_closes: u32,
}

impl Drawer {
    pub fn setup(host: &mut dyn Host, motion: &MotionConfig) -> Option<Self> {
        let toggle = host.query(TOGGLE_SELECTOR)?;
        let drawer = host.query(DRAWER_SELECTOR)?;
        Some(Self {
            toggle,
            drawer,
            overlay: host.query(OVERLAY_SELECTOR),
            close_button: host.query(CLOSE_SELECTOR),
            accordion: Accordion::find(host, drawer),
            last_active: None,
            open_frame: FrameScheduler::new(),
            close_timer: DeferredTimer::new(),
            awaiting_transition: false,
            grace: Duration::from_millis(motion.drawer_close_grace_ms),
            completed_closes: 0,
        })
    }

    fn is_open(&self, host: &dyn Host) -> bool {
        host.has_class(host.root(), DRAWER_OPEN_CLASS)
    }

    /// Number of close sequences that ran to completion.
    pub fn completed_closes(&self) -> u32 {
        self.completed_closes
    }

    fn set_drawer_hidden(&self, host: &mut dyn Host, hidden: bool) {
        host.set_hidden(self.drawer, hidden);
        if let Some(overlay) = self.overlay {
            host.set_hidden(overlay, true);
        }
    }

    pub fn open(&mut self, host: &mut dyn Host) {
        if self.is_open(host) {
            return;
        }
        // Reopening mid-close abandons that close.
        self.close_timer.cancel();
        self.awaiting_transition = false;

        self.last_active = host.active_element();
        self.set_drawer_hidden(host, false);
        self.open_frame.request();

        host.set_attribute(self.toggle, "aria-expanded", "true");
        host.set_attribute(self.toggle, "aria-label", "Close menu");
        tracing::debug!("drawer opening");
    }

    pub fn close(&mut self, host: &mut dyn Host) {
        if !self.is_open(host) {
            return;
        }
        let root = host.root();
        host.set_class(root, DRAWER_OPEN_CLASS, false);

        self.close_timer.cancel();
        self.awaiting_transition = false;

        let duration = host
            .style_value(self.drawer, "transition-duration")
            .map(|d| transition_seconds(&d))
            .unwrap_or(0.0);

        if host.prefers_reduced_motion() || duration == 0.0 {
            self.finish_close(host);
            return;
        }

        self.awaiting_transition = true;
        let fallback_ms = (duration * 1000.0 + self.grace.as_millis() as f64).ceil();
        self.close_timer
            .schedule(host.now(), Duration::from_millis(fallback_ms as u64));
    }

    fn finish_close(&mut self, host: &mut dyn Host) {
        self.awaiting_transition = false;
        self.close_timer.cancel();
        self.set_drawer_hidden(host, true);

        host.set_attribute(self.toggle, "aria-expanded", "false");
        host.set_attribute(self.toggle, "aria-label", "Open menu");

        if let Some(el) = self.last_active.take() {
            host.focus(el);
        }
        self.completed_closes += 1;
        tracing::debug!(closes = self.completed_closes, "drawer closed");
    }

    fn on_click(&mut self, target: ElementId, host: &mut dyn Host) {
        if host.contains(self.toggle, target) {
            if self.is_open(host) {
                self.close(host);
            } else {
                self.open(host);
            }
            return;
        }

        if self.close_button.is_some_and(|b| host.contains(b, target)) {
            self.close(host);
            return;
        }

        if let Some(acc) = &self.accordion {
            if host.contains(acc.trigger, target) {
                acc.toggle(host);
                return;
            }
        }

        if self.is_open(host) && !host.contains(self.drawer, target) {
            self.close(host);
        }
    }
}

impl Behavior for Drawer {
    fn name(&self) -> &'static str {
        "drawer"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::Click, SignalKind::TransitionEnd]
    }

    fn on_signal(&mut self, signal: &Signal, host: &mut dyn Host) {
        match signal {
            Signal::Click { target } => self.on_click(*target, host),
            Signal::TransitionEnd { target } if *target == self.drawer && self.awaiting_transition => {
                self.finish_close(host);
            }
            _ => {}
        }
    }

    fn frame_requested(&self) -> bool {
        self.open_frame.is_pending()
    }

    fn on_frame(&mut self, host: &mut dyn Host) {
        if self.open_frame.begin_frame() {
            let root = host.root();
            host.set_class(root, DRAWER_OPEN_CLASS, true);
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.close_timer.deadline()
    }

    fn on_deadline(&mut self, host: &mut dyn Host) {
        if self.close_timer.fire_if_due(host.now()) && self.awaiting_transition {
            self.finish_close(host);
        }
    }

    fn describe(&self) -> String {
        let state = if self.awaiting_transition {
            "closing"
        } else if self.open_frame.is_pending() {
            "opening"
        } else {
            "idle"
        };
        format!("{state}, {} closes", self.completed_closes)
    }
}
