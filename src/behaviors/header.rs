//! Header hide-on-scroll.
//!
//! Two instances run on the same header: the desktop one hides the link row
//! (`is-links-hidden`), the mobile one hides the whole bar
//! (`is-mobile-hidden`) only while the viewport is narrow and brings it back
//! once scrolling pauses.

use std::time::Duration;

use crate::config::MotionConfig;
use crate::core::effect::ClassToggle;
use crate::core::hysteresis::{HysteresisThreshold, HysteresisTracker, Visibility};
use crate::core::scheduler::FrameScheduler;
use crate::core::timer::DeferredTimer;
use crate::dom::env::{Host, MediaQuery};
use crate::dom::signal::{Signal, SignalKind};

use super::Behavior;

pub const HEADER_SELECTOR: &str = "[data-header]";

/// Per-instance header settings.
#[derive(Debug, Clone)]
pub struct HeaderConfig {
    pub name: &'static str,
    pub hidden_class: &'static str,
    pub top_reveal_px: f64,
    pub delta: f64,
    /// Only active while `(max-width: N)` matches.
    pub max_width: Option<f64>,
    /// Show again after scrolling has been idle this long.
    pub idle_reveal: Option<Duration>,
}

impl HeaderConfig {
    pub fn links(m: &MotionConfig) -> Self {
        Self {
            name: "header-links",
            hidden_class: "is-links-hidden",
            top_reveal_px: m.links_top_reveal_px,
            delta: m.links_delta,
            max_width: None,
            idle_reveal: None,
        }
    }

    pub fn mobile(m: &MotionConfig) -> Self {
        Self {
            name: "header-mobile",
            hidden_class: "is-mobile-hidden",
            top_reveal_px: m.mobile_top_reveal_px,
            delta: m.mobile_delta,
            max_width: Some(m.mobile_max_width),
            idle_reveal: Some(Duration::from_millis(m.mobile_idle_ms)),
        }
    }
}

pub struct HeaderHide {
    name: &'static str,
    class: ClassToggle,
    tracker: HysteresisTracker,
    max_width: Option<f64>,
    idle_reveal: Option<Duration>,
    idle: DeferredTimer,
    frames: FrameScheduler,
}

impl HeaderHide {
    /// `None` when the page has no header or the threshold is unusable.
    pub fn setup(host: &mut dyn Host, cfg: HeaderConfig) -> Option<Self> {
        let header = host.query(HEADER_SELECTOR)?;
        let threshold = match HysteresisThreshold::new(cfg.top_reveal_px, cfg.delta) {
            Ok(t) => t,
            Err(err) => {
                tracing::warn!(name = cfg.name, %err, "header behavior disabled");
                return None;
            }
        };

        let this = Self {
            name: cfg.name,
            class: ClassToggle::new(header, cfg.hidden_class),
            tracker: HysteresisTracker::new(threshold, host.scroll_y()),
            max_width: cfg.max_width,
            idle_reveal: cfg.idle_reveal,
            idle: DeferredTimer::new(),
            frames: FrameScheduler::new(),
        };
        if this.max_width.is_some() && this.is_active(host) {
            this.show(host);
        }
        Some(this)
    }

    /// Media gate; instances without one are always active.
    fn is_active(&self, host: &dyn Host) -> bool {
        self.max_width
            .map_or(true, |w| host.matches_media(MediaQuery::MaxWidth(w)))
    }

    fn show(&self, host: &mut dyn Host) {
        self.class.apply_visibility(host, Visibility::Shown);
    }

    pub fn state(&self) -> Visibility {
        self.tracker.state()
    }

    fn update(&mut self, host: &mut dyn Host) {
        if !self.is_active(host) {
            self.tracker.reveal();
            self.show(host);
            return;
        }

        let y = host.scroll_y();
        let before = self.tracker.state();
        if let Some(resolved) = self.tracker.sample(y) {
            if resolved != before {
                tracing::debug!(name = self.name, y, ?resolved, "header visibility flipped");
            }
            self.class.apply_visibility(host, resolved);
        }
    }
}

impl Behavior for HeaderHide {
    fn name(&self) -> &'static str {
        self.name
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::Scroll, SignalKind::Resize]
    }

    fn on_signal(&mut self, signal: &Signal, host: &mut dyn Host) {
        match signal {
            Signal::Scroll => {
                if let Some(delay) = self.idle_reveal {
                    if self.is_active(host) {
                        self.idle.schedule(host.now(), delay);
                    }
                }
                self.frames.request();
            }
            Signal::Resize if self.max_width.is_some() => {
                self.tracker.rebase(host.scroll_y());
                if !self.is_active(host) {
                    self.tracker.reveal();
                    self.show(host);
                }
            }
            _ => {}
        }
    }

    fn frame_requested(&self) -> bool {
        self.frames.is_pending()
    }

    fn on_frame(&mut self, host: &mut dyn Host) {
        if self.frames.begin_frame() {
            self.update(host);
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.idle.deadline()
    }

    fn on_deadline(&mut self, host: &mut dyn Host) {
        if self.idle.fire_if_due(host.now()) {
            self.tracker.reveal();
            self.show(host);
        }
    }

    fn describe(&self) -> String {
        format!("{:?} (last_y {:.0})", self.tracker.state(), self.tracker.last_y())
    }
}
