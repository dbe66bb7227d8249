//! Page behaviors and the runtime that dispatches signals to them.
//!
//! Every behavior is a self-contained state object built by a `setup`
//! constructor that returns `None` when its elements are missing.  The
//! [`Runtime`] holds installed behaviors behind [`SubscriptionHandle`]s,
//! filters signals by each behavior's declared interests, runs frame
//! callbacks for behaviors with a pending frame, and fires due timers.

pub mod dark_header;
pub mod drawer;
pub mod float_cta;
pub mod footer_accordion;
pub mod half_image;
pub mod header;
pub mod hero;
pub mod nav_roll;
pub mod phone;
pub mod submenu;
pub mod wobble;

use std::time::Duration;

use crate::config::MotionConfig;
use crate::dom::env::Host;
use crate::dom::signal::{Signal, SignalKind};

/// Upper bound on observer rounds triggered by a single dispatch.
const MAX_MUTATION_ROUNDS: usize = 4;

/// A page behavior with its own state.
pub trait Behavior {
    /// Short name for logs and the preview inspector.
    fn name(&self) -> &'static str;

    /// Signal kinds this behavior wants delivered.
    fn interests(&self) -> &'static [SignalKind];

    fn on_signal(&mut self, signal: &Signal, host: &mut dyn Host);

    /// `true` while a frame callback is pending.
    fn frame_requested(&self) -> bool {
        false
    }

    /// Runs at most once per rendering frame, only while a frame is pending.
    fn on_frame(&mut self, _host: &mut dyn Host) {}

    /// Earliest pending timer deadline, if any.
    fn next_deadline(&self) -> Option<Duration> {
        None
    }

    /// Called when `now >= next_deadline()`.
    fn on_deadline(&mut self, _host: &mut dyn Host) {}

    /// One-line state summary for the preview.
    fn describe(&self) -> String {
        String::new()
    }
}

/// Opaque subscription token returned by [`Runtime::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

struct Slot {
    handle: SubscriptionHandle,
    behavior: Box<dyn Behavior>,
}

/// Owns installed behaviors and routes signals, frames and timers to them.
#[derive(Default)]
pub struct Runtime {
    slots: Vec<Slot>,
    next_id: u64,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a behavior.  Signals matching its interests are delivered until
    /// the returned handle is passed to [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&mut self, behavior: Box<dyn Behavior>) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_id);
        self.next_id += 1;
        tracing::debug!(name = behavior.name(), id = handle.0, "behavior subscribed");
        self.slots.push(Slot { handle, behavior });
        handle
    }

    /// Install a behavior whose setup may have found nothing to attach to.
    pub fn subscribe_opt<B: Behavior + 'static>(&mut self, behavior: Option<B>) -> Option<SubscriptionHandle> {
        behavior.map(|b| self.subscribe(Box::new(b)))
    }

    /// Remove a behavior.  Returns `false` if the handle was unknown.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.handle != handle);
        self.slots.len() != before
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Deliver a signal, then any class-mutation notifications it caused.
    pub fn dispatch(&mut self, signal: &Signal, host: &mut dyn Host) {
        self.deliver(signal, host);
        self.flush_mutations(host);
    }

    fn deliver(&mut self, signal: &Signal, host: &mut dyn Host) {
        let kind = signal.kind();
        for slot in &mut self.slots {
            if slot.behavior.interests().contains(&kind) {
                slot.behavior.on_signal(signal, host);
            }
        }
    }

    fn flush_mutations(&mut self, host: &mut dyn Host) {
        for _ in 0..MAX_MUTATION_ROUNDS {
            let mutated = host.take_class_mutations();
            if mutated.is_empty() {
                return;
            }
            for target in mutated {
                self.deliver(&Signal::ClassMutation { target }, host);
            }
        }
        // Anything left over is dropped rather than looping forever.
        host.take_class_mutations();
    }

    /// `true` if any behavior has a pending frame.
    pub fn wants_frame(&self) -> bool {
        self.slots.iter().any(|s| s.behavior.frame_requested())
    }

    /// Run one rendering frame.  Returns how many callbacks ran.
    pub fn run_frame(&mut self, host: &mut dyn Host) -> usize {
        let mut ran = 0;
        for slot in &mut self.slots {
            if slot.behavior.frame_requested() {
                slot.behavior.on_frame(host);
                ran += 1;
            }
        }
        if ran > 0 {
            tracing::trace!(ran, "frame");
        }
        self.flush_mutations(host);
        ran
    }

    /// Earliest timer deadline across all behaviors.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.slots.iter().filter_map(|s| s.behavior.next_deadline()).min()
    }

    /// Fire every timer that is due at `host.now()`.  Returns how many fired.
    pub fn fire_timers(&mut self, host: &mut dyn Host) -> usize {
        let now = host.now();
        let mut fired = 0;
        for slot in &mut self.slots {
            if slot.behavior.next_deadline().is_some_and(|d| d <= now) {
                slot.behavior.on_deadline(host);
                fired += 1;
            }
        }
        self.flush_mutations(host);
        fired
    }

    /// `(name, summary)` for every installed behavior.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        self.slots
            .iter()
            .map(|s| (s.behavior.name(), s.behavior.describe()))
            .collect()
    }
}

/// Build every behavior the page supports and subscribe the ones whose
/// elements exist.  Setup runs against the live page, so initial effects
/// (hero progress, header state, CTA visibility) are applied here.
pub fn install(host: &mut dyn Host, motion: &MotionConfig) -> Runtime {
    let mut rt = Runtime::new();

    rt.subscribe_opt(header::HeaderHide::setup(host, header::HeaderConfig::links(motion)));
    rt.subscribe_opt(submenu::Submenu::setup(host));
    rt.subscribe_opt(nav_roll::NavRoll::setup(host));
    rt.subscribe_opt(drawer::Drawer::setup(host, motion));
    rt.subscribe_opt(footer_accordion::FooterAccordion::setup(host));
    rt.subscribe_opt(hero::HeroShrink::setup(host, motion));
    rt.subscribe_opt(float_cta::FloatingCta::setup(host, motion));
    rt.subscribe_opt(wobble::Wobble::setup(host, motion));
    rt.subscribe_opt(half_image::HalfImageShrink::setup(host));
    rt.subscribe_opt(half_image::HalfImageStatic::setup(host, motion));
    rt.subscribe_opt(dark_header::DarkHeader::setup(host));
    rt.subscribe_opt(header::HeaderHide::setup(host, header::HeaderConfig::mobile(motion)));
    rt.subscribe_opt(phone::PhoneLinks::setup(host));

    // Setup may already have toggled observed classes.
    rt.flush_mutations(host);
    tracing::debug!(installed = rt.len(), "page behaviors installed");
    rt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::element::ElementSpec;
    use crate::dom::env::{Effects, Environment};
    use crate::dom::page::Page;

    /// Counts deliveries and keeps a frame pending until told to stop.
    struct Probe {
        signals: usize,
        frames: usize,
        pending: bool,
        rearm: usize,
    }

    impl Behavior for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn interests(&self) -> &'static [SignalKind] {
            &[SignalKind::Scroll]
        }

        fn on_signal(&mut self, _signal: &Signal, _host: &mut dyn Host) {
            self.signals += 1;
            self.pending = true;
        }

        fn frame_requested(&self) -> bool {
            self.pending
        }

        fn on_frame(&mut self, _host: &mut dyn Host) {
            self.pending = false;
            self.frames += 1;
            if self.rearm > 0 {
                self.rearm -= 1;
                self.pending = true;
            }
        }
    }

    fn probe() -> Probe {
        Probe { signals: 0, frames: 0, pending: false, rearm: 0 }
    }

    #[test]
    fn test_interest_filtering() {
        let mut page = Page::new(1280.0, 800.0);
        let mut rt = Runtime::new();
        rt.subscribe(Box::new(probe()));
        rt.dispatch(&Signal::Resize, &mut page);
        assert!(!rt.wants_frame());
        rt.dispatch(&Signal::Scroll, &mut page);
        assert!(rt.wants_frame());
    }

    #[test]
    fn test_one_frame_per_burst() {
        let mut page = Page::new(1280.0, 800.0);
        let mut rt = Runtime::new();
        rt.subscribe(Box::new(probe()));
        for _ in 0..50 {
            rt.dispatch(&Signal::Scroll, &mut page);
        }
        assert_eq!(rt.run_frame(&mut page), 1);
        assert_eq!(rt.run_frame(&mut page), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut page = Page::new(1280.0, 800.0);
        let mut rt = Runtime::new();
        let h = rt.subscribe(Box::new(probe()));
        assert!(rt.unsubscribe(h));
        assert!(!rt.unsubscribe(h));
        rt.dispatch(&Signal::Scroll, &mut page);
        assert!(!rt.wants_frame());
        assert!(rt.is_empty());
    }

    #[test]
    fn test_install_on_empty_page_is_inert() {
        let mut page = Page::new(1280.0, 800.0);
        page.append(page.root(), ElementSpec::new("main").at(0.0, 2000.0));
        let mut rt = install(&mut page, &MotionConfig::default());
        // Only the page-wide behaviors without required elements remain.
        let names: Vec<_> = rt.describe().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["half-image-static", "phone-links"]);
        page.set_scroll(500.0);
        rt.dispatch(&Signal::Scroll, &mut page);
        assert_eq!(rt.run_frame(&mut page), 0);
        assert!(page.take_class_mutations().is_empty());
        assert!(!page.has_class(page.root(), "is-drawer-open"));
    }
}
