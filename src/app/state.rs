//! Central preview state.
//!
//! The page, the installed behaviors and the user configuration live here;
//! rendering reads `&AppState`, input handling mutates `&mut AppState`.
//! Every page change goes through a method that also dispatches the matching
//! signal, so behaviors see exactly what a browser would report.

use std::path::PathBuf;
use std::time::Duration;

use page_motion::behaviors::{install, nav_roll, Runtime};
use page_motion::config::AppConfig;
use page_motion::core::timer::DeferredTimer;
use page_motion::demo::demo_page;
use page_motion::dom::element::ElementId;
use page_motion::dom::env::{Effects, Environment};
use page_motion::dom::page::Page;
use page_motion::dom::signal::Signal;

pub const MOBILE_SIZE: (f64, f64) = (390.0, 844.0);
const TOUCH_POINTS: u32 = 5;
/// Length of the nav-roll animation the stylesheet would run.
const ROLL_DURATION: Duration = Duration::from_millis(600);

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    Controls,
}

/// Top-level preview state.
pub struct AppState {
    pub page: Page,
    pub runtime: Runtime,
    pub config: AppConfig,
    pub config_path: PathBuf,
    /// Viewport to return to when leaving the mobile size.
    pub desktop_size: (f64, f64),
    pub mobile: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub active_view: ActiveView,
    /// Highlighted row in the controls popup.
    pub controls_selected: usize,
    /// The controls popup is waiting for a key to bind.
    pub awaiting_rebind: bool,
    pub submenu_cursor: usize,
    pub nav_cursor: usize,
    pub footer_cursor: usize,
    /// Label whose roll animation is running, and when it ends.
    rolling: Option<ElementId>,
    roll_end: DeferredTimer,
    pub frames: u64,
}

impl AppState {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        let desktop_size = (config.viewport_width, config.viewport_height);
        let page = demo_page(desktop_size.0, desktop_size.1);
        Self {
            page,
            runtime: Runtime::new(),
            config,
            config_path,
            desktop_size,
            mobile: false,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            controls_selected: 0,
            awaiting_rebind: false,
            submenu_cursor: 0,
            nav_cursor: 0,
            footer_cursor: 0,
            rolling: None,
            roll_end: DeferredTimer::new(),
            frames: 0,
        }
    }

    /// Apply the initial environment and install the behaviors.
    pub fn start(&mut self, reduced_motion: bool, touch: bool) {
        self.page.set_reduced_motion(reduced_motion);
        self.set_touch(touch);
        self.runtime = install(&mut self.page, &self.config.motion);
        self.dispatch(Signal::Ready);
    }

    pub fn dispatch(&mut self, signal: Signal) {
        self.runtime.dispatch(&signal, &mut self.page);
    }

    pub fn scroll_by(&mut self, dy: f64) {
        if self.page.scroll_by(dy) {
            self.dispatch(Signal::Scroll);
        }
    }

    pub fn scroll_to(&mut self, y: f64) {
        if self.page.set_scroll(y) {
            self.dispatch(Signal::Scroll);
        }
    }

    pub fn toggle_mobile(&mut self) {
        self.mobile = !self.mobile;
        let (w, h) = if self.mobile { MOBILE_SIZE } else { self.desktop_size };
        self.page.resize(w, h);
        self.dispatch(Signal::Resize);
        self.dispatch(Signal::MediaChange);
        self.status_message = Some(format!("viewport {w}x{h}"));
    }

    pub fn toggle_reduced_motion(&mut self) {
        let on = !self.page.prefers_reduced_motion();
        self.page.set_reduced_motion(on);
        self.dispatch(Signal::ReducedMotionChange);
        self.status_message = Some(format!("reduced motion {}", if on { "on" } else { "off" }));
    }

    fn set_touch(&mut self, on: bool) {
        self.page.set_touch_points(if on { TOUCH_POINTS } else { 0 });
        self.page.set_hover_none(on);
    }

    pub fn toggle_touch(&mut self) {
        let on = !self.page.is_touch_like();
        self.set_touch(on);
        self.status_message = Some(format!("touch input {}", if on { "on" } else { "off" }));
    }

    pub fn click(&mut self, target: ElementId) {
        self.dispatch(Signal::Click { target });
    }

    pub fn click_first(&mut self, selector: &str) {
        match self.page.query(selector) {
            Some(target) => self.click(target),
            None => self.status_message = Some(format!("no {selector} on this page")),
        }
    }

    /// Tap the next submenu trigger.
    pub fn tap_next_submenu(&mut self, selector: &str) {
        let triggers = self.page.query_all(selector);
        if triggers.is_empty() {
            return;
        }
        let target = triggers[self.submenu_cursor % triggers.len()];
        self.submenu_cursor += 1;
        self.click(target);
    }

    /// Open the next footer disclosure the way a user click would.
    pub fn open_next_footer_item(&mut self, selector: &str) {
        let items = self.page.query_all(selector);
        if items.is_empty() {
            return;
        }
        let target = items[self.footer_cursor % items.len()];
        self.footer_cursor += 1;
        let open = !self.page.is_open(target);
        self.page.set_open(target, open);
        self.dispatch(Signal::DetailsToggle { target });
    }

    /// Hover the next nav link and, if a roll started, schedule its end.
    pub fn hover_next_nav_link(&mut self) {
        let links = self.page.query_all(nav_roll::LINK_SELECTOR);
        if links.is_empty() {
            return;
        }
        let link = links[self.nav_cursor % links.len()];
        self.nav_cursor += 1;
        self.dispatch(Signal::PointerEnter { target: link });

        if self.page.has_class(link, nav_roll::ROLLING_CLASS) && self.rolling.is_none() {
            self.rolling = self.page.query_within(link, nav_roll::LABEL_SELECTOR);
            self.roll_end.schedule(self.page.now(), ROLL_DURATION);
        }
    }

    /// Advance the page clock by one frame and run whatever became due.
    pub fn tick(&mut self, dt: Duration) {
        self.page.advance(dt);
        if self.runtime.run_frame(&mut self.page) > 0 {
            self.frames += 1;
        }
        self.runtime.fire_timers(&mut self.page);

        if self.roll_end.fire_if_due(self.page.now()) {
            if let Some(target) = self.rolling.take() {
                self.dispatch(Signal::AnimationEnd {
                    target,
                    name: "nav-roll".into(),
                });
            }
        }
    }
}
