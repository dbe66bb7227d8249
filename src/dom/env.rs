//! Capability traits between behaviors and whatever hosts the page.

use std::time::Duration;

use super::element::{ElementId, ElementSpec, Rect, Viewport};
use crate::core::sampler::style_number_or;

/// Media conditions a behavior may gate on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaQuery {
    /// `(max-width: Npx)`.
    MaxWidth(f64),
    /// `(hover: none)`.
    HoverNone,
    /// `(prefers-reduced-motion: reduce)`.
    PrefersReducedMotion,
}

/// Read side: live page state sampled at call time.
pub trait Environment {
    /// Time since the page loaded.
    fn now(&self) -> Duration;
    fn scroll_y(&self) -> f64;
    fn viewport(&self) -> Viewport;
    /// The document element.
    fn root(&self) -> ElementId;

    /// All elements answering to `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<ElementId>;
    /// Descendants of `scope` answering to `selector`, in document order.
    fn query_all_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId>;
    /// Nearest inclusive ancestor answering to `selector`.
    fn closest(&self, el: ElementId, selector: &str) -> Option<ElementId>;
    /// Whether `el` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, el: ElementId) -> bool;

    fn query(&self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_within(&self, scope: ElementId, selector: &str) -> Option<ElementId> {
        self.query_all_within(scope, selector).into_iter().next()
    }

    /// Viewport-relative bounding box.
    fn measure(&self, el: ElementId) -> Rect;
    /// Raw computed style value.
    fn style_value(&self, el: ElementId, name: &str) -> Option<String>;

    /// Style value parsed as a decimal number, or `fallback` when missing or
    /// malformed.  Never returns NaN unless `fallback` is NaN.
    fn read_style_number(&self, el: ElementId, name: &str, fallback: f64) -> f64 {
        style_number_or(self.style_value(el, name).as_deref(), fallback)
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool;
    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;
    fn text(&self, el: ElementId) -> String;
    fn is_open(&self, el: ElementId) -> bool;
    fn active_element(&self) -> Option<ElementId>;

    fn matches_media(&self, query: MediaQuery) -> bool;
    fn max_touch_points(&self) -> u32;

    fn prefers_reduced_motion(&self) -> bool {
        self.matches_media(MediaQuery::PrefersReducedMotion)
    }

    /// Primary input cannot hover, or a touch screen is present.
    fn is_touch_like(&self) -> bool {
        self.matches_media(MediaQuery::HoverNone) || self.max_touch_points() > 0
    }
}

/// Write side: every observable output a behavior can produce.
///
/// All setters are idempotent; implementations should not count a write that
/// leaves the value unchanged as a mutation.
pub trait Effects {
    fn set_class(&mut self, el: ElementId, class: &str, on: bool);
    fn set_property(&mut self, el: ElementId, name: &str, value: &str);
    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str);
    fn set_hidden(&mut self, el: ElementId, hidden: bool);
    fn set_open(&mut self, el: ElementId, open: bool);
    fn set_text(&mut self, el: ElementId, text: &str);
    fn focus(&mut self, el: ElementId);
    fn append_element(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId;
    /// Elements whose class list changed since the last call, deduplicated.
    fn take_class_mutations(&mut self) -> Vec<ElementId>;
}

/// Both halves together; what the runtime hands to behaviors.
pub trait Host: Environment + Effects {}

impl<T: Environment + Effects + ?Sized> Host for T {}
