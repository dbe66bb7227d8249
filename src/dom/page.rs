//! In-memory arena page.
//!
//! Elements live in a flat `Vec` and refer to each other by index, the same
//! way the directory tree arena does it.  Geometry is stored in document
//! coordinates; [`Environment::measure`] converts to viewport coordinates
//! using the current scroll offset.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use super::element::{ElementId, ElementSpec, Rect, Viewport};
use super::env::{Effects, Environment, MediaQuery};

/// Selector the document element answers to.
pub const ROOT_SELECTOR: &str = ":root";

/// A single element in the arena.
#[derive(Debug, Clone)]
pub struct Element {
    pub selectors: Vec<String>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub top: f64,
    pub left: f64,
    pub width: Option<f64>,
    pub height: f64,
    pub fixed: bool,
    pub text: String,
    pub classes: BTreeSet<String>,
    /// Inline style writes (custom properties and plain properties).
    pub properties: BTreeMap<String, String>,
    /// Computed style authored elsewhere.
    pub style: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    pub hidden: bool,
    pub open: bool,
}

impl Element {
    fn from_spec(spec: ElementSpec, parent: Option<ElementId>) -> Self {
        Self {
            selectors: spec.selectors,
            parent,
            children: Vec::new(),
            top: spec.top,
            left: spec.left,
            width: spec.width,
            height: spec.height,
            fixed: spec.fixed,
            text: spec.text,
            classes: BTreeSet::new(),
            properties: BTreeMap::new(),
            style: spec.style,
            attributes: spec.attributes,
            hidden: spec.hidden,
            open: spec.open,
        }
    }

    pub fn matches(&self, selector: &str) -> bool {
        self.selectors.iter().any(|s| s == selector)
    }

    /// First selector, used as a display label.
    pub fn label(&self) -> &str {
        self.selectors.first().map(String::as_str).unwrap_or("?")
    }
}

/// Headless page implementing both [`Environment`] and [`Effects`].
#[derive(Debug, Clone)]
pub struct Page {
    elements: Vec<Element>,
    root: ElementId,
    scroll_y: f64,
    viewport: Viewport,
    clock: Duration,
    reduced_motion: bool,
    hover_none: bool,
    touch_points: u32,
    active: Option<ElementId>,
    revision: u64,
    class_mutations: Vec<ElementId>,
}

impl Page {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let root = Element::from_spec(ElementSpec::new(ROOT_SELECTOR), None);
        Self {
            elements: vec![root],
            root: 0,
            scroll_y: 0.0,
            viewport: Viewport {
                width: viewport_width,
                height: viewport_height,
            },
            clock: Duration::ZERO,
            reduced_motion: false,
            hover_none: false,
            touch_points: 0,
            active: None,
            revision: 0,
            class_mutations: Vec::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Insert `spec` as the last child of `parent`.  An unknown `parent`
    /// falls back to the root.
    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let parent = if parent < self.elements.len() {
            parent
        } else {
            tracing::warn!(parent, "append to unknown element, using root");
            self.root
        };
        let id = self.elements.len();
        self.elements.push(Element::from_spec(spec, Some(parent)));
        self.elements[parent].children.push(id);
        self.revision += 1;
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Elements in document (pre-order) order.
    pub fn document_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.elements.len());
        self.collect(self.root, &mut out);
        out
    }

    fn collect(&self, id: ElementId, out: &mut Vec<ElementId>) {
        out.push(id);
        for &child in &self.elements[id].children {
            self.collect(child, out);
        }
    }

    /// Inline property written by a behavior.
    pub fn property(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(id)
            .and_then(|e| e.properties.get(name))
            .map(String::as_str)
    }

    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.elements.get(id).is_some_and(|e| e.hidden)
    }

    /// Bumped on every real change; unchanged writes leave it alone.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bottom edge of the lowest scrolling element.
    pub fn document_height(&self) -> f64 {
        self.elements
            .iter()
            .filter(|e| !e.fixed)
            .map(|e| e.top + e.height)
            .fold(self.viewport.height, f64::max)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    /// Set the scroll offset, clamped to the scrollable range.
    /// Returns `true` if the offset changed.
    pub fn set_scroll(&mut self, y: f64) -> bool {
        let y = y.clamp(0.0, self.max_scroll());
        if y == self.scroll_y {
            return false;
        }
        self.scroll_y = y;
        true
    }

    pub fn scroll_by(&mut self, dy: f64) -> bool {
        self.set_scroll(self.scroll_y + dy)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport { width, height };
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
    }

    pub fn set_reduced_motion(&mut self, on: bool) {
        self.reduced_motion = on;
    }

    pub fn set_hover_none(&mut self, on: bool) {
        self.hover_none = on;
    }

    pub fn set_touch_points(&mut self, n: u32) {
        self.touch_points = n;
    }

    fn ancestors_inclusive(&self, el: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(Some(el), move |&id| self.elements.get(id).and_then(|e| e.parent))
    }
}

impl Environment for Page {
    fn now(&self) -> Duration {
        self.clock
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|&id| self.elements[id].matches(selector))
            .collect()
    }

    fn query_all_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        if scope >= self.elements.len() {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.collect(scope, &mut out);
        out.into_iter()
            .skip(1)
            .filter(|&id| self.elements[id].matches(selector))
            .collect()
    }

    fn closest(&self, el: ElementId, selector: &str) -> Option<ElementId> {
        self.ancestors_inclusive(el)
            .find(|&id| self.elements.get(id).is_some_and(|e| e.matches(selector)))
    }

    fn contains(&self, ancestor: ElementId, el: ElementId) -> bool {
        self.ancestors_inclusive(el).any(|id| id == ancestor)
    }

    fn measure(&self, el: ElementId) -> Rect {
        let Some(e) = self.elements.get(el) else {
            return Rect::default();
        };
        let top = if e.fixed { e.top } else { e.top - self.scroll_y };
        Rect {
            top,
            left: e.left,
            width: e.width.unwrap_or(self.viewport.width),
            height: e.height,
        }
    }

    fn style_value(&self, el: ElementId, name: &str) -> Option<String> {
        let e = self.elements.get(el)?;
        e.properties.get(name).or_else(|| e.style.get(name)).cloned()
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.elements.get(el).is_some_and(|e| e.classes.contains(class))
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.elements.get(el)?.attributes.get(name).cloned()
    }

    fn text(&self, el: ElementId) -> String {
        self.elements.get(el).map(|e| e.text.clone()).unwrap_or_default()
    }

    fn is_open(&self, el: ElementId) -> bool {
        self.elements.get(el).is_some_and(|e| e.open)
    }

    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn matches_media(&self, query: MediaQuery) -> bool {
        match query {
            MediaQuery::MaxWidth(px) => self.viewport.width <= px,
            MediaQuery::HoverNone => self.hover_none,
            MediaQuery::PrefersReducedMotion => self.reduced_motion,
        }
    }

    fn max_touch_points(&self) -> u32 {
        self.touch_points
    }
}

impl Effects for Page {
    fn set_class(&mut self, el: ElementId, class: &str, on: bool) {
        let Some(e) = self.elements.get_mut(el) else {
            return;
        };
        let changed = if on {
            e.classes.insert(class.to_string())
        } else {
            e.classes.remove(class)
        };
        if changed {
            self.revision += 1;
            if !self.class_mutations.contains(&el) {
                self.class_mutations.push(el);
            }
        }
    }

    fn set_property(&mut self, el: ElementId, name: &str, value: &str) {
        let Some(e) = self.elements.get_mut(el) else {
            return;
        };
        if e.properties.get(name).map(String::as_str) == Some(value) {
            return;
        }
        e.properties.insert(name.to_string(), value.to_string());
        self.revision += 1;
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        let Some(e) = self.elements.get_mut(el) else {
            return;
        };
        if e.attributes.get(name).map(String::as_str) == Some(value) {
            return;
        }
        e.attributes.insert(name.to_string(), value.to_string());
        self.revision += 1;
    }

    fn set_hidden(&mut self, el: ElementId, hidden: bool) {
        if let Some(e) = self.elements.get_mut(el) {
            if e.hidden != hidden {
                e.hidden = hidden;
                self.revision += 1;
            }
        }
    }

    fn set_open(&mut self, el: ElementId, open: bool) {
        if let Some(e) = self.elements.get_mut(el) {
            if e.open != open {
                e.open = open;
                self.revision += 1;
            }
        }
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(e) = self.elements.get_mut(el) {
            if e.text != text {
                e.text = text.to_string();
                self.revision += 1;
            }
        }
    }

    fn focus(&mut self, el: ElementId) {
        if el < self.elements.len() {
            self.active = Some(el);
        }
    }

    fn append_element(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        self.append(parent, spec)
    }

    fn take_class_mutations(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.class_mutations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> (Page, ElementId, ElementId) {
        let mut page = Page::new(1280.0, 800.0);
        let section = page.append(
            page.root(),
            ElementSpec::new("[data-half-image]")
                .also(".half-image")
                .at(1000.0, 600.0)
                .style("--end-max", "480px"),
        );
        let circle = page.append(section, ElementSpec::new(".half-image__circle").at(1000.0, 600.0));
        (page, section, circle)
    }

    #[test]
    fn test_measure_is_viewport_relative() {
        let (mut page, section, _) = sample_page();
        assert_eq!(page.measure(section).top, 1000.0);
        page.set_scroll(400.0);
        let r = page.measure(section);
        assert_eq!(r.top, 600.0);
        assert_eq!(r.bottom(), 1200.0);
        assert_eq!(r.width, 1280.0);
    }

    #[test]
    fn test_fixed_elements_ignore_scroll() {
        let mut page = Page::new(1280.0, 800.0);
        let header = page.append(page.root(), ElementSpec::new(".site-header").at(0.0, 80.0).fixed());
        page.append(page.root(), ElementSpec::new("main").at(0.0, 3000.0));
        page.set_scroll(900.0);
        assert_eq!(page.measure(header).top, 0.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let (mut page, _, _) = sample_page();
        assert_eq!(page.max_scroll(), 800.0);
        page.set_scroll(5000.0);
        assert_eq!(page.scroll_y(), 800.0);
        assert!(!page.set_scroll(9000.0));
        page.scroll_by(-10_000.0);
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_queries_and_ancestry() {
        let (page, section, circle) = sample_page();
        assert_eq!(page.query(".half-image"), Some(section));
        assert_eq!(page.query_within(section, ".half-image__circle"), Some(circle));
        assert_eq!(page.closest(circle, "[data-half-image]"), Some(section));
        assert!(page.contains(section, circle));
        assert!(!page.contains(circle, section));
        assert_eq!(page.query(".missing"), None);
    }

    #[test]
    fn test_append_to_unknown_parent_uses_root() {
        let (mut page, _, _) = sample_page();
        let before = page.document_order().len();
        let el = page.append(999, ElementSpec::new(".stray"));
        assert_eq!(page.get(el).and_then(|e| e.parent), Some(page.root()));
        assert_eq!(page.document_order().len(), before + 1);
    }

    #[test]
    fn test_style_numbers_fall_back() {
        let (page, section, _) = sample_page();
        assert_eq!(page.read_style_number(section, "--end-max", 560.0), 480.0);
        assert_eq!(page.read_style_number(section, "--end-vw", 55.0), 55.0);
    }

    #[test]
    fn test_class_mutations_are_recorded_once() {
        let (mut page, section, _) = sample_page();
        page.set_class(section, "is-open", true);
        page.set_class(section, "is-open", true);
        page.set_class(section, "other", true);
        assert_eq!(page.take_class_mutations(), vec![section]);
        assert!(page.take_class_mutations().is_empty());
    }

    #[test]
    fn test_media_queries() {
        let mut page = Page::new(1280.0, 800.0);
        assert!(!page.matches_media(MediaQuery::MaxWidth(1024.0)));
        page.resize(390.0, 844.0);
        assert!(page.matches_media(MediaQuery::MaxWidth(1024.0)));
        assert!(!page.is_touch_like());
        page.set_touch_points(5);
        assert!(page.is_touch_like());
    }
}
