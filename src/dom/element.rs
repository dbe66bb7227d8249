//! Element identity, geometry and construction specs.

use std::collections::BTreeMap;

/// Index into the page arena.
pub type ElementId = usize;

/// Viewport-relative bounding box (what a bounding-rect query returns).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical overlap with another rect.
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        other.bottom() > self.top && other.top < self.bottom()
    }
}

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Everything needed to insert an element into a page.
///
/// Geometry is in document coordinates; `fixed` elements ignore scrolling.
/// A `width` of `None` spans the viewport.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    pub selectors: Vec<String>,
    pub top: f64,
    pub left: f64,
    pub width: Option<f64>,
    pub height: f64,
    pub fixed: bool,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub hidden: bool,
    pub open: bool,
}

impl ElementSpec {
    pub fn new(selector: &str) -> Self {
        Self {
            selectors: vec![selector.to_string()],
            ..Self::default()
        }
    }

    /// Another selector this element answers to.
    pub fn also(mut self, selector: &str) -> Self {
        self.selectors.push(selector.to_string());
        self
    }

    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn left(mut self, left: f64) -> Self {
        self.left = left;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Computed style value (custom properties, `transition-duration`, ...).
    pub fn style(mut self, name: &str, value: &str) -> Self {
        self.style.insert(name.to_string(), value.to_string());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }
}
