//! Effect writers: the only place core values become page mutations.
//!
//! Both writers are pure functions of their input value: they never read the
//! page back, and writing the same value twice is indistinguishable from
//! writing it once.

use crate::dom::element::ElementId;
use crate::dom::env::Effects;

use super::hysteresis::Visibility;

/// Class presence driven by a boolean.
#[derive(Debug, Clone)]
pub struct ClassToggle {
    pub element: ElementId,
    pub class: &'static str,
}

impl ClassToggle {
    pub fn new(element: ElementId, class: &'static str) -> Self {
        Self { element, class }
    }

    pub fn apply<E: Effects + ?Sized>(&self, effects: &mut E, on: bool) {
        effects.set_class(self.element, self.class, on);
    }

    /// Hidden visibility adds the class, shown removes it.
    pub fn apply_visibility<E: Effects + ?Sized>(&self, effects: &mut E, visibility: Visibility) {
        self.apply(effects, visibility.is_hidden());
    }
}

/// How a scalar is rendered into a property string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarFormat {
    /// Fixed number of decimals, no unit (`0.5000`).
    Fixed(usize),
    /// Shortest representation with a `px` suffix (`560px`).
    Pixels,
}

impl ScalarFormat {
    pub fn render(self, value: f64) -> String {
        match self {
            ScalarFormat::Fixed(decimals) => format!("{value:.decimals$}"),
            ScalarFormat::Pixels => format!("{value}px"),
        }
    }
}

/// A numeric custom property on one element.
#[derive(Debug, Clone)]
pub struct PropertyWriter {
    pub element: ElementId,
    pub name: &'static str,
    pub format: ScalarFormat,
}

impl PropertyWriter {
    pub fn new(element: ElementId, name: &'static str, format: ScalarFormat) -> Self {
        Self { element, name, format }
    }

    pub fn apply<E: Effects + ?Sized>(&self, effects: &mut E, value: f64) {
        effects.set_property(self.element, self.name, &self.format.render(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::element::ElementSpec;
    use crate::dom::env::Environment;
    use crate::dom::page::Page;

    #[test]
    fn test_scalar_formats() {
        assert_eq!(ScalarFormat::Fixed(4).render(0.5), "0.5000");
        assert_eq!(ScalarFormat::Pixels.render(560.0), "560px");
        assert_eq!(ScalarFormat::Pixels.render(312.5), "312.5px");
    }

    #[test]
    fn test_class_toggle_is_idempotent() {
        let mut page = Page::new(1280.0, 800.0);
        let el = page.append(page.root(), ElementSpec::new("[data-header]"));
        let toggle = ClassToggle::new(el, "is-links-hidden");

        toggle.apply_visibility(&mut page, Visibility::Hidden);
        let rev = page.revision();
        toggle.apply_visibility(&mut page, Visibility::Hidden);
        assert_eq!(page.revision(), rev);
        assert!(page.has_class(el, "is-links-hidden"));

        toggle.apply_visibility(&mut page, Visibility::Shown);
        assert!(!page.has_class(el, "is-links-hidden"));
    }

    #[test]
    fn test_property_writer_is_idempotent() {
        let mut page = Page::new(1280.0, 800.0);
        let el = page.append(page.root(), ElementSpec::new(".hero.hero-bubble"));
        let writer = PropertyWriter::new(el, "--shrink", ScalarFormat::Fixed(4));

        writer.apply(&mut page, 0.25);
        let rev = page.revision();
        writer.apply(&mut page, 0.25);
        assert_eq!(page.revision(), rev);
        assert_eq!(page.property(el, "--shrink"), Some("0.2500"));
    }
}
