//! Touch-aware dropdown submenus.
//!
//! On hover-capable pointers the submenu opens through CSS alone.  On touch
//! input a tap on the trigger toggles it; a tap anywhere outside every
//! submenu item, or Escape, closes them all.

use crate::dom::element::ElementId;
use crate::dom::env::Host;
use crate::dom::signal::{Signal, SignalKind};

use super::Behavior;

pub const TRIGGER_SELECTOR: &str = "[data-submenu-trigger]";
pub const ITEM_SELECTOR: &str = ".nav-item--has-submenu";
pub const OPEN_CLASS: &str = "is-open";

struct Entry {
    trigger: ElementId,
    item: ElementId,
}

pub struct Submenu {
    entries: Vec<Entry>,
}

impl Submenu {
    pub fn setup(host: &mut dyn Host) -> Option<Self> {
        let entries: Vec<Entry> = host
            .query_all(TRIGGER_SELECTOR)
            .into_iter()
            .filter_map(|trigger| {
                let item = host.closest(trigger, ITEM_SELECTOR)?;
                Some(Entry { trigger, item })
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        Some(Self { entries })
    }

    fn close_all(&self, host: &mut dyn Host) {
        for e in &self.entries {
            host.set_class(e.item, OPEN_CLASS, false);
            host.set_attribute(e.trigger, "aria-expanded", "false");
        }
    }

    fn on_click(&self, target: ElementId, host: &mut dyn Host) {
        let tapped = self.entries.iter().find(|e| host.contains(e.trigger, target));
        if let Some(entry) = tapped {
            if host.is_touch_like() {
                let was_open = host.has_class(entry.item, OPEN_CLASS);
                self.close_all(host);
                if !was_open {
                    host.set_class(entry.item, OPEN_CLASS, true);
                    host.set_attribute(entry.trigger, "aria-expanded", "true");
                }
            }
        }

        if host.closest(target, ITEM_SELECTOR).is_none() {
            self.close_all(host);
        }
    }

    pub fn open_count(&self, host: &dyn Host) -> usize {
        self.entries
            .iter()
            .filter(|e| host.has_class(e.item, OPEN_CLASS))
            .count()
    }
}

impl Behavior for Submenu {
    fn name(&self) -> &'static str {
        "submenu"
    }

    fn interests(&self) -> &'static [SignalKind] {
        &[SignalKind::Click, SignalKind::KeyDown]
    }

    fn on_signal(&mut self, signal: &Signal, host: &mut dyn Host) {
        match signal {
            Signal::Click { target } => self.on_click(*target, host),
            Signal::KeyDown { key } if key == "Escape" => self.close_all(host),
            _ => {}
        }
    }

    fn describe(&self) -> String {
        format!("{} submenu(s)", self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::element::ElementSpec;
    use crate::dom::env::Environment;
    use crate::dom::page::Page;

    fn page() -> (Page, [ElementId; 4], ElementId) {
        let mut page = Page::new(390.0, 844.0);
        let root = page.root();
        let a = page.append(root, ElementSpec::new(ITEM_SELECTOR));
        let ta = page.append(a, ElementSpec::new(TRIGGER_SELECTOR));
        let b = page.append(root, ElementSpec::new(ITEM_SELECTOR));
        let tb = page.append(b, ElementSpec::new(TRIGGER_SELECTOR));
        let body = page.append(root, ElementSpec::new("main"));
        (page, [a, ta, b, tb], body)
    }

    fn click(s: &mut Submenu, page: &mut Page, target: ElementId) {
        s.on_signal(&Signal::Click { target }, page);
    }

    #[test]
    fn test_hover_pointer_ignores_trigger_taps() {
        let (mut page, [a, ta, ..], _) = page();
        let mut s = Submenu::setup(&mut page).unwrap();
        click(&mut s, &mut page, ta);
        assert!(!page.has_class(a, OPEN_CLASS));
    }

    #[test]
    fn test_touch_taps_are_exclusive_and_toggle() {
        let (mut page, [a, ta, b, tb], _) = page();
        page.set_touch_points(5);
        let mut s = Submenu::setup(&mut page).unwrap();

        click(&mut s, &mut page, ta);
        assert!(page.has_class(a, OPEN_CLASS));
        assert_eq!(page.attribute(ta, "aria-expanded").as_deref(), Some("true"));

        click(&mut s, &mut page, tb);
        assert!(!page.has_class(a, OPEN_CLASS));
        assert!(page.has_class(b, OPEN_CLASS));

        click(&mut s, &mut page, tb);
        assert_eq!(s.open_count(&page), 0);
    }

    #[test]
    fn test_outside_click_and_escape_close() {
        let (mut page, [a, ta, ..], body) = page();
        page.set_hover_none(true);
        let mut s = Submenu::setup(&mut page).unwrap();

        click(&mut s, &mut page, ta);
        click(&mut s, &mut page, body);
        assert!(!page.has_class(a, OPEN_CLASS));

        click(&mut s, &mut page, ta);
        s.on_signal(&Signal::KeyDown { key: "Escape".into() }, &mut page);
        assert!(!page.has_class(a, OPEN_CLASS));
    }
}
